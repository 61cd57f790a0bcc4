use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::redis::RedisClient;
use adapter::repository::{
    auth::AuthRepositoryImpl, booking::BookingRepositoryImpl,
    enrollment::EnrollmentRepositoryImpl, health::HealthCheckRepositoryImpl,
    room::RoomRepositoryImpl, ticket::TicketRepositoryImpl,
};
use kernel::repository::auth::AuthRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::service::booking::BookingService;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    booking_service: Arc<BookingService>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, kv: Arc<RedisClient>) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(kv.clone()));
        let booking_service = Arc::new(BookingService::new(
            Arc::new(BookingRepositoryImpl::new(pool.clone())),
            Arc::new(RoomRepositoryImpl::new(pool.clone())),
            Arc::new(EnrollmentRepositoryImpl::new(pool.clone())),
            Arc::new(TicketRepositoryImpl::new(pool.clone())),
        ));
        Self {
            health_check_repository,
            auth_repository,
            booking_service,
        }
    }

    /// Assembles a registry from already-built components. Lets tests wire
    /// in-memory repositories behind the same handlers.
    pub fn from_components(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        auth_repository: Arc<dyn AuthRepository>,
        booking_service: Arc<BookingService>,
    ) -> Self {
        Self {
            health_check_repository,
            auth_repository,
            booking_service,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn booking_service(&self) -> Arc<BookingService> {
        self.booking_service.clone()
    }
}
