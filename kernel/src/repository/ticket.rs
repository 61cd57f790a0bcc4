use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{id::EnrollmentId, ticket::Ticket};

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn find_by_enrollment_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> AppResult<Option<Ticket>>;
}
