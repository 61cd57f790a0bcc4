use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use api::route::{booking::build_booking_routers, health::build_health_check_routers};
use kernel::model::auth::AccessToken;
use kernel::model::booking::event::{CreateBooking, UpdateBookingRoom};
use kernel::model::booking::{Booking, BookingRoom};
use kernel::model::enrollment::Enrollment;
use kernel::model::id::{BookingId, EnrollmentId, HotelId, RoomId, TicketId, UserId};
use kernel::model::room::Room;
use kernel::model::ticket::{Ticket, TicketStatus, TicketType};
use kernel::repository::auth::AuthRepository;
use kernel::repository::booking::BookingRepository;
use kernel::repository::enrollment::EnrollmentRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::room::RoomRepository;
use kernel::repository::ticket::TicketRepository;
use kernel::service::booking::BookingService;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

struct InMemoryBookingRepository {
    rooms: Vec<Room>,
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookingRepository {
    fn booking_room(&self, room_id: RoomId) -> AppResult<BookingRoom> {
        self.rooms
            .iter()
            .find(|r| r.room_id == room_id)
            .map(|r| BookingRoom {
                room_id: r.room_id,
                name: r.name.clone(),
                capacity: r.capacity,
                hotel_id: r.hotel_id,
            })
            .ok_or_else(|| AppError::EntityNotFound(format!("room ({room_id}) not found")))
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.booked_by == user_id)
            .cloned())
    }

    async fn find_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.room.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
        let room = self.booking_room(event.room_id)?;
        let booking_id = BookingId::new();
        let now = Utc::now();
        self.bookings.lock().unwrap().push(Booking {
            booking_id,
            booked_by: event.booked_by,
            room,
            created_at: now,
            updated_at: now,
        });
        Ok(booking_id)
    }

    async fn update_room(&self, event: UpdateBookingRoom) -> AppResult<()> {
        let room = self.booking_room(event.room_id)?;
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .iter_mut()
            .find(|b| b.booking_id == event.booking_id && b.booked_by == event.booked_by)
            .ok_or_else(|| {
                AppError::NoRowsAffectedError("no booking record has been updated".into())
            })?;
        booking.room = room;
        booking.updated_at = Utc::now();
        Ok(())
    }
}

struct InMemoryRoomRepository {
    rooms: Vec<Room>,
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        Ok(self.rooms.iter().find(|r| r.room_id == room_id).cloned())
    }
}

struct FixedEnrollmentRepository {
    enrollment: Option<Enrollment>,
}

#[async_trait]
impl EnrollmentRepository for FixedEnrollmentRepository {
    async fn find_with_address_by_user_id(
        &self,
        _user_id: UserId,
    ) -> AppResult<Option<Enrollment>> {
        Ok(self.enrollment.clone())
    }
}

struct FixedTicketRepository {
    ticket: Option<Ticket>,
}

#[async_trait]
impl TicketRepository for FixedTicketRepository {
    async fn find_by_enrollment_id(
        &self,
        _enrollment_id: EnrollmentId,
    ) -> AppResult<Option<Ticket>> {
        Ok(self.ticket.clone())
    }
}

struct InMemoryAuthRepository {
    sessions: HashMap<String, UserId>,
}

#[async_trait]
impl AuthRepository for InMemoryAuthRepository {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        Ok(self.sessions.get(&access_token.0).copied())
    }
}

struct AlwaysHealthy;

#[async_trait]
impl HealthCheckRepository for AlwaysHealthy {
    async fn check_db(&self) -> bool {
        true
    }
}

fn room_with_capacity(capacity: i32) -> Room {
    let now = Utc::now();
    Room {
        room_id: RoomId::new(),
        name: "101".into(),
        capacity,
        hotel_id: HotelId::new(),
        created_at: now,
        updated_at: now,
    }
}

fn paid_hotel_ticket() -> Ticket {
    Ticket {
        ticket_id: TicketId::new(),
        enrollment_id: EnrollmentId::new(),
        status: TicketStatus::Paid,
        ticket_type: TicketType {
            is_remote: false,
            includes_hotel: true,
        },
    }
}

fn enrollment() -> Enrollment {
    Enrollment {
        enrollment_id: EnrollmentId::new(),
        user_id: UserId::new(),
        has_address: true,
    }
}

fn build_app(
    rooms: Vec<Room>,
    ticket: Option<Ticket>,
    sessions: HashMap<String, UserId>,
) -> Router {
    let booking_service = Arc::new(BookingService::new(
        Arc::new(InMemoryBookingRepository {
            rooms: rooms.clone(),
            bookings: Mutex::new(Vec::new()),
        }),
        Arc::new(InMemoryRoomRepository { rooms }),
        Arc::new(FixedEnrollmentRepository {
            enrollment: Some(enrollment()),
        }),
        Arc::new(FixedTicketRepository { ticket }),
    ));
    let registry = AppRegistry::from_components(
        Arc::new(AlwaysHealthy),
        Arc::new(InMemoryAuthRepository { sessions }),
        booking_service,
    );

    Router::new()
        .merge(build_health_check_routers())
        .merge(build_booking_routers())
        .with_state(registry)
}

fn default_app() -> (Router, &'static str) {
    let token = "valid-token";
    let sessions = HashMap::from([(token.to_string(), UserId::new())]);
    let app = build_app(
        vec![room_with_capacity(3)],
        Some(paid_hotel_ticket()),
        sessions,
    );
    (app, token)
}

fn get_booking(token: Option<&str>) -> Request<Body> {
    let builder = Request::builder().method("GET").uri("/booking");
    let builder = match token {
        Some(t) => builder.header(header::AUTHORIZATION, format!("Bearer {t}")),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}

fn post_booking(token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/booking")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_booking(token: &str, booking_id: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(format!("/booking/{booking_id}"))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn health_check_works() {
    let (app, _) = default_app();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn request_without_token_is_unauthorized() {
    let (app, _) = default_app();

    let (status, _) = send(&app, get_booking(None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn request_with_unknown_token_is_unauthorized() {
    let (app, _) = default_app();

    let (status, _) = send(&app, get_booking(Some("stale-token"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_booking_without_a_booking_is_not_found() {
    let (app, token) = default_app();

    let (status, _) = send(&app, get_booking(Some(token))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn booking_then_fetching_returns_the_room() {
    let token = "valid-token";
    let sessions = HashMap::from([(token.to_string(), UserId::new())]);
    let room = room_with_capacity(3);
    let room_id = room.room_id;
    let app = build_app(vec![room], Some(paid_hotel_ticket()), sessions);

    let (status, body) = send(
        &app,
        post_booking(token, json!({ "roomId": room_id.to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let booking_id = body["bookingId"].as_str().unwrap().to_string();

    let (status, body) = send(&app, get_booking(Some(token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_str().unwrap(), booking_id);
    assert_eq!(body["room"]["id"].as_str().unwrap(), room_id.to_string());
    assert_eq!(body["room"]["capacity"].as_i64().unwrap(), 3);
}

#[tokio::test]
async fn booking_without_room_id_is_a_bad_request() {
    let (app, token) = default_app();

    let (status, _) = send(&app, post_booking(token, json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn booking_an_unknown_room_is_not_found() {
    let (app, token) = default_app();

    let (status, _) = send(
        &app,
        post_booking(token, json!({ "roomId": RoomId::new().to_string() })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unpaid_ticket_is_forbidden() {
    let token = "valid-token";
    let sessions = HashMap::from([(token.to_string(), UserId::new())]);
    let room = room_with_capacity(3);
    let room_id = room.room_id;
    let unpaid = Ticket {
        status: TicketStatus::Reserved,
        ..paid_hotel_ticket()
    };
    let app = build_app(vec![room], Some(unpaid), sessions);

    let (status, _) = send(
        &app,
        post_booking(token, json!({ "roomId": room_id.to_string() })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn full_room_is_forbidden() {
    let first = "first-token";
    let second = "second-token";
    let sessions = HashMap::from([
        (first.to_string(), UserId::new()),
        (second.to_string(), UserId::new()),
    ]);
    let room = room_with_capacity(1);
    let room_id = room.room_id;
    let app = build_app(vec![room], Some(paid_hotel_ticket()), sessions);

    let (status, _) = send(
        &app,
        post_booking(first, json!({ "roomId": room_id.to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        post_booking(second, json!({ "roomId": room_id.to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn moving_a_booking_to_another_room_works() {
    let token = "valid-token";
    let sessions = HashMap::from([(token.to_string(), UserId::new())]);
    let first = room_with_capacity(2);
    let second = room_with_capacity(2);
    let first_id = first.room_id;
    let second_id = second.room_id;
    let app = build_app(vec![first, second], Some(paid_hotel_ticket()), sessions);

    let (_, body) = send(
        &app,
        post_booking(token, json!({ "roomId": first_id.to_string() })),
    )
    .await;
    let booking_id = body["bookingId"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        put_booking(token, &booking_id, json!({ "roomId": second_id.to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookingId"].as_str().unwrap(), booking_id);

    let (_, body) = send(&app, get_booking(Some(token))).await;
    assert_eq!(body["room"]["id"].as_str().unwrap(), second_id.to_string());
}

#[tokio::test]
async fn moving_someone_elses_booking_is_forbidden() {
    let owner = "owner-token";
    let intruder = "intruder-token";
    let sessions = HashMap::from([
        (owner.to_string(), UserId::new()),
        (intruder.to_string(), UserId::new()),
    ]);
    let first = room_with_capacity(2);
    let second = room_with_capacity(2);
    let first_id = first.room_id;
    let second_id = second.room_id;
    let app = build_app(vec![first, second], Some(paid_hotel_ticket()), sessions);

    let (_, body) = send(
        &app,
        post_booking(owner, json!({ "roomId": first_id.to_string() })),
    )
    .await;
    let owners_booking = body["bookingId"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        put_booking(
            intruder,
            &owners_booking,
            json!({ "roomId": second_id.to_string() }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_booking_id_is_a_bad_request() {
    let (app, token) = default_app();

    let (status, _) = send(
        &app,
        put_booking(token, "not-a-uuid", json!({ "roomId": RoomId::new().to_string() })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_without_room_id_is_a_bad_request() {
    let token = "valid-token";
    let sessions = HashMap::from([(token.to_string(), UserId::new())]);
    let room = room_with_capacity(2);
    let room_id = room.room_id;
    let app = build_app(vec![room], Some(paid_hotel_ticket()), sessions);

    let (_, body) = send(
        &app,
        post_booking(token, json!({ "roomId": room_id.to_string() })),
    )
    .await;
    let booking_id = body["bookingId"].as_str().unwrap().to_string();

    let (status, _) = send(&app, put_booking(token, &booking_id, json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
