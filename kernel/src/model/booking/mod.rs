use chrono::{DateTime, Utc};

use crate::model::id::{BookingId, HotelId, RoomId, UserId};

pub mod event;

#[derive(Debug, Clone)]
pub struct Booking {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub room: BookingRoom,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Room attributes embedded in a booking so callers get the full
/// reservation picture in one read.
#[derive(Debug, Clone)]
pub struct BookingRoom {
    pub room_id: RoomId,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: HotelId,
}
