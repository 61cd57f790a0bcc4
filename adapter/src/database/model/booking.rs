use chrono::{DateTime, Utc};
use kernel::model::booking::{Booking, BookingRoom};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub room_id: Uuid,
    pub room_name: String,
    pub capacity: i32,
    pub hotel_id: Uuid,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            user_id,
            created_at,
            updated_at,
            room_id,
            room_name,
            capacity,
            hotel_id,
        } = value;
        Booking {
            booking_id: booking_id.into(),
            booked_by: user_id.into(),
            room: BookingRoom {
                room_id: room_id.into(),
                name: room_name,
                capacity,
                hotel_id: hotel_id.into(),
            },
            created_at,
            updated_at,
        }
    }
}
