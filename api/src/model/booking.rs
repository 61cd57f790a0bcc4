use garde::Validate;
use kernel::model::{
    booking::{Booking, BookingRoom},
    id::{BookingId, HotelId, RoomId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(required)]
    pub room_id: Option<RoomId>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[garde(required)]
    pub room_id: Option<RoomId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub room: BookingRoomResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id, room, ..
        } = value;
        Self {
            id: booking_id,
            room: room.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRoomResponse {
    pub id: RoomId,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: HotelId,
}

impl From<BookingRoom> for BookingRoomResponse {
    fn from(value: BookingRoom) -> Self {
        let BookingRoom {
            room_id,
            name,
            capacity,
            hotel_id,
        } = value;
        Self {
            id: room_id,
            name,
            capacity,
            hotel_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedResponse {
    pub booking_id: BookingId,
}

impl From<BookingId> for BookedResponse {
    fn from(value: BookingId) -> Self {
        Self { booking_id: value }
    }
}
