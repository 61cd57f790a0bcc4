use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    booking::{
        event::{CreateBooking, UpdateBookingRoom},
        Booking,
    },
    id::{BookingId, RoomId, UserId},
};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// A user's current booking, if any. At most one per user in practice.
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>>;
    /// All bookings currently occupying the room.
    async fn find_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Booking>>;
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId>;
    /// Reassigns an existing booking to another room. Update-only: fails
    /// when no booking matches the id and owner.
    async fn update_room(&self, event: UpdateBookingRoom) -> AppResult<()>;
}
