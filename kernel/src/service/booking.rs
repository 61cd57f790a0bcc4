use std::sync::Arc;

use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::model::{
    booking::{
        event::{CreateBooking, UpdateBookingRoom},
        Booking,
    },
    id::{BookingId, RoomId, UserId},
    ticket::TicketStatus,
};
use crate::repository::{
    booking::BookingRepository, enrollment::EnrollmentRepository, room::RoomRepository,
    ticket::TicketRepository,
};

/// Admission control for room bookings: a user gets a room only with a
/// paid, in-person, hotel-inclusive ticket, and only while the room has
/// spare capacity. All storage goes through the injected repositories.
#[derive(new)]
pub struct BookingService {
    booking_repository: Arc<dyn BookingRepository>,
    room_repository: Arc<dyn RoomRepository>,
    enrollment_repository: Arc<dyn EnrollmentRepository>,
    ticket_repository: Arc<dyn TicketRepository>,
}

impl BookingService {
    pub async fn get_booking(&self, user_id: UserId) -> AppResult<Booking> {
        self.booking_repository
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("no booking found for user ({user_id})"))
            })
    }

    pub async fn book_room(&self, user_id: UserId, room_id: RoomId) -> AppResult<BookingId> {
        self.check_enrollment_ticket(user_id).await?;
        self.check_room_capacity(room_id, None).await?;

        self.booking_repository
            .create(CreateBooking::new(user_id, room_id))
            .await
    }

    pub async fn change_room(
        &self,
        user_id: UserId,
        booking_id: BookingId,
        room_id: RoomId,
    ) -> AppResult<BookingId> {
        // The user's own booking does not count against the target room,
        // so moving within a full room they already occupy is allowed.
        self.check_room_capacity(room_id, Some(user_id)).await?;

        let current = self
            .booking_repository
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::CannotBook(format!("user ({user_id}) has no booking to move"))
            })?;

        if current.booking_id != booking_id {
            return Err(AppError::CannotBook(format!(
                "booking ({booking_id}) does not belong to user ({user_id})"
            )));
        }

        self.booking_repository
            .update_room(UpdateBookingRoom::new(booking_id, user_id, room_id))
            .await?;

        Ok(booking_id)
    }

    async fn check_enrollment_ticket(&self, user_id: UserId) -> AppResult<()> {
        let enrollment = self
            .enrollment_repository
            .find_with_address_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::CannotBook(format!("user ({user_id}) is not enrolled"))
            })?;

        let ticket = self
            .ticket_repository
            .find_by_enrollment_id(enrollment.enrollment_id)
            .await?
            .ok_or_else(|| {
                AppError::CannotBook(format!("user ({user_id}) has no ticket"))
            })?;

        if ticket.status == TicketStatus::Reserved {
            return Err(AppError::CannotBook(
                "ticket has not been paid for".into(),
            ));
        }
        if ticket.ticket_type.is_remote {
            return Err(AppError::CannotBook(
                "remote tickets do not include a hotel room".into(),
            ));
        }
        if !ticket.ticket_type.includes_hotel {
            return Err(AppError::CannotBook(
                "ticket type does not include a hotel room".into(),
            ));
        }

        Ok(())
    }

    // Check-then-book is not atomic across requests; two bookings racing
    // for the last slot can both pass. Accepted for now.
    async fn check_room_capacity(
        &self,
        room_id: RoomId,
        exclude_user: Option<UserId>,
    ) -> AppResult<()> {
        let room = self
            .room_repository
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("room ({room_id}) not found")))?;

        let bookings = self.booking_repository.find_by_room_id(room_id).await?;
        let occupied = bookings
            .iter()
            .filter(|b| Some(b.booked_by) != exclude_user)
            .count();

        if occupied >= room.capacity as usize {
            return Err(AppError::CannotBook(format!(
                "room ({room_id}) is already at capacity"
            )));
        }

        Ok(())
    }
}
