use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{
        event::{CreateBooking, UpdateBookingRoom},
        Booking,
    },
    id::{BookingId, RoomId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::booking::BookingRow, ConnectionPool};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.user_id,
                    b.created_at,
                    b.updated_at,
                    r.room_id,
                    r.name AS room_name,
                    r.capacity,
                    r.hotel_id
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                WHERE b.user_id = $1
            "#,
        )
        .bind(user_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Booking::from))
    }

    async fn find_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.user_id,
                    b.created_at,
                    b.updated_at,
                    r.room_id,
                    r.name AS room_name,
                    r.capacity,
                    r.hotel_id
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                WHERE b.room_id = $1
                ORDER BY b.created_at ASC
            "#,
        )
        .bind(room_id.raw())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
        let booking_id = BookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO bookings (booking_id, user_id, room_id)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(booking_id.raw())
        .bind(event.booked_by.raw())
        .bind(event.room_id.raw())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been created".into(),
            ));
        }

        Ok(booking_id)
    }

    async fn update_room(&self, event: UpdateBookingRoom) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET
                    room_id = $1,
                    updated_at = NOW()
                WHERE booking_id = $2 AND user_id = $3
            "#,
        )
        .bind(event.room_id.raw())
        .bind(event.booking_id.raw())
        .bind(event.booked_by.raw())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been updated".into(),
            ));
        }

        Ok(())
    }
}
