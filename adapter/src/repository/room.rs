use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::RoomId, room::Room};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::room::RoomRow, ConnectionPool};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let row: Option<RoomRow> = sqlx::query_as(
            r#"
                SELECT
                    room_id,
                    name,
                    capacity,
                    hotel_id,
                    created_at,
                    updated_at
                FROM rooms
                WHERE room_id = $1
            "#,
        )
        .bind(room_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Room::from))
    }
}
