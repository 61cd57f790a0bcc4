use chrono::{DateTime, Utc};
use kernel::model::room::Room;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(value: RoomRow) -> Self {
        let RoomRow {
            room_id,
            name,
            capacity,
            hotel_id,
            created_at,
            updated_at,
        } = value;
        Room {
            room_id: room_id.into(),
            name,
            capacity,
            hotel_id: hotel_id.into(),
            created_at,
            updated_at,
        }
    }
}
