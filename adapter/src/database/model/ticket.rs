use kernel::model::ticket::{Ticket, TicketStatus, TicketType};
use shared::error::AppError;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct TicketRow {
    pub ticket_id: Uuid,
    pub enrollment_id: Uuid,
    pub status: String,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = AppError;

    fn try_from(value: TicketRow) -> Result<Self, Self::Error> {
        let TicketRow {
            ticket_id,
            enrollment_id,
            status,
            is_remote,
            includes_hotel,
        } = value;
        Ok(Ticket {
            ticket_id: ticket_id.into(),
            enrollment_id: enrollment_id.into(),
            status: status.parse::<TicketStatus>()?,
            ticket_type: TicketType {
                is_remote,
                includes_hotel,
            },
        })
    }
}
