use shared::error::AppError;

use crate::model::id::{EnrollmentId, TicketId};

#[derive(Debug, Clone)]
pub struct Ticket {
    pub ticket_id: TicketId,
    pub enrollment_id: EnrollmentId,
    pub status: TicketStatus,
    pub ticket_type: TicketType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    /// Held but not paid for yet.
    Reserved,
    Paid,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Reserved => write!(f, "RESERVED"),
            TicketStatus::Paid => write!(f, "PAID"),
        }
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RESERVED" => Ok(TicketStatus::Reserved),
            "PAID" => Ok(TicketStatus::Paid),
            other => Err(AppError::ConversionEntityError(format!(
                "unknown ticket status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TicketType {
    pub is_remote: bool,
    pub includes_hotel: bool,
}
