use crate::model::id::{EnrollmentId, UserId};

/// Event registration record. Only its existence (with an address on
/// file) matters when deciding whether a user may book a room.
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
    pub has_address: bool,
}
