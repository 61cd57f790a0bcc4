use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{enrollment::Enrollment, id::UserId};

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// The user's enrollment, only when an address is on file.
    async fn find_with_address_by_user_id(&self, user_id: UserId)
        -> AppResult<Option<Enrollment>>;
}
