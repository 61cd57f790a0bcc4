use kernel::model::enrollment::Enrollment;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct EnrollmentRow {
    pub enrollment_id: Uuid,
    pub user_id: Uuid,
    pub has_address: bool,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(value: EnrollmentRow) -> Self {
        let EnrollmentRow {
            enrollment_id,
            user_id,
            has_address,
        } = value;
        Enrollment {
            enrollment_id: enrollment_id.into(),
            user_id: user_id.into(),
            has_address,
        }
    }
}
