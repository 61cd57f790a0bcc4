use kernel::model::{auth::AccessToken, id::UserId};
use shared::error::AppError;

pub trait RedisKey {
    type Value: TryFrom<String, Error = AppError>;
    fn inner(&self) -> String;
}

/// Key under which the session middleware stores the token owner.
pub struct AuthorizationKey(String);

impl From<&AccessToken> for AuthorizationKey {
    fn from(value: &AccessToken) -> Self {
        Self(value.0.to_string())
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        format!("auth:{}", self.0)
    }
}

pub struct AuthorizedUserId(UserId);

impl AuthorizedUserId {
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse::<UserId>().map(Self)
    }
}
