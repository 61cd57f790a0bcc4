use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use kernel::model::{auth::AccessToken, id::UserId};
use kernel::repository::auth::AuthRepository;
use shared::error::AppResult;

use crate::redis::{
    model::{AuthorizationKey, AuthorizedUserId},
    RedisClient,
};

/// Session lookup against the shared token store. Tokens are minted by
/// the upstream auth service; this side only resolves them.
#[derive(new)]
pub struct AuthRepositoryImpl {
    kv: Arc<RedisClient>,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key: AuthorizationKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|value| value.map(AuthorizedUserId::into_inner))
    }
}
