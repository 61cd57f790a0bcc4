use redis::Client;
use shared::{config::RedisConfig, error::AppResult};

pub mod model;

use self::model::RedisKey;

pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    pub fn new(config: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(format!("redis://{}:{}", config.host, config.port))?;
        Ok(Self { client })
    }

    pub async fn get<T: RedisKey>(&self, key: &T) -> AppResult<Option<T::Value>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let result: Option<String> = redis::AsyncCommands::get(&mut conn, key.inner()).await?;
        result.map(T::Value::try_from).transpose()
    }
}
