// Per-user preference store, created at service start and shared by handlers

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::RwLock;

use crate::models::UserPreferences;

const KEY_PREFIX: &str = "travel:preferences:";

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<UserPreferences>>;
    async fn put(&self, user_id: &str, preferences: &UserPreferences) -> Result<()>;
    async fn delete(&self, user_id: &str) -> Result<()>;
}

pub type SharedStore = Arc<dyn PreferenceStore>;

/// Process-local store, used when no Redis URL is configured.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, UserPreferences>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserPreferences>> {
        Ok(self.entries.read().await.get(user_id).cloned())
    }

    async fn put(&self, user_id: &str, preferences: &UserPreferences) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(user_id.to_string(), preferences.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        self.entries.write().await.remove(user_id);
        Ok(())
    }
}

#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    expiry_secs: u64,
}

impl RedisStore {
    pub async fn new(redis_url: &str, expiry_secs: u64) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let connection = client.get_tokio_connection_manager().await?;
        Ok(Self {
            connection,
            expiry_secs,
        })
    }

    fn key(user_id: &str) -> String {
        format!("{}{}", KEY_PREFIX, user_id)
    }
}

#[async_trait]
impl PreferenceStore for RedisStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserPreferences>> {
        let mut connection = self.connection.clone();
        let result: Option<String> = connection.get(Self::key(user_id)).await?;
        match result {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, user_id: &str, preferences: &UserPreferences) -> Result<()> {
        let json = serde_json::to_string(preferences)?;
        let mut connection = self.connection.clone();
        connection
            .set_ex::<_, _, ()>(Self::key(user_id), json, self.expiry_secs)
            .await?;
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        let mut connection = self.connection.clone();
        connection.del::<_, ()>(Self::key(user_id)).await?;
        Ok(())
    }
}
