use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;

use crate::domain::auth::errors::StoreError;
use crate::domain::auth::ports::SessionStore;

/// Redis-backed session store
pub struct RedisSessionStore {
  conn: ConnectionManager,
  namespace: String,
}

impl RedisSessionStore {
  pub fn new(conn: ConnectionManager, namespace: impl Into<String>) -> Self {
    Self {
      conn,
      namespace: namespace.into(),
    }
  }

  /// Opens a managed connection, giving up after `connect_timeout`
  pub async fn connect(
    url: &str,
    namespace: impl Into<String>,
    connect_timeout: Duration,
  ) -> Result<Self, StoreError> {
    tracing::info!("Connecting to Redis: {}", url);

    let client = redis::Client::open(url)?;
    let conn = tokio::time::timeout(connect_timeout, client.get_connection_manager())
      .await
      .map_err(|_| {
        tracing::error!(
          "Redis connection timed out after {} seconds",
          connect_timeout.as_secs()
        );
        StoreError::Unavailable(format!(
          "Redis connection timed out after {} seconds",
          connect_timeout.as_secs()
        ))
      })??;

    Ok(Self::new(conn, namespace))
  }

  fn namespaced(&self, key: &str) -> String {
    namespaced_key(&self.namespace, key)
  }
}

fn namespaced_key(namespace: &str, key: &str) -> String {
  if namespace.is_empty() {
    key.to_string()
  } else {
    format!("{}:{}", namespace, key)
  }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    let mut conn = self.conn.clone();
    let value: Option<String> = conn.get(self.namespaced(key)).await?;
    Ok(value)
  }

  async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    let mut conn = self.conn.clone();
    conn
      .set::<_, _, ()>(self.namespaced(key), value)
      .await?;
    Ok(())
  }

  async fn remove(&self, key: &str) -> Result<(), StoreError> {
    let mut conn = self.conn.clone();
    conn.del::<_, ()>(self.namespaced(key)).await?;
    Ok(())
  }
}
