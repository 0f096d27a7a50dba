use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::auth::errors::StoreError;
use crate::domain::auth::ports::SessionStore;

/// Process-local session store
#[derive(Default)]
pub struct InMemorySessionStore {
  entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Ok(self.entries.read().await.get(key).cloned())
  }

  async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    self
      .entries
      .write()
      .await
      .insert(key.to_string(), value.to_string());
    Ok(())
  }

  async fn remove(&self, key: &str) -> Result<(), StoreError> {
    self.entries.write().await.remove(key);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_set_get_remove() {
    let store = InMemorySessionStore::new();

    assert_eq!(store.get("currentUser").await.unwrap(), None);

    store.set("currentUser", "{}").await.unwrap();
    assert_eq!(
      store.get("currentUser").await.unwrap().as_deref(),
      Some("{}")
    );

    store.remove("currentUser").await.unwrap();
    assert_eq!(store.get("currentUser").await.unwrap(), None);

    // Removing again is fine
    store.remove("currentUser").await.unwrap();
  }
}
