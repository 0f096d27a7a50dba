use std::sync::Arc;
use std::time::Duration;

use super::{HttpAuthAdapter, MockAuthAdapter, UserDirectory};
use crate::domain::auth::errors::{AuthError, StoreError};
use crate::domain::auth::ports::{AuthPort, SessionStore};
use crate::infrastructure::config::{AdapterKind, Config, SessionStoreConfig, StoreBackend};
use crate::infrastructure::persistence::{
  FileSessionStore, InMemorySessionStore, RedisSessionStore, SnapshotRepository,
};
use crate::infrastructure::security::SecureTokenGenerator;

pub struct AuthPortFactory;

impl AuthPortFactory {
  /// Build the configured authentication adapter
  ///
  /// # Errors
  /// Returns an error if the session store cannot be reached or the HTTP
  /// client cannot be built
  pub async fn create(config: &Config) -> Result<Arc<dyn AuthPort>, AuthError> {
    let store = Self::create_store(&config.session_store).await?;
    let snapshots = SnapshotRepository::new(store, config.session_store.snapshot_key.clone());

    match config.auth.adapter {
      AdapterKind::Mock => {
        tracing::debug!(
          "Using MockAuthAdapter with {} seed users",
          config.mock.seed_users.len()
        );
        Ok(Arc::new(MockAuthAdapter::new(
          UserDirectory::new(config.mock.seed_users.clone()),
          snapshots,
          Arc::new(SecureTokenGenerator::with_prefix("mock_")),
          config
            .mock_settings()
            .map_err(|e| AuthError::Configuration(e.to_string()))?,
        )))
      }

      AdapterKind::Http => {
        tracing::debug!("Using HttpAuthAdapter against {}", config.http.base_url);
        Ok(Arc::new(HttpAuthAdapter::new(
          config.http.base_url.clone(),
          Duration::from_secs(config.http.timeout_seconds),
          snapshots,
        )?))
      }
    }
  }

  /// Build the configured session store
  pub async fn create_store(
    config: &SessionStoreConfig,
  ) -> Result<Arc<dyn SessionStore>, StoreError> {
    match config.backend {
      StoreBackend::Memory => {
        tracing::debug!("Using InMemorySessionStore");
        Ok(Arc::new(InMemorySessionStore::new()))
      }

      StoreBackend::File => {
        tracing::debug!("Using FileSessionStore in {}", config.file_dir);
        Ok(Arc::new(FileSessionStore::new(&config.file_dir)))
      }

      StoreBackend::Redis => {
        let store = RedisSessionStore::connect(
          &config.redis_url,
          config.redis_namespace.clone(),
          Duration::from_secs(config.connect_timeout_seconds),
        )
        .await?;
        Ok(Arc::new(store))
      }
    }
  }
}
