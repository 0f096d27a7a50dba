use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::auth::errors::StoreError;
use crate::domain::auth::ports::SessionStore;

/// Session store keeping one JSON file per key inside a directory.
///
/// Survives process restarts, which is what lets `get_current_user` restore
/// a session for a fresh adapter instance.
pub struct FileSessionStore {
  dir: PathBuf,
}

impl FileSessionStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_for(&self, key: &str) -> PathBuf {
    let file_name: String = key
      .chars()
      .map(|c| {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
          c
        } else {
          '_'
        }
      })
      .collect();
    self.dir.join(format!("{}.json", file_name))
  }
}

#[async_trait]
impl SessionStore for FileSessionStore {
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    match tokio::fs::read_to_string(self.path_for(key)).await {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => {
        tracing::error!("Failed to read session file for key {}: {}", key, e);
        Err(e.into())
      }
    }
  }

  async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    tokio::fs::create_dir_all(&self.dir).await?;

    // Write then rename so readers never see a half-written snapshot
    let path = self.path_for(key);
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, value).await?;
    tokio::fs::rename(&tmp, &path).await?;
    Ok(())
  }

  async fn remove(&self, key: &str) -> Result<(), StoreError> {
    match tokio::fs::remove_file(self.path_for(key)).await {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}
