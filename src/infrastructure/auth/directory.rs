use serde::Deserialize;
use std::fmt;

use crate::domain::auth::value_objects::{Credentials, RegistrationRequest};

/// Account record the mock adapter checks credentials against
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryEntry {
  pub id: String,
  pub email: String,
  pub password: String,
  pub full_name: String,
}

impl DirectoryEntry {
  pub fn new(
    id: impl Into<String>,
    email: impl Into<String>,
    password: impl Into<String>,
    full_name: impl Into<String>,
  ) -> Self {
    Self {
      id: id.into(),
      email: email.into(),
      password: password.into(),
      full_name: full_name.into(),
    }
  }
}

impl fmt::Debug for DirectoryEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DirectoryEntry")
      .field("id", &self.id)
      .field("email", &self.email)
      .field("password", &"***")
      .field("full_name", &self.full_name)
      .finish()
  }
}

/// Accounts shipped with the mock adapter
pub fn default_seed_users() -> Vec<DirectoryEntry> {
  vec![
    DirectoryEntry::new("1", "admin@test.com", "Admin123", "Administrador Test"),
    DirectoryEntry::new("2", "user@test.com", "User123", "Usuario Test"),
  ]
}

/// In-process user directory. Only grows; entries are never edited.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
  entries: Vec<DirectoryEntry>,
}

impl UserDirectory {
  pub fn new(entries: Vec<DirectoryEntry>) -> Self {
    Self { entries }
  }

  /// Exact, case-sensitive match on email and password
  pub fn find_by_credentials(&self, credentials: &Credentials) -> Option<&DirectoryEntry> {
    self.entries.iter().find(|entry| {
      entry.email == credentials.email().as_str() && entry.password == credentials.password()
    })
  }

  pub fn contains_email(&self, email: &str) -> bool {
    self.entries.iter().any(|entry| entry.email == email)
  }

  /// Adds an account for `request` under `id`
  pub fn append(
    &mut self,
    id: impl Into<String>,
    request: &RegistrationRequest,
  ) -> &DirectoryEntry {
    let (email, password) = request.credentials();
    self.entries.push(DirectoryEntry::new(
      id,
      email.as_str(),
      password,
      request.full_name(),
    ));
    &self.entries[self.entries.len() - 1]
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_find_by_credentials_is_exact() {
    let directory = UserDirectory::new(default_seed_users());

    let found = directory
      .find_by_credentials(&Credentials::new("admin@test.com", "Admin123").unwrap())
      .unwrap();
    assert_eq!(found.id, "1");

    assert!(
      directory
        .find_by_credentials(&Credentials::new("Admin@test.com", "Admin123").unwrap())
        .is_none()
    );
    assert!(
      directory
        .find_by_credentials(&Credentials::new("admin@test.com", "admin123").unwrap())
        .is_none()
    );
  }

  #[test]
  fn test_append_grows_directory() {
    let mut directory = UserDirectory::new(default_seed_users());
    let request =
      RegistrationRequest::new("new@test.com", "Secret123", "Secret123", "New User").unwrap();

    let entry = directory.append("abc", &request);
    assert_eq!(entry.email, "new@test.com");
    assert_eq!(entry.full_name, "New User");

    assert_eq!(directory.len(), 3);
    assert!(directory.contains_email("new@test.com"));
    assert!(!directory.contains_email("NEW@test.com"));
  }

  #[test]
  fn test_entry_debug_redacts_password() {
    let entry = DirectoryEntry::new("1", "a@b.com", "Admin123", "A");
    assert!(!format!("{:?}", entry).contains("Admin123"));
  }
}
