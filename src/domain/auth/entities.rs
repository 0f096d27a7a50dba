use chrono::{DateTime, Duration, Utc};
use std::fmt;

use super::errors::ValidationError;
use super::value_objects::validate_email;

/// Session entity: an authenticated identity plus its token pair and expiry.
///
/// Sessions are never mutated. A refresh produces a new `AuthenticatedUser`
/// and the previous one is simply dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
  id: String,
  email: String,
  full_name: String,
  access_token: String,
  refresh_token: String,
  expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
  /// Creates a session, checking the id, email and access token
  pub fn new(
    id: impl Into<String>,
    email: impl Into<String>,
    full_name: impl Into<String>,
    access_token: impl Into<String>,
    refresh_token: impl Into<String>,
    expires_at: DateTime<Utc>,
  ) -> Result<Self, ValidationError> {
    let user = Self {
      id: id.into(),
      email: email.into(),
      full_name: full_name.into(),
      access_token: access_token.into(),
      refresh_token: refresh_token.into(),
      expires_at,
    };
    user.validate()?;
    Ok(user)
  }

  /// Creates a session that expires `ttl` from now
  ///
  /// `ttl` must be positive and small enough to land on a representable
  /// timestamp.
  pub fn with_duration(
    id: impl Into<String>,
    email: impl Into<String>,
    full_name: impl Into<String>,
    access_token: impl Into<String>,
    refresh_token: impl Into<String>,
    ttl: Duration,
  ) -> Result<Self, ValidationError> {
    if ttl <= Duration::zero() {
      return Err(ValidationError::InvalidSessionTtl);
    }
    let expires_at = Utc::now()
      .checked_add_signed(ttl)
      .ok_or(ValidationError::InvalidSessionTtl)?;

    Self::new(
      id,
      email,
      full_name,
      access_token,
      refresh_token,
      expires_at,
    )
  }

  fn validate(&self) -> Result<(), ValidationError> {
    if self.id.trim().is_empty() {
      return Err(ValidationError::MissingId);
    }
    validate_email(&self.email)?;
    if self.access_token.trim().is_empty() {
      return Err(ValidationError::MissingAccessToken);
    }
    Ok(())
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn email(&self) -> &str {
    &self.email
  }

  pub fn full_name(&self) -> &str {
    &self.full_name
  }

  pub fn access_token(&self) -> &str {
    &self.access_token
  }

  pub fn refresh_token(&self) -> &str {
    &self.refresh_token
  }

  pub fn expires_at(&self) -> DateTime<Utc> {
    self.expires_at
  }

  /// Full name when present, otherwise the email
  pub fn display_name(&self) -> &str {
    if self.full_name.is_empty() {
      &self.email
    } else {
      &self.full_name
    }
  }

  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    now >= self.expires_at
  }

  /// Checks if the session has expired
  pub fn is_expired(&self) -> bool {
    self.is_expired_at(Utc::now())
  }

  pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
    self.validate().is_ok() && !self.is_expired_at(now)
  }

  /// Construction invariants hold and the session has not expired
  pub fn is_valid(&self) -> bool {
    self.is_valid_at(Utc::now())
  }

  /// Returns the remaining time until expiration
  pub fn time_until_expiration(&self) -> Duration {
    self.expires_at - Utc::now()
  }

  /// Builds the successor session for the same identity
  pub fn renewed(
    &self,
    access_token: impl Into<String>,
    refresh_token: impl Into<String>,
    ttl: Duration,
  ) -> Result<Self, ValidationError> {
    Self::with_duration(
      self.id.clone(),
      self.email.clone(),
      self.full_name.clone(),
      access_token,
      refresh_token,
      ttl,
    )
  }
}

// Tokens stay out of logs
impl fmt::Debug for AuthenticatedUser {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AuthenticatedUser")
      .field("id", &self.id)
      .field("email", &self.email)
      .field("full_name", &self.full_name)
      .field("access_token", &"***")
      .field("refresh_token", &"***")
      .field("expires_at", &self.expires_at)
      .finish()
  }
}
