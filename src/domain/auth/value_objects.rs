use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

use super::errors::ValidationError;

lazy_static! {
  static ref EMAIL_REGEX: Regex =
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex");
}

/// Checks an address against the accepted email pattern
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
  if EMAIL_REGEX.is_match(email) {
    Ok(())
  } else {
    Err(ValidationError::InvalidEmail)
  }
}

// ============================================================================
// Email Value Object
// ============================================================================

/// A well-formed email address.
///
/// Addresses are kept exactly as entered: directory lookups are
/// case-sensitive, so no normalization happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
    let email = email.into();
    validate_email(&email)?;
    Ok(Self(email))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for Email {
  type Error = ValidationError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<Email> for String {
  fn from(email: Email) -> Self {
    email.0
  }
}

// ============================================================================
// Credentials Value Object
// ============================================================================

/// Login credentials, built fresh for every login attempt
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  email: Email,
  password: Zeroizing<String>,
}

impl Credentials {
  pub const MIN_PASSWORD_LENGTH: usize = 6;

  /// Validates the email format first, then the password length
  pub fn new(
    email: impl Into<String>,
    password: impl Into<String>,
  ) -> Result<Self, ValidationError> {
    let email = Email::new(email)?;
    let password = Zeroizing::new(password.into());
    Self::check_password(&password)?;

    Ok(Self { email, password })
  }

  fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < Self::MIN_PASSWORD_LENGTH {
      return Err(ValidationError::PasswordTooShort {
        min: Self::MIN_PASSWORD_LENGTH,
      });
    }
    Ok(())
  }

  /// Re-runs the construction rules, returning the first violation
  pub fn validate(&self) -> Result<(), ValidationError> {
    validate_email(self.email.as_str())?;
    Self::check_password(&self.password)
  }

  pub fn is_valid(&self) -> bool {
    self.validate().is_ok()
  }

  pub fn email(&self) -> &Email {
    &self.email
  }

  /// Returns the password as a string slice (use with caution)
  pub fn password(&self) -> &str {
    self.password.as_str()
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("email", &self.email)
      .field("password", &"***")
      .finish()
  }
}

// ============================================================================
// RegistrationRequest Value Object
// ============================================================================

/// Everything needed to open a new account
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
  email: Email,
  password: Zeroizing<String>,
  confirm_password: Zeroizing<String>,
  full_name: String,
}

impl RegistrationRequest {
  pub const MIN_PASSWORD_LENGTH: usize = 8;
  pub const MIN_FULL_NAME_LENGTH: usize = 2;

  /// Creates a registration request.
  ///
  /// Rules are checked in a fixed order and the first violation is returned:
  /// email format, password policy, password confirmation, full name length.
  pub fn new(
    email: impl Into<String>,
    password: impl Into<String>,
    confirm_password: impl Into<String>,
    full_name: impl Into<String>,
  ) -> Result<Self, ValidationError> {
    let request = Self {
      email: Email::new(email)?,
      password: Zeroizing::new(password.into()),
      confirm_password: Zeroizing::new(confirm_password.into()),
      full_name: full_name.into(),
    };
    request.validate()?;
    Ok(request)
  }

  fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < Self::MIN_PASSWORD_LENGTH {
      return Err(ValidationError::PasswordTooShort {
        min: Self::MIN_PASSWORD_LENGTH,
      });
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_upper && has_lower && has_digit) {
      return Err(ValidationError::PasswordTooWeak);
    }

    Ok(())
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    validate_email(self.email.as_str())?;
    Self::check_password(&self.password)?;

    if *self.password != *self.confirm_password {
      return Err(ValidationError::PasswordMismatch);
    }

    if self.full_name.trim().chars().count() < Self::MIN_FULL_NAME_LENGTH {
      return Err(ValidationError::FullNameTooShort {
        min: Self::MIN_FULL_NAME_LENGTH,
      });
    }

    Ok(())
  }

  pub fn is_valid(&self) -> bool {
    self.validate().is_ok()
  }

  pub fn email(&self) -> &Email {
    &self.email
  }

  pub fn password(&self) -> &str {
    self.password.as_str()
  }

  pub fn full_name(&self) -> &str {
    &self.full_name
  }

  /// The `{email, password}` pair used once the account exists
  pub fn credentials(&self) -> (&Email, &str) {
    (&self.email, self.password.as_str())
  }
}

impl fmt::Debug for RegistrationRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RegistrationRequest")
      .field("email", &self.email)
      .field("password", &"***")
      .field("confirm_password", &"***")
      .field("full_name", &self.full_name)
      .finish()
  }
}
