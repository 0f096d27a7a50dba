use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::TokenGenerator;

/// Secure token generator using cryptographically secure random number generation
pub struct SecureTokenGenerator {
  prefix: Option<String>,
}

impl SecureTokenGenerator {
  const TOKEN_BYTES: usize = 32;

  /// Creates a new instance of SecureTokenGenerator
  pub fn new() -> Self {
    Self { prefix: None }
  }

  /// Creates a generator whose tokens start with `prefix`
  pub fn with_prefix(prefix: impl Into<String>) -> Self {
    Self {
      prefix: Some(prefix.into()),
    }
  }
}

impl Default for SecureTokenGenerator {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl TokenGenerator for SecureTokenGenerator {
  /// Generates a cryptographically secure random token
  ///
  /// Creates a 32-byte random token using the operating system's
  /// cryptographically secure random number generator (OsRng), encoded as
  /// base64url without padding.
  async fn generate(&self) -> Result<String, AuthError> {
    let mut token_bytes = [0u8; Self::TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut token_bytes);

    let token = URL_SAFE_NO_PAD.encode(token_bytes);

    Ok(match &self.prefix {
      Some(prefix) => format!("{}{}", prefix, token),
      None => token,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_generate_creates_unique_tokens() {
    let generator = SecureTokenGenerator::new();

    let token1 = generator.generate().await.unwrap();
    let token2 = generator.generate().await.unwrap();

    assert_ne!(token1, token2);
  }

  #[tokio::test]
  async fn test_generate_creates_base64url_token() {
    let generator = SecureTokenGenerator::new();

    let token = generator.generate().await.unwrap();

    assert!(
      token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
    // 32 bytes encoded in base64url without padding should be 43 characters
    assert_eq!(token.len(), 43);
  }

  #[tokio::test]
  async fn test_generate_with_prefix() {
    let generator = SecureTokenGenerator::with_prefix("mock_token_");

    let token = generator.generate().await.unwrap();

    assert!(token.starts_with("mock_token_"));
    assert_eq!(token.len(), "mock_token_".len() + 43);
  }
}
