use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::infrastructure::auth::{
  DirectoryEntry, MockAuthSettings, RefreshTokenPolicy, SimulatedDelays, default_seed_users,
};

/// Upper bound for `auth.session_ttl_seconds` (ten years)
pub const MAX_SESSION_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

// Default value functions
fn default_session_ttl() -> u64 {
  3600
}

fn default_login_delay() -> u64 {
  1000
}

fn default_register_delay() -> u64 {
  1500
}

fn default_logout_delay() -> u64 {
  500
}

fn default_refresh_delay() -> u64 {
  800
}

fn default_http_base_url() -> String {
  "http://localhost:3000/api".to_string()
}

fn default_http_timeout() -> u64 {
  10
}

fn default_snapshot_key() -> String {
  "currentUser".to_string()
}

fn default_file_dir() -> String {
  "./data/session".to_string()
}

fn default_redis_url() -> String {
  "redis://127.0.0.1:6379".to_string()
}

fn default_redis_namespace() -> String {
  "authcore".to_string()
}

fn default_redis_connect_timeout() -> u64 {
  5
}

fn default_demo_email() -> String {
  "admin@test.com".to_string()
}

fn default_demo_password() -> String {
  "Admin123".to_string()
}

/// Main application configuration
///
/// Every section is optional; a missing section falls back to the defaults
/// of the mock adapter with an in-memory session store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub auth: AuthConfig,
  #[serde(default)]
  pub mock: MockConfig,
  #[serde(default)]
  pub http: HttpConfig,
  #[serde(default)]
  pub session_store: SessionStoreConfig,
  #[serde(default)]
  pub demo: DemoConfig,
}

/// Which [`AuthPort`](crate::domain::auth::AuthPort) implementation to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
  #[default]
  Mock,
  Http,
}

/// Where the session snapshot is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
  #[default]
  Memory,
  File,
  Redis,
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
  #[serde(default)]
  pub adapter: AdapterKind,
  #[serde(default = "default_session_ttl")]
  pub session_ttl_seconds: u64,
  #[serde(default)]
  pub refresh_token_policy: RefreshTokenPolicy,
}

impl Default for AuthConfig {
  fn default() -> Self {
    Self {
      adapter: AdapterKind::default(),
      session_ttl_seconds: default_session_ttl(),
      refresh_token_policy: RefreshTokenPolicy::default(),
    }
  }
}

/// Mock adapter configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MockConfig {
  #[serde(default = "default_login_delay")]
  pub login_delay_ms: u64,
  #[serde(default = "default_register_delay")]
  pub register_delay_ms: u64,
  #[serde(default = "default_logout_delay")]
  pub logout_delay_ms: u64,
  #[serde(default = "default_refresh_delay")]
  pub refresh_delay_ms: u64,
  #[serde(default = "default_seed_users")]
  pub seed_users: Vec<DirectoryEntry>,
}

impl Default for MockConfig {
  fn default() -> Self {
    Self {
      login_delay_ms: default_login_delay(),
      register_delay_ms: default_register_delay(),
      logout_delay_ms: default_logout_delay(),
      refresh_delay_ms: default_refresh_delay(),
      seed_users: default_seed_users(),
    }
  }
}

impl MockConfig {
  pub fn delays(&self) -> SimulatedDelays {
    SimulatedDelays {
      login: Duration::from_millis(self.login_delay_ms),
      register: Duration::from_millis(self.register_delay_ms),
      logout: Duration::from_millis(self.logout_delay_ms),
      refresh: Duration::from_millis(self.refresh_delay_ms),
    }
  }
}

/// Remote authentication API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
  #[serde(default = "default_http_base_url")]
  pub base_url: String,
  #[serde(default = "default_http_timeout")]
  pub timeout_seconds: u64,
}

impl Default for HttpConfig {
  fn default() -> Self {
    Self {
      base_url: default_http_base_url(),
      timeout_seconds: default_http_timeout(),
    }
  }
}

/// Session snapshot storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionStoreConfig {
  #[serde(default)]
  pub backend: StoreBackend,
  #[serde(default = "default_snapshot_key")]
  pub snapshot_key: String,
  #[serde(default = "default_file_dir")]
  pub file_dir: String,
  #[serde(default = "default_redis_url")]
  pub redis_url: String,
  #[serde(default = "default_redis_namespace")]
  pub redis_namespace: String,
  #[serde(default = "default_redis_connect_timeout")]
  pub connect_timeout_seconds: u64,
}

impl Default for SessionStoreConfig {
  fn default() -> Self {
    Self {
      backend: StoreBackend::default(),
      snapshot_key: default_snapshot_key(),
      file_dir: default_file_dir(),
      redis_url: default_redis_url(),
      redis_namespace: default_redis_namespace(),
      connect_timeout_seconds: default_redis_connect_timeout(),
    }
  }
}

/// Credentials the `authcore` binary logs in with when no session is stored
#[derive(Clone, Deserialize)]
pub struct DemoConfig {
  #[serde(default = "default_demo_email")]
  pub email: String,
  #[serde(default = "default_demo_password")]
  pub password: String,
}

impl Default for DemoConfig {
  fn default() -> Self {
    Self {
      email: default_demo_email(),
      password: default_demo_password(),
    }
  }
}

impl std::fmt::Debug for DemoConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DemoConfig")
      .field("email", &self.email)
      .field("password", &"***")
      .finish()
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml (if exists)
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with AUTHCORE_ prefix
  ///
  /// # Example
  ///
  /// ```no_run
  /// use authcore::infrastructure::config::Config;
  ///
  /// let config = Config::load().expect("Failed to load configuration");
  /// println!("Using {:?} adapter", config.auth.adapter);
  /// ```
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the AUTHCORE_ prefix and are separated by double underscores:
  /// - `AUTHCORE_AUTH__ADAPTER=http`
  /// - `AUTHCORE_AUTH__SESSION_TTL_SECONDS=7200`
  /// - `AUTHCORE_AUTH__REFRESH_TOKEN_POLICY=require_match`
  /// - `AUTHCORE_MOCK__LOGIN_DELAY_MS=0`
  /// - `AUTHCORE_HTTP__BASE_URL=https://api.example.com`
  /// - `AUTHCORE_SESSION_STORE__BACKEND=redis`
  /// - `AUTHCORE_SESSION_STORE__REDIS_URL=redis://localhost`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if:
  /// - Configuration files contain invalid TOML
  /// - Configuration values have invalid types
  /// - `auth.session_ttl_seconds` is zero or out of range
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(false))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      // AUTHCORE_SESSION_STORE__BACKEND=file
      .add_source(
        Environment::with_prefix("AUTHCORE")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    let config: Self = config.try_deserialize()?;
    config.validate()?;
    Ok(config)
  }

  /// Rejects values that cannot produce a usable session
  pub fn validate(&self) -> Result<(), ConfigError> {
    self.session_ttl().map(|_| ())
  }

  /// Session lifetime; must be positive and keep `now + ttl` representable
  pub fn session_ttl(&self) -> Result<chrono::Duration, ConfigError> {
    let seconds = self.auth.session_ttl_seconds;
    let invalid = || {
      ConfigError::Message(format!(
        "auth.session_ttl_seconds must be between 1 and {}, got {}",
        MAX_SESSION_TTL_SECONDS, seconds
      ))
    };

    if seconds == 0 || seconds > MAX_SESSION_TTL_SECONDS {
      return Err(invalid());
    }
    let seconds = i64::try_from(seconds).map_err(|_| invalid())?;
    let ttl = chrono::Duration::try_seconds(seconds).ok_or_else(invalid)?;
    chrono::Utc::now()
      .checked_add_signed(ttl)
      .ok_or_else(invalid)?;

    Ok(ttl)
  }

  /// Settings for [`MockAuthAdapter`](crate::infrastructure::auth::MockAuthAdapter)
  pub fn mock_settings(&self) -> Result<MockAuthSettings, ConfigError> {
    Ok(MockAuthSettings {
      delays: self.mock.delays(),
      session_ttl: self.session_ttl()?,
      refresh_token_policy: self.auth.refresh_token_policy,
    })
  }
}
