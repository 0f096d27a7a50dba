use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use authcore::{
  application::auth::{
    GetCurrentUserUseCase, LoginUserCommand, LoginUserUseCase, LogoutUserUseCase,
    RefreshSessionCommand, RefreshSessionUseCase,
  },
  application::user::GetUsersUseCase,
  domain::auth::{AuthPort, AuthenticatedUser},
  infrastructure::{auth::AuthPortFactory, config::Config, user::HttpUserAdapter},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "authcore=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting authcore");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!(
    "Configuration loaded: {:?} adapter, {:?} session store",
    config.auth.adapter,
    config.session_store.backend
  );

  let args: Vec<String> = std::env::args().skip(1).collect();

  if args.iter().any(|arg| arg == "--users") {
    let user_port = HttpUserAdapter::new(
      config.http.base_url.clone(),
      Duration::from_secs(config.http.timeout_seconds),
    )?;
    let users = GetUsersUseCase::new(Arc::new(user_port)).execute().await?;
    for user in &users {
      tracing::info!("{} {} <{}>", user.id, user.name, user.email);
    }
    tracing::info!("{} users listed", users.len());
    return Ok(());
  }

  let auth_port = AuthPortFactory::create(&config)
    .await
    .context("Failed to build authentication adapter")?;

  if args.iter().any(|arg| arg == "--logout") {
    LogoutUserUseCase::new(auth_port).execute().await?;
    tracing::info!("Session closed");
    return Ok(());
  }

  let user = establish_session(auth_port.clone(), &config).await?;
  tracing::info!(
    "Signed in as {} <{}>, session valid for {} seconds",
    user.display_name(),
    user.email(),
    user.time_until_expiration().num_seconds()
  );

  let refreshed = RefreshSessionUseCase::new(auth_port)
    .execute(RefreshSessionCommand {
      refresh_token: user.refresh_token().to_string(),
    })
    .await?;
  tracing::info!("Session refreshed, expires at {}", refreshed.expires_at());

  Ok(())
}

/// Restores the stored session or logs in with the demo credentials
async fn establish_session(
  auth_port: Arc<dyn AuthPort>,
  config: &Config,
) -> anyhow::Result<AuthenticatedUser> {
  if let Some(user) = GetCurrentUserUseCase::new(auth_port.clone()).execute().await? {
    tracing::info!("Restored stored session");
    return Ok(user);
  }

  tracing::info!("No stored session, logging in as {}", config.demo.email);
  let user = LoginUserUseCase::new(auth_port)
    .execute(LoginUserCommand {
      email: config.demo.email.clone(),
      password: config.demo.password.clone(),
      remember_me: false,
    })
    .await?;

  Ok(user)
}
