use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::auth::errors::TransportError;
use crate::domain::user::entities::{NewUser, User, UserUpdate};
use crate::domain::user::errors::UserError;
use crate::domain::user::ports::UserPort;

/// User management adapter backed by the `{base_url}/users` REST resource
pub struct HttpUserAdapter {
  client: Client,
  base_url: String,
}

impl HttpUserAdapter {
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UserError> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self::with_client(client, base_url))
  }

  /// Builds the adapter around an already configured client
  pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
    Self {
      client,
      base_url: base_url.into().trim_end_matches('/').to_string(),
    }
  }

  fn collection_url(&self) -> String {
    format!("{}/users", self.base_url)
  }

  fn item_url(&self, id: &str) -> String {
    format!("{}/users/{}", self.base_url, id)
  }

  /// Sends the request; a non-success status is returned as the error
  async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, TransportError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    let url = response.url().to_string();
    let message = response.text().await.unwrap_or_default();
    tracing::warn!("{} failed with {}", url, status);
    Err(TransportError::from_status(status.as_u16(), message))
  }

  async fn send_for<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, UserError> {
    let response = self.send(request).await?;
    Ok(decode(response).await?)
  }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
  response
    .json()
    .await
    .map_err(|e| TransportError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl UserPort for HttpUserAdapter {
  async fn get_all(&self) -> Result<Vec<User>, UserError> {
    tracing::debug!("Listing users");
    self.send_for(self.client.get(self.collection_url())).await
  }

  async fn get_by_id(&self, id: &str) -> Result<Option<User>, UserError> {
    let response = self.client.get(self.item_url(id)).send().await?;

    if response.status() == StatusCode::NOT_FOUND {
      tracing::debug!("User {} not found", id);
      return Ok(None);
    }
    if !response.status().is_success() {
      let status = response.status().as_u16();
      let message = response.text().await.unwrap_or_default();
      return Err(TransportError::from_status(status, message).into());
    }

    Ok(Some(decode(response).await?))
  }

  async fn create(&self, user: &NewUser) -> Result<User, UserError> {
    self
      .send_for(self.client.post(self.collection_url()).json(user))
      .await
  }

  async fn update(&self, id: &str, changes: &UserUpdate) -> Result<User, UserError> {
    self
      .send_for(self.client.put(self.item_url(id)).json(changes))
      .await
  }

  async fn delete(&self, id: &str) -> Result<bool, UserError> {
    self.send(self.client.delete(self.item_url(id))).await?;
    tracing::info!("Deleted user {}", id);
    Ok(true)
  }
}
