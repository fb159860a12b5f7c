//! Typed JSON transport for the invoicing backend.
//!
//! One [`ApiTransport`] is shared by every API client. It owns the reqwest
//! client, prefixes paths with the configured base URL, attaches the bearer
//! token when one is configured and turns non-2xx responses into
//! [`ApiError::Api`] carrying the backend's own message.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiSettings;
use crate::error::ApiError;

/// Error envelope the backend attaches to failure responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Clone)]
pub struct ApiTransport {
    client: Client,
    base_url: String,
    auth_token: Option<Secret<String>>,
}

impl ApiTransport {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            auth_token: settings.auth_token.clone(),
        })
    }

    pub async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::GET, path)).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    /// PATCH without a payload; the backend's state transitions take none.
    pub async fn patch<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::PATCH, path)).await
    }

    /// DELETE, expecting an empty success body.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await?;
        let error = api_error(status, &body);
        tracing::error!(status = %status, message = %error, "Backend request failed");
        Err(error)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder
    }

    async fn execute<T>(&self, builder: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, body = %body, "Backend response");

        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            let error = api_error(status, &body);
            tracing::error!(status = %status, message = %error, "Backend request failed");
            Err(error)
        }
    }
}

/// Build an [`ApiError::Api`] from a failure response, preferring the
/// backend's `message` field so callers can surface it verbatim.
fn api_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("Request failed").to_string()
            } else {
                body.to_string()
            }
        });

    ApiError::Api {
        status: status.as_u16(),
        message,
    }
}
