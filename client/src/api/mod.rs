//! Typed HTTP client for the platform API
//!
//! All endpoints speak JSON over `reqwest` with an `Authorization: <token>`
//! header. Non-2xx responses are mapped to `ClientError` here so the rest
//! of the crate never inspects raw responses.

mod auth;
mod discovery;
mod storage;

pub use auth::{ValidationQuery, ValidationResult};
pub use storage::ReportFile;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use std::time::Duration;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use shared::StatusReport;

/// Client for the platform API server
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

/// Error body returned by the API on failure
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    code: Option<u16>,
}

impl ApiClient {
    /// Create a new ApiClient from configuration
    pub fn new(config: &Config) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.server.timeout_secs))
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            base_url: config.server.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Install the bearer token used for subsequent requests
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    /// Drop the bearer token (logout)
    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }

    /// Current bearer token, if logged in
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request with the auth header attached and map failures to
    /// the client error taxonomy.
    async fn send(&self, request: reqwest::RequestBuilder) -> ClientResult<reqwest::Response> {
        let request = match self.token() {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        };

        let response = request.send().await.map_err(ClientError::Network)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::FORBIDDEN {
            return Err(ClientError::Forbidden);
        }

        let http_code = status.as_u16();
        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        let code = body.code.unwrap_or(http_code);
        if code == 403 {
            return Err(ClientError::Forbidden);
        }

        tracing::warn!(status = http_code, code, "API request failed");
        Err(ClientError::Api {
            status: http_code,
            code,
            message: body
                .message
                .unwrap_or_else(|| format!("Request failed with status {}", http_code)),
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(self.http.get(self.url(path))).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub(crate) async fn get_text(&self, path: &str) -> ClientResult<String> {
        let response = self.send(self.http.get(self.url(path))).await?;
        response
            .text()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        let response = self.send(self.http.get(self.url(path))).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// POST a JSON body where the 200 response is a plain string (the
    /// login/renew endpoints return the raw bearer token)
    pub(crate) async fn post_json_expect_text<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<String> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        response
            .text()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub(crate) async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .send(self.http.request(method, self.url(path)).json(body))
            .await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// DELETE an entity; the API answers 204 with no body
    pub(crate) async fn delete_no_content(&self, path: &str) -> ClientResult<()> {
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    /// Health/status aggregation for the dashboard status indicator
    pub async fn status(&self) -> ClientResult<StatusReport> {
        self.get_json("status").await
    }
}
