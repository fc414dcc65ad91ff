//! HTTP client for the job-board API.
//!
//! A single [`ApiClient`] is shared by the whole process. The bearer credential is a
//! process-wide default: once set, it is attached to every request until cleared.

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::models::{decode_payload, AuthResponse, Id, LoginRequest, ProfileUpdate, RawUser, RegisterRequest};
use super::{ApiError, AuthApi};
use crate::config::ApiConfig;

/// reqwest-backed API client with a swappable default bearer token
pub struct ApiClient {
    base_url: String,
    client: Client,
    bearer: ArcSwapOption<String>,
}

impl ApiClient {
    /// Create a client for the configured base URL
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(format!("jobboard/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            bearer: ArcSwapOption::empty(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a bearer credential is currently attached to outgoing requests
    pub fn has_bearer(&self) -> bool {
        self.bearer.load().is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(token) = self.bearer.load_full() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidToken)?;
            builder = builder.header(AUTHORIZATION, value);
        }
        Ok(builder)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(status = %status, "API request failed");
            return Err(ApiError::from_response(status, &body));
        }

        decode_payload(&body)
    }

    /// Exchange credentials for a token and profile
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let builder = self.request(Method::POST, "auth/login")?.json(credentials);
        self.send(builder).await
    }

    /// Create an account; the backend logs the new user in immediately
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let builder = self.request(Method::POST, "auth/register")?.json(request);
        self.send(builder).await
    }

    /// Update profile fields of a user and return the stored profile
    pub async fn update_user(&self, id: Id, update: &ProfileUpdate) -> Result<RawUser, ApiError> {
        let builder = self
            .request(Method::PATCH, &format!("users/{}", id))?
            .json(update);
        self.send(builder).await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    fn set_bearer(&self, token: &str) {
        self.bearer.store(Some(Arc::new(token.to_string())));
    }

    fn clear_bearer(&self) {
        self.bearer.store(None);
    }

    async fn current_user(&self) -> Result<RawUser, ApiError> {
        let builder = self.request(Method::GET, "current_user")?;
        self.send(builder).await
    }
}
