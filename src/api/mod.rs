//! Job-board API access.
//!
//! - [`ApiClient`] - reqwest client with a default bearer credential
//! - [`AuthApi`] - the slice of the API the session manager depends on
//! - wire models for login, registration and profile updates

mod client;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use error::{ApiError, ErrorCode};
pub use models::{AuthResponse, Id, LoginRequest, ProfileUpdate, RawUser, RegisterRequest};

use async_trait::async_trait;

/// Credential handling and profile lookup used by the session manager.
///
/// `set_bearer` / `clear_bearer` change the default credential attached to every
/// subsequent request made through the same client.
#[async_trait]
pub trait AuthApi: Send + Sync {
    fn set_bearer(&self, token: &str);

    fn clear_bearer(&self);

    /// `GET /current_user` with the current bearer credential
    async fn current_user(&self) -> Result<RawUser, ApiError>;
}
