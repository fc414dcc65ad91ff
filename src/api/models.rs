//! Wire types exchanged with the job-board API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::ApiError;

/// Numeric identifier used by the backend for users and companies
pub type Id = i64;

/// User profile exactly as the backend sends it.
///
/// Extra fields (`first_name`, `date_joined`, ...) are ignored. A missing or null
/// `is_recruiter` decodes as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    pub id: Id,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_recruiter: Option<bool>,
    #[serde(default)]
    pub company_id: Option<Id>,
}

/// Credentials for `POST /auth/login`; either email or username identifies the account
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password: String,
}

impl LoginRequest {
    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            username: None,
            password: password.into(),
        }
    }

    pub fn with_username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: None,
            username: Some(username.into()),
            password: password.into(),
        }
    }
}

/// Body for `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_recruiter: bool,
    /// Same information as `is_recruiter`, for backends that expect a role string
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<Id>,
}

impl RegisterRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        is_recruiter: bool,
        company_id: Option<Id>,
    ) -> Self {
        let role = if is_recruiter { "recruiter" } else { "job_seeker" };
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            is_recruiter,
            role: role.to_string(),
            company_id,
        }
    }
}

/// Successful login or registration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: RawUser,
}

/// Partial profile for `PATCH /users/{id}`; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<Id>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.company_id.is_none()
    }
}

/// Some endpoints wrap their payload in `{"success", "message", "data"}`, others
/// return it bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Enveloped { data: T },
    Bare(T),
}

/// Decode a success body, unwrapping the envelope when present
pub(crate) fn decode_payload<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    match serde_json::from_str::<Payload<T>>(body) {
        Ok(Payload::Enveloped { data }) | Ok(Payload::Bare(data)) => Ok(data),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}
