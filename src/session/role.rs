//! Role derivation.
//!
//! The backend only sends an `is_recruiter` flag. The role is computed from it
//! client-side and never read from the payload verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::api::RawUser;

/// UI-facing role of an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    JobSeeker,
    Recruiter,
    /// Representable for role-gated checks, but never produced by [`derive_role`]:
    /// the backend payload has no field that identifies an admin.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::JobSeeker => "job_seeker",
            Role::Recruiter => "recruiter",
            Role::Admin => "admin",
        }
    }

    /// Human-readable label, e.g. `JOB SEEKER`
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}' (expected job_seeker, recruiter or admin)")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "job_seeker" | "jobseeker" | "seeker" => Ok(Role::JobSeeker),
            "recruiter" => Ok(Role::Recruiter),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// `recruiter` iff `is_recruiter` is `true`; `job_seeker` when false or absent
pub fn derive_role(raw: &RawUser) -> Role {
    if raw.is_recruiter == Some(true) {
        Role::Recruiter
    } else {
        Role::JobSeeker
    }
}
