//! Consumer-side gating on session state.
//!
//! Nothing here mutates the session. Navigation after login/logout is decided by the
//! consumer from a published snapshot.

use super::{Role, Session, SessionStatus};

/// Outcome of a role-gated check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Session not restored yet; render a loading state, not a verdict
    Loading,
    Unauthenticated,
    /// Authenticated with a role outside the allowed set
    Denied(Role),
    Granted,
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }
}

/// Decide access for `session` to content restricted to `allowed`
pub fn authorize(session: &Session, allowed: &[Role]) -> Access {
    if session.status != SessionStatus::Ready {
        return Access::Loading;
    }
    match &session.current_user {
        None => Access::Unauthenticated,
        Some(user) if allowed.contains(&user.role) => Access::Granted,
        Some(user) => Access::Denied(user.role),
    }
}

/// Where a consumer should land for the given session
pub fn landing_route(session: &Session) -> &'static str {
    if session.status != SessionStatus::Ready {
        return "/loading";
    }
    match session.current_user.as_ref().map(|u| u.role) {
        None => "/login",
        Some(Role::JobSeeker) => "/dashboard/job-seeker",
        Some(Role::Recruiter) => "/dashboard/recruiter",
        Some(Role::Admin) => "/admin",
    }
}
