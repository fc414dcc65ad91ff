//! Client-side session state.
//!
//! [`SessionManager`] is the single source of truth for who is logged in. It:
//! - restores the session at startup from the persisted token ([`SessionManager::bootstrap`])
//! - applies login, logout and profile updates
//! - publishes every transition on a `watch` channel so consumers react to changes
//!   instead of polling
//!
//! Lifecycle: `Uninitialized -> Loading -> Ready`. Only a new `bootstrap()` moves a
//! `Ready` session back to `Loading`.

pub mod guard;
pub mod role;

pub use guard::{authorize, landing_route, Access};
pub use role::{derive_role, ParseRoleError, Role};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::{AuthApi, Id, RawUser};
use crate::store::TokenStore;

/// Lifecycle phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Uninitialized,
    Loading,
    Ready,
}

/// Authenticated user as seen by consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub role: Role,
    /// Only meaningful for recruiters
    pub company_id: Option<Id>,
}

impl User {
    pub fn from_raw(raw: RawUser) -> Self {
        let role = derive_role(&raw);
        Self {
            id: raw.id,
            username: raw.username,
            email: raw.email,
            role,
            company_id: raw.company_id,
        }
    }
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        Self::from_raw(raw)
    }
}

/// Snapshot of the session.
///
/// `current_user` and `token` are always both set or both empty.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub current_user: Option<User>,
    pub token: Option<String>,
    pub status: SessionStatus,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.status == SessionStatus::Ready
    }

    fn clear(&mut self) -> bool {
        let had_session = self.current_user.is_some() || self.token.is_some();
        self.current_user = None;
        self.token = None;
        had_session
    }
}

// Tokens stay out of logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("current_user", &self.current_user)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("status", &self.status)
            .finish()
    }
}

/// Owner of the session state
pub struct SessionManager {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn TokenStore>,
    token_key: String,
    state: watch::Sender<Session>,
    teardown: CancellationToken,
}

impl SessionManager {
    /// Create an uninitialized manager; call [`bootstrap`](Self::bootstrap) once at startup
    pub fn new(
        api: Arc<dyn AuthApi>,
        store: Arc<dyn TokenStore>,
        token_key: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            api,
            store,
            token_key: token_key.into(),
            state,
            teardown: CancellationToken::new(),
        }
    }

    /// Restore the session from the persisted token.
    ///
    /// Never fails: a missing token, a rejected token, a transport error or an
    /// unreadable profile all end in `Ready` with nobody logged in. If
    /// [`teardown`](Self::teardown) is called while the profile fetch is in flight, the
    /// result is discarded and nothing is written.
    pub async fn bootstrap(&self) {
        if self.is_torn_down() {
            debug!("Session manager torn down; skipping bootstrap");
            return;
        }

        self.state.send_modify(|s| s.status = SessionStatus::Loading);

        let stored = match self.store.get(&self.token_key) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token, starting logged out");
                self.remove_persisted_token();
                None
            }
        };

        let token = match stored {
            Some(token) if !token.trim().is_empty() => token,
            Some(_) => {
                debug!("Discarding empty stored token");
                self.remove_persisted_token();
                self.finish_logged_out();
                return;
            }
            None => {
                debug!("No stored token");
                self.finish_logged_out();
                return;
            }
        };

        self.api.set_bearer(&token);

        let outcome = tokio::select! {
            biased;
            _ = self.teardown.cancelled() => {
                debug!("Torn down during bootstrap, discarding profile fetch");
                self.api.clear_bearer();
                return;
            }
            result = self.api.current_user() => result,
        };

        if self.is_torn_down() {
            debug!("Torn down during bootstrap, discarding profile fetch");
            self.api.clear_bearer();
            return;
        }

        match outcome {
            Ok(raw) => {
                let user = User::from_raw(raw);
                info!(user_id = user.id, role = %user.role, "Session restored");
                self.state.send_modify(|s| {
                    s.current_user = Some(user);
                    s.token = Some(token);
                    s.status = SessionStatus::Ready;
                });
            }
            Err(e) => {
                warn!(code = e.code().as_str(), error = %e, "Stored token rejected, logging out");
                self.remove_persisted_token();
                self.api.clear_bearer();
                self.state.send_modify(|s| {
                    s.clear();
                    s.status = SessionStatus::Ready;
                });
            }
        }
    }

    /// Start an authenticated session from a successful login response.
    ///
    /// The caller has already authenticated; the payload is not validated here.
    pub fn login(&self, raw: RawUser, token: impl Into<String>) {
        let token = token.into();
        if let Err(e) = self.store.set(&self.token_key, &token) {
            warn!(error = %e, "Failed to persist token; session will not survive a restart");
        }

        let user = User::from_raw(raw);
        info!(user_id = user.id, role = %user.role, "User logged in");

        self.api.set_bearer(&token);
        self.state.send_modify(|s| {
            s.current_user = Some(user);
            s.token = Some(token);
            s.status = SessionStatus::Ready;
        });
    }

    /// End the session. Calling it while logged out is a no-op.
    pub fn logout(&self) {
        self.remove_persisted_token();
        self.api.clear_bearer();

        if self.state.send_if_modified(Session::clear) {
            info!("User logged out");
        } else {
            debug!("Logout requested with no active session");
        }
    }

    /// Replace the current user after a profile edit.
    ///
    /// `None` ends the session like a logout. `Some` is ignored when nobody is
    /// logged in, since a user without a token would be an invalid session.
    pub fn set_user(&self, user: Option<User>) {
        match user {
            Some(user) => {
                let user_id = user.id;
                let updated = self.state.send_if_modified(move |s| {
                    if s.token.is_none() {
                        return false;
                    }
                    s.current_user = Some(user);
                    true
                });
                if updated {
                    debug!(user_id, "Current user replaced");
                } else {
                    warn!(user_id, "Ignoring user update without an active session");
                }
            }
            None => {
                self.remove_persisted_token();
                self.api.clear_bearer();
                if self.state.send_if_modified(Session::clear) {
                    info!("Session cleared by user update");
                }
            }
        }
    }

    /// Stop applying results of in-flight work. Irreversible.
    pub fn teardown(&self) {
        if !self.teardown.is_cancelled() {
            debug!("Session manager torn down");
        }
        self.teardown.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.teardown.is_cancelled()
    }

    /// Receive every subsequent session transition
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().current_user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    fn finish_logged_out(&self) {
        self.state.send_modify(|s| {
            s.clear();
            s.status = SessionStatus::Ready;
        });
    }

    fn remove_persisted_token(&self) {
        if let Err(e) = self.store.remove(&self.token_key) {
            warn!(error = %e, "Failed to remove stored token");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::store::{FileStore, MemoryStore};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;
    use tokio_test::{assert_pending, assert_ready};

    #[derive(Clone)]
    enum Reply {
        User(RawUser),
        Status(u16),
        Malformed,
    }

    /// Scripted API: counts profile fetches and records the bearer they saw
    #[derive(Default)]
    struct StubApi {
        reply: Mutex<Option<Reply>>,
        calls: AtomicUsize,
        bearer: Mutex<Option<String>>,
        seen_bearer: Mutex<Option<String>>,
        gate: Option<Arc<Notify>>,
    }

    impl StubApi {
        fn replying(reply: Reply) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                ..Default::default()
            }
        }

        fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn bearer(&self) -> Option<String> {
            self.bearer.lock().clone()
        }
    }

    #[async_trait]
    impl AuthApi for StubApi {
        fn set_bearer(&self, token: &str) {
            *self.bearer.lock() = Some(token.to_string());
        }

        fn clear_bearer(&self) {
            *self.bearer.lock() = None;
        }

        async fn current_user(&self) -> Result<RawUser, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let bearer = self.bearer.lock().clone();
            *self.seen_bearer.lock() = bearer;

            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            let reply = self.reply.lock().clone();
            match reply {
                Some(Reply::User(user)) => Ok(user),
                Some(Reply::Status(code)) => Err(ApiError::from_response(
                    StatusCode::from_u16(code).unwrap(),
                    r#"{"msg": "Token has expired"}"#,
                )),
                Some(Reply::Malformed) | None => {
                    Err(ApiError::Decode("missing field `username`".to_string()))
                }
            }
        }
    }

    fn ana() -> RawUser {
        RawUser {
            id: 7,
            username: "ana".to_string(),
            email: "a@x.com".to_string(),
            is_recruiter: Some(true),
            company_id: Some(3),
        }
    }

    fn bob() -> RawUser {
        RawUser {
            id: 1,
            username: "bob".to_string(),
            email: "b@x.com".to_string(),
            is_recruiter: Some(false),
            company_id: None,
        }
    }

    fn manager(api: &Arc<StubApi>, store: &Arc<MemoryStore>) -> SessionManager {
        SessionManager::new(api.clone(), store.clone(), "token")
    }

    fn assert_consistent(session: &Session) {
        assert_eq!(
            session.current_user.is_some(),
            session.token.is_some(),
            "user/token mismatch in {:?}",
            session
        );
    }

    #[test]
    fn test_new_manager_is_uninitialized() {
        let api = Arc::new(StubApi::default());
        let store = Arc::new(MemoryStore::new());
        let manager = manager(&api, &store);

        assert_eq!(manager.status(), SessionStatus::Uninitialized);
        assert!(!manager.is_authenticated());
        assert_eq!(manager.token(), None);
    }

    #[tokio::test]
    async fn test_bootstrap_without_token() {
        let api = Arc::new(StubApi::default());
        let store = Arc::new(MemoryStore::new());
        let manager = manager(&api, &store);

        manager.bootstrap().await;

        let session = manager.snapshot();
        assert_eq!(session.status, SessionStatus::Ready);
        assert_eq!(session.current_user, None);
        assert_eq!(session.token, None);
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_with_empty_token_purges_it() {
        let api = Arc::new(StubApi::default());
        let store = Arc::new(MemoryStore::with_entry("token", "  "));
        let manager = manager(&api, &store);

        manager.bootstrap().await;

        assert_eq!(manager.status(), SessionStatus::Ready);
        assert!(!manager.is_authenticated());
        assert_eq!(api.calls(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_with_valid_token() {
        let api = Arc::new(StubApi::replying(Reply::User(ana())));
        let store = Arc::new(MemoryStore::with_entry("token", "T"));
        let manager = manager(&api, &store);

        manager.bootstrap().await;

        assert_eq!(manager.status(), SessionStatus::Ready);
        assert_eq!(manager.token().as_deref(), Some("T"));
        assert_eq!(
            manager.current_user(),
            Some(User {
                id: 7,
                username: "ana".to_string(),
                email: "a@x.com".to_string(),
                role: Role::Recruiter,
                company_id: Some(3),
            })
        );
        assert_eq!(api.calls(), 1);
        assert_eq!(api.seen_bearer.lock().as_deref(), Some("T"));
        assert_eq!(api.bearer().as_deref(), Some("T"));
        assert_eq!(store.get("token").unwrap().as_deref(), Some("T"));
    }

    #[tokio::test]
    async fn test_bootstrap_with_rejected_token() {
        let api = Arc::new(StubApi::replying(Reply::Status(401)));
        let store = Arc::new(MemoryStore::with_entry("token", "T"));
        let manager = manager(&api, &store);

        manager.bootstrap().await;

        assert_eq!(manager.status(), SessionStatus::Ready);
        assert_eq!(manager.current_user(), None);
        assert_eq!(manager.token(), None);
        assert_eq!(store.get("token").unwrap(), None);
        assert_eq!(api.bearer(), None);
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn test_bootstrap_with_malformed_profile_fails_closed() {
        let api = Arc::new(StubApi::replying(Reply::Malformed));
        let store = Arc::new(MemoryStore::with_entry("token", "T"));
        let manager = manager(&api, &store);

        manager.bootstrap().await;

        assert!(manager.snapshot().is_ready());
        assert!(!manager.is_authenticated());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_server_error_is_not_retried() {
        let api = Arc::new(StubApi::replying(Reply::Status(503)));
        let store = Arc::new(MemoryStore::with_entry("token", "T"));
        let manager = manager(&api, &store);

        manager.bootstrap().await;

        assert_eq!(api.calls(), 1);
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_bootstrap_publishes_loading_then_ready() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(StubApi::replying(Reply::User(ana())).gated(gate.clone()));
        let store = Arc::new(MemoryStore::with_entry("token", "T"));
        let manager = Arc::new(manager(&api, &store));
        let mut rx = manager.subscribe();

        let task = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.bootstrap().await })
        };

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().status, SessionStatus::Loading);

        gate.notify_one();
        task.await.unwrap();

        rx.changed().await.unwrap();
        let session = rx.borrow_and_update().clone();
        assert!(session.is_ready());
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_transition() {
        let api = Arc::new(StubApi::default());
        let store = Arc::new(MemoryStore::new());
        let manager = manager(&api, &store);
        manager.bootstrap().await;

        manager.login(bob(), "tok123");

        assert_eq!(
            manager.current_user(),
            Some(User {
                id: 1,
                username: "bob".to_string(),
                email: "b@x.com".to_string(),
                role: Role::JobSeeker,
                company_id: None,
            })
        );
        assert_eq!(manager.token().as_deref(), Some("tok123"));
        assert_eq!(manager.status(), SessionStatus::Ready);
        assert_eq!(store.get("token").unwrap().as_deref(), Some("tok123"));
        assert_eq!(api.bearer().as_deref(), Some("tok123"));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let api = Arc::new(StubApi::default());
        let store = Arc::new(MemoryStore::new());
        let manager = manager(&api, &store);
        manager.bootstrap().await;
        manager.login(bob(), "tok123");

        manager.logout();
        let once = manager.snapshot();
        manager.logout();
        let twice = manager.snapshot();

        assert_eq!(once, twice);
        assert_eq!(twice.current_user, None);
        assert_eq!(twice.token, None);
        assert_eq!(twice.status, SessionStatus::Ready);
        assert!(store.is_empty());
        assert_eq!(api.bearer(), None);
    }

    #[tokio::test]
    async fn test_redundant_logout_does_not_notify() {
        let api = Arc::new(StubApi::default());
        let store = Arc::new(MemoryStore::new());
        let manager = manager(&api, &store);
        manager.bootstrap().await;

        let rx = manager.subscribe();
        manager.logout();
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_set_user_replaces_profile() {
        let api = Arc::new(StubApi::default());
        let store = Arc::new(MemoryStore::new());
        let manager = manager(&api, &store);
        manager.bootstrap().await;
        manager.login(bob(), "tok123");

        let mut edited = manager.current_user().unwrap();
        edited.email = "bob@new.com".to_string();
        manager.set_user(Some(edited.clone()));

        assert_eq!(manager.current_user(), Some(edited));
        assert_eq!(manager.token().as_deref(), Some("tok123"));
        assert_eq!(store.get("token").unwrap().as_deref(), Some("tok123"));
    }

    #[tokio::test]
    async fn test_set_user_none_clears_session_and_store() {
        let api = Arc::new(StubApi::default());
        let store = Arc::new(MemoryStore::new());
        let manager = manager(&api, &store);
        manager.bootstrap().await;
        manager.login(bob(), "tok123");

        manager.set_user(None);

        let session = manager.snapshot();
        assert_eq!(session.current_user, None);
        assert_eq!(session.token, None);
        assert!(session.is_ready());
        assert!(store.is_empty());
        assert_eq!(api.bearer(), None);
    }

    #[tokio::test]
    async fn test_set_user_without_session_is_ignored() {
        let api = Arc::new(StubApi::default());
        let store = Arc::new(MemoryStore::new());
        let manager = manager(&api, &store);
        manager.bootstrap().await;

        manager.set_user(Some(User::from_raw(bob())));

        assert!(!manager.is_authenticated());
        assert_consistent(&manager.snapshot());
    }

    #[tokio::test]
    async fn test_user_and_token_stay_paired() {
        let api = Arc::new(StubApi::replying(Reply::Status(401)));
        let store = Arc::new(MemoryStore::with_entry("token", "T"));
        let manager = manager(&api, &store);
        let mut rx = manager.subscribe();

        manager.bootstrap().await;
        assert_consistent(&manager.snapshot());
        manager.login(ana(), "t1");
        assert_consistent(&manager.snapshot());
        manager.set_user(Some(User::from_raw(bob())));
        assert_consistent(&manager.snapshot());
        manager.logout();
        assert_consistent(&manager.snapshot());
        manager.set_user(Some(User::from_raw(bob())));
        assert_consistent(&manager.snapshot());
        manager.login(bob(), "t2");
        manager.set_user(None);
        assert_consistent(&manager.snapshot());

        // The receiver only holds the latest value, which must be consistent too
        assert!(rx.has_changed().unwrap());
        assert_consistent(&rx.borrow_and_update());
    }

    #[tokio::test]
    async fn test_ready_does_not_revert_to_loading() {
        let api = Arc::new(StubApi::default());
        let store = Arc::new(MemoryStore::new());
        let manager = manager(&api, &store);
        manager.bootstrap().await;

        manager.login(bob(), "tok123");
        assert_eq!(manager.status(), SessionStatus::Ready);
        manager.set_user(Some(User::from_raw(bob())));
        assert_eq!(manager.status(), SessionStatus::Ready);
        manager.logout();
        assert_eq!(manager.status(), SessionStatus::Ready);
    }

    #[test]
    fn test_teardown_during_bootstrap_discards_result() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(StubApi::replying(Reply::Status(401)).gated(gate.clone()));
        let store = Arc::new(MemoryStore::with_entry("token", "T"));
        let manager = manager(&api, &store);
        let mut rx = manager.subscribe();

        let mut bootstrap = tokio_test::task::spawn(manager.bootstrap());
        assert_pending!(bootstrap.poll());
        assert_eq!(api.calls(), 1);
        assert_eq!(rx.borrow_and_update().status, SessionStatus::Loading);

        manager.teardown();
        assert!(bootstrap.is_woken());
        assert_ready!(bootstrap.poll());
        drop(bootstrap);
        gate.notify_one();

        // The 401 would have purged the token; nothing may have been written
        assert!(!rx.has_changed().unwrap());
        assert_eq!(manager.status(), SessionStatus::Loading);
        assert_eq!(store.get("token").unwrap().as_deref(), Some("T"));
        assert_eq!(api.bearer(), None);
    }

    #[tokio::test]
    async fn test_teardown_with_spawned_bootstrap() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(StubApi::replying(Reply::User(ana())).gated(gate.clone()));
        let store = Arc::new(MemoryStore::with_entry("token", "T"));
        let manager = Arc::new(manager(&api, &store));

        let task = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.bootstrap().await })
        };
        while api.calls() == 0 {
            tokio::task::yield_now().await;
        }

        manager.teardown();
        gate.notify_one();
        task.await.unwrap();

        assert!(!manager.is_authenticated());
        assert_eq!(manager.status(), SessionStatus::Loading);
        assert_eq!(api.bearer(), None);
    }

    #[tokio::test]
    async fn test_bootstrap_after_teardown_is_noop() {
        let api = Arc::new(StubApi::replying(Reply::User(ana())));
        let store = Arc::new(MemoryStore::with_entry("token", "T"));
        let manager = manager(&api, &store);

        manager.teardown();
        manager.bootstrap().await;

        assert_eq!(manager.status(), SessionStatus::Uninitialized);
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_session_survives_restart_with_file_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let api = Arc::new(StubApi::replying(Reply::User(bob())));
        let first = SessionManager::new(api.clone(), Arc::new(FileStore::new(&path)), "token");
        first.bootstrap().await;
        first.login(bob(), "tok123");

        let second = SessionManager::new(api.clone(), Arc::new(FileStore::new(&path)), "token");
        second.bootstrap().await;
        assert_eq!(second.token().as_deref(), Some("tok123"));
        assert_eq!(second.current_user().map(|u| u.role), Some(Role::JobSeeker));
    }

    #[tokio::test]
    async fn test_corrupt_store_does_not_block_persistence() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let api = Arc::new(StubApi::replying(Reply::User(bob())));
        let first = SessionManager::new(api.clone(), Arc::new(FileStore::new(&path)), "token");
        first.bootstrap().await;
        assert_eq!(first.status(), SessionStatus::Ready);
        assert!(!first.is_authenticated());
        assert_eq!(api.calls(), 0);
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "{not json");

        first.login(bob(), "tok123");
        assert_eq!(FileStore::new(&path).get("token").unwrap().as_deref(), Some("tok123"));

        let second = SessionManager::new(api.clone(), Arc::new(FileStore::new(&path)), "token");
        second.bootstrap().await;
        assert!(second.is_authenticated());
        assert_eq!(second.token().as_deref(), Some("tok123"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session {
            current_user: Some(User::from_raw(bob())),
            token: Some("secret-token".to_string()),
            status: SessionStatus::Ready,
        };
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
