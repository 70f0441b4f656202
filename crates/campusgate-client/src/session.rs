// Auth session manager
//
// Owns the in-memory (token, user, role) triple and the one-shot startup
// hydration that reconciles it with durable storage and a live profile
// fetch. Memory is authoritative after hydration; durable storage is the
// mirror it was rebuilt from.
//
// Hydration never surfaces an error. Every failure resolves to either
// "keep operating on cached data" or "silently log out":
// - profile fetch 401            => full logout, cached data notwithstanding
// - other failure, cached user   => keep the stale profile
// - other failure, no cache      => full logout

use std::sync::{Arc, Mutex};

use campusgate_core::{decode_role_claim, UserProfile};
use tracing::{debug, warn};

use crate::api;
use crate::gate::AuthSnapshot;
use crate::http::ApiClient;
use crate::store::SessionStore;

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<UserProfile>,
    role: Option<String>,
    loading: bool,
}

/// Cloneable handle to the shared session. One instance is created at the
/// composition root and handed to everything that needs it.
#[derive(Clone)]
pub struct AuthSession {
    state: Arc<Mutex<SessionState>>,
    store: Arc<dyn SessionStore>,
}

impl AuthSession {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                loading: true,
                ..SessionState::default()
            })),
            store,
        }
    }

    /// Rebuild session state from durable storage and reconcile it with a
    /// live profile fetch. Runs once per process start; later calls are
    /// no-ops.
    pub async fn hydrate(&self, client: &ApiClient) {
        {
            let state = self.state.lock().unwrap();
            if !state.loading {
                return;
            }
        }

        let stored = self.store.load();

        let Some(token) = stored.token else {
            debug!("no stored token, starting unauthenticated");
            self.finish_loading();
            return;
        };

        // Adopt the token right away so isAuthenticated flips immediately;
        // the profile refresh below can still tear everything down.
        let mut role = stored.role;
        if role.is_none() {
            match decode_role_claim(&token) {
                Some(decoded) => {
                    debug!(role = %decoded, "recovered role from token claim");
                    self.store.save_role(&decoded);
                    role = Some(decoded);
                }
                None => debug!("could not decode role from token, continuing without"),
            }
        }

        let had_cached_user = stored.user.is_some();
        {
            let mut state = self.state.lock().unwrap();
            state.token = Some(token);
            state.role = role;
            state.user = stored.user;
        }

        match api::auth::get_profile(client).await {
            Ok(profile) => {
                debug!("profile refreshed");
                self.store.save_user(&profile);
                self.state.lock().unwrap().user = Some(profile);
            }
            Err(e) if e.is_auth_expired() => {
                warn!("stored token rejected, clearing session");
                self.logout();
            }
            Err(e) => {
                if had_cached_user {
                    // Backend unreachable or erroring: operate on stale data
                    warn!(error = %e.message(), "profile refresh failed, using cached profile");
                } else {
                    warn!(error = %e.message(), "profile refresh failed with no cached profile, clearing session");
                    self.logout();
                }
            }
        }

        self.finish_loading();
    }

    /// Adopt a fresh session. The caller has already authenticated against
    /// the backend; this only persists and publishes the result.
    pub fn login(&self, token: &str, user: &UserProfile, role: &str) {
        self.store.save(token, user, role);
        let mut state = self.state.lock().unwrap();
        state.token = Some(token.to_string());
        state.user = Some(user.clone());
        state.role = Some(role.to_string());
    }

    /// Drop the session from memory and durable storage. No network call.
    pub fn logout(&self) {
        self.store.clear();
        let mut state = self.state.lock().unwrap();
        state.token = None;
        state.user = None;
        state.role = None;
    }

    /// True iff an in-memory token is set. Durable storage is not consulted.
    pub fn is_authenticated(&self) -> bool {
        self.state.lock().unwrap().token.is_some()
    }

    pub fn loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    pub fn token(&self) -> Option<String> {
        self.state.lock().unwrap().token.clone()
    }

    pub fn role(&self) -> Option<String> {
        self.state.lock().unwrap().role.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.lock().unwrap().user.clone()
    }

    /// Point-in-time view for route decisions.
    pub fn snapshot(&self) -> AuthSnapshot {
        let state = self.state.lock().unwrap();
        AuthSnapshot {
            loading: state.loading,
            token: state.token.clone(),
            role: state.role.clone(),
        }
    }

    fn finish_loading(&self) {
        self.state.lock().unwrap().loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile(name: &str) -> UserProfile {
        serde_json::from_value(json!({ "name": name })).unwrap()
    }

    fn wired(store: Arc<MemorySessionStore>, base_url: &str) -> (AuthSession, ApiClient) {
        let session = AuthSession::new(store.clone());
        let hook_session = session.clone();
        let client = ApiClient::new(base_url, store)
            .with_auth_expired_hook(Arc::new(move || hook_session.logout()));
        (session, client)
    }

    async fn mock_profile_ok(server: &MockServer, name: &str) {
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"name": name}})),
            )
            .mount(server)
            .await;
    }

    async fn mock_profile_status(server: &MockServer, status: u16) {
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(status))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_no_token_hydrates_unauthenticated() {
        let server = MockServer::start().await;
        let store = Arc::new(MemorySessionStore::new());
        let (session, client) = wired(store, &server.uri());

        assert!(session.loading());
        session.hydrate(&client).await;

        assert!(!session.loading());
        assert!(!session.is_authenticated());
        // No profile call should have been made
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_hydration_refreshes_profile() {
        let server = MockServer::start().await;
        mock_profile_ok(&server, "Fresh Alice").await;

        let store = Arc::new(MemorySessionStore::new());
        store.save("tok1", &profile("Stale Alice"), "user");
        let (session, client) = wired(store.clone(), &server.uri());

        session.hydrate(&client).await;

        assert!(session.is_authenticated());
        assert!(!session.loading());
        assert_eq!(session.user().unwrap().name.as_deref(), Some("Fresh Alice"));
        assert_eq!(session.role().as_deref(), Some("user"));
        // Fresh profile persisted back to durable storage
        assert_eq!(
            store.load().user.unwrap().name.as_deref(),
            Some("Fresh Alice")
        );
    }

    #[tokio::test]
    async fn test_hydration_recovers_role_from_token() {
        let server = MockServer::start().await;
        mock_profile_ok(&server, "Gatekeeper").await;

        // Token payload decodes to {"role":"gate"}; no role key stored
        let store = Arc::new(MemorySessionStore::seeded(crate::store::StoredSession {
            token: Some("abc.eyJyb2xlIjoiZ2F0ZSJ9.sig".to_string()),
            user: Some(profile("Gatekeeper")),
            role: None,
        }));
        let (session, client) = wired(store.clone(), &server.uri());

        session.hydrate(&client).await;

        assert_eq!(session.role().as_deref(), Some("gate"));
        // The recovered role was written back to durable storage
        assert_eq!(store.load().role.as_deref(), Some("gate"));
    }

    #[tokio::test]
    async fn test_hydration_401_logs_out_despite_cache() {
        let server = MockServer::start().await;
        mock_profile_status(&server, 401).await;

        let store = Arc::new(MemorySessionStore::new());
        store.save("tok1", &profile("Alice"), "user");
        let (session, client) = wired(store.clone(), &server.uri());

        session.hydrate(&client).await;

        assert!(!session.is_authenticated());
        assert!(!session.loading());
        assert!(session.user().is_none());
        assert!(store.load().token.is_none());
    }

    #[tokio::test]
    async fn test_hydration_degrades_to_cached_user_on_500() {
        let server = MockServer::start().await;
        mock_profile_status(&server, 500).await;

        let store = Arc::new(MemorySessionStore::new());
        store.save("tok1", &profile("Cached Alice"), "user");
        let (session, client) = wired(store.clone(), &server.uri());

        session.hydrate(&client).await;

        // Stale data, still signed in
        assert!(session.is_authenticated());
        assert_eq!(
            session.user().unwrap().name.as_deref(),
            Some("Cached Alice")
        );
        assert_eq!(store.load().token.as_deref(), Some("tok1"));
    }

    #[tokio::test]
    async fn test_hydration_500_without_cache_logs_out() {
        let server = MockServer::start().await;
        mock_profile_status(&server, 500).await;

        // Token decodes to {"role":"gate"} but there is no cached user:
        // the role recovered in the decode step must not survive teardown
        let store = Arc::new(MemorySessionStore::seeded(crate::store::StoredSession {
            token: Some("abc.eyJyb2xlIjoiZ2F0ZSJ9.sig".to_string()),
            user: None,
            role: None,
        }));
        let (session, client) = wired(store.clone(), &server.uri());

        session.hydrate(&client).await;

        assert!(!session.is_authenticated());
        assert!(!session.loading());
        assert!(session.role().is_none());
        assert!(store.load().token.is_none());
        assert!(store.load().role.is_none());
    }

    #[tokio::test]
    async fn test_login_adopts_and_persists() {
        let server = MockServer::start().await;
        let store = Arc::new(MemorySessionStore::new());
        let (session, _client) = wired(store.clone(), &server.uri());

        session.login("tok1", &profile("Alice"), "user");

        assert!(session.is_authenticated());
        assert_eq!(session.role().as_deref(), Some("user"));
        let stored = store.load();
        assert_eq!(stored.token.as_deref(), Some("tok1"));
        assert_eq!(stored.role.as_deref(), Some("user"));
        assert_eq!(stored.user.unwrap().name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_authentication_tracks_token_only() {
        let server = MockServer::start().await;
        let store = Arc::new(MemorySessionStore::new());
        let (session, _client) = wired(store, &server.uri());

        assert!(!session.is_authenticated());
        session.login("tok1", &UserProfile::default(), "user");
        assert!(session.is_authenticated());
        session.logout();
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_hydrate_runs_once() {
        let server = MockServer::start().await;
        mock_profile_ok(&server, "Alice").await;

        let store = Arc::new(MemorySessionStore::new());
        store.save("tok1", &profile("Alice"), "user");
        let (session, client) = wired(store, &server.uri());

        session.hydrate(&client).await;
        session.hydrate(&client).await;

        // Only the first call issued a profile fetch
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}
