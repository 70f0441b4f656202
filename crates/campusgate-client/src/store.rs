// Durable session persistence
//
// Exactly three keys survive a restart: token, user (as a serialized
// record), and role. No business logic lives here, and no failure escapes:
// a corrupt entry is dropped and logged, an unwritable file is logged and
// ignored. Durable storage is the source the session manager rehydrates
// from at startup.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use campusgate_core::UserProfile;
use tracing::{debug, warn};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";
const ROLE_KEY: &str = "role";

/// Snapshot of what durable storage currently holds. Any key may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredSession {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub role: Option<String>,
}

/// Persistence seam for the (token, user, role) triple.
pub trait SessionStore: Send + Sync {
    /// Write all three keys at once (successful login).
    fn save(&self, token: &str, user: &UserProfile, role: &str);

    /// Read whatever is present. Never fails; corrupt entries come back
    /// absent and are removed.
    fn load(&self) -> StoredSession;

    /// Update the cached profile alone (background refresh).
    fn save_user(&self, user: &UserProfile);

    /// Update the role alone (recovered from a token claim).
    fn save_role(&self, role: &str);

    /// Remove all three keys.
    fn clear(&self);

    /// Current token, if any. Consulted per request by the HTTP layer.
    fn token(&self) -> Option<String> {
        self.load().token
    }
}

/// File-backed store: one JSON object holding the three keys, the `user`
/// value kept as a serialized string so a corrupt record is representable
/// and recoverable-from.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store sessions in `session.json` under the given state directory.
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            path: state_dir.as_ref().join("session.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> serde_json::Map<String, serde_json::Value> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return serde_json::Map::new(),
        };
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => {
                warn!(path = %self.path.display(), "session file is not a JSON object, ignoring");
                serde_json::Map::new()
            }
        }
    }

    fn write_entries(&self, entries: &serde_json::Map<String, serde_json::Value>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(error = %e, "failed to create session state directory");
                return;
            }
        }
        let text = serde_json::Value::Object(entries.clone()).to_string();
        if let Err(e) = fs::write(&self.path, text) {
            warn!(error = %e, path = %self.path.display(), "failed to persist session");
        }
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, token: &str, user: &UserProfile, role: &str) {
        let mut entries = serde_json::Map::new();
        entries.insert(TOKEN_KEY.into(), token.into());
        match serde_json::to_string(user) {
            Ok(serialized) => {
                entries.insert(USER_KEY.into(), serialized.into());
            }
            Err(e) => warn!(error = %e, "failed to serialize user profile"),
        }
        entries.insert(ROLE_KEY.into(), role.into());
        self.write_entries(&entries);
    }

    fn load(&self) -> StoredSession {
        let mut entries = self.read_entries();

        let token = entries
            .get(TOKEN_KEY)
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let role = entries
            .get(ROLE_KEY)
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let mut user = None;
        if let Some(raw) = entries.get(USER_KEY) {
            let parsed = raw
                .as_str()
                .and_then(|s| serde_json::from_str::<UserProfile>(s).ok());
            match parsed {
                Some(profile) => user = Some(profile),
                None => {
                    // Drop the corrupt entry so the next load is clean
                    warn!("cached user record is corrupt, removing it");
                    entries.remove(USER_KEY);
                    self.write_entries(&entries);
                }
            }
        }

        StoredSession { token, user, role }
    }

    fn save_user(&self, user: &UserProfile) {
        let serialized = match serde_json::to_string(user) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to serialize user profile");
                return;
            }
        };
        let mut entries = self.read_entries();
        entries.insert(USER_KEY.into(), serialized.into());
        self.write_entries(&entries);
    }

    fn save_role(&self, role: &str) {
        let mut entries = self.read_entries();
        entries.insert(ROLE_KEY.into(), role.into());
        self.write_entries(&entries);
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "session cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, "failed to remove session file"),
        }
    }
}

/// In-memory store for tests and ephemeral use.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<StoredSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a specific stored state. Lets tests set up partial
    /// sessions (e.g. a token with no role key) directly.
    pub fn seeded(initial: StoredSession) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, token: &str, user: &UserProfile, role: &str) {
        let mut inner = self.inner.lock().unwrap();
        *inner = StoredSession {
            token: Some(token.to_string()),
            user: Some(user.clone()),
            role: Some(role.to_string()),
        };
    }

    fn load(&self) -> StoredSession {
        self.inner.lock().unwrap().clone()
    }

    fn save_user(&self, user: &UserProfile) {
        self.inner.lock().unwrap().user = Some(user.clone());
    }

    fn save_role(&self, role: &str) {
        self.inner.lock().unwrap().role = Some(role.to_string());
    }

    fn clear(&self) {
        *self.inner.lock().unwrap() = StoredSession::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> UserProfile {
        serde_json::from_value(serde_json::json!({ "name": name })).unwrap()
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        store.save("tok1", &profile("Alice"), "user");
        let loaded = store.load();
        assert_eq!(loaded.token.as_deref(), Some("tok1"));
        assert_eq!(loaded.role.as_deref(), Some("user"));
        assert_eq!(loaded.user.unwrap().name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        store.save("tok1", &profile("Alice"), "gate");

        let first = store.load();
        let second = store.load();
        assert_eq!(first, second);

        // Also idempotent when nothing is stored
        store.clear();
        assert_eq!(store.load(), store.load());
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        let loaded = store.load();
        assert!(loaded.token.is_none());
        assert!(loaded.user.is_none());
        assert!(loaded.role.is_none());
    }

    #[test]
    fn test_corrupt_user_entry_dropped_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        // Hand-write a session file whose user value is not valid JSON
        fs::write(
            store.path(),
            r#"{"token":"tok1","user":"{not-json","role":"user"}"#,
        )
        .unwrap();

        let loaded = store.load();
        assert_eq!(loaded.token.as_deref(), Some("tok1"));
        assert!(loaded.user.is_none());
        assert_eq!(loaded.role.as_deref(), Some("user"));

        // The corrupt entry is gone from disk; token and role survive
        let text = fs::read_to_string(store.path()).unwrap();
        let on_disk: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(on_disk.get("user").is_none());
        assert_eq!(on_disk["token"], "tok1");
    }

    #[test]
    fn test_corrupt_whole_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        fs::write(store.path(), "not json at all").unwrap();

        let loaded = store.load();
        assert!(loaded.token.is_none());
        assert!(loaded.user.is_none());
    }

    #[test]
    fn test_partial_updates() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        store.save("tok1", &profile("Alice"), "user");

        store.save_user(&profile("Alice Updated"));
        let loaded = store.load();
        assert_eq!(loaded.token.as_deref(), Some("tok1"));
        assert_eq!(loaded.user.unwrap().name.as_deref(), Some("Alice Updated"));

        store.save_role("department");
        assert_eq!(store.load().role.as_deref(), Some("department"));
    }

    #[test]
    fn test_clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        store.save("tok1", &profile("Alice"), "user");

        store.clear();
        assert_eq!(store.load(), StoredSession::default());
        assert!(store.token().is_none());

        // Clearing an already-clear store is fine
        store.clear();
    }

    #[test]
    fn test_token_accessor_tracks_store() {
        let store = MemorySessionStore::new();
        assert!(store.token().is_none());
        store.save("tok2", &profile("Bob"), "gate");
        assert_eq!(store.token().as_deref(), Some("tok2"));
        store.clear();
        assert!(store.token().is_none());
    }
}
