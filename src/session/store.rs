//! Session storage backends.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{SessionError, SessionUser};

/// Where the logged-in user is kept between page loads.
///
/// Implementations decide the medium (memory, file, cookie jar, keychain);
/// callers only see load/save/clear.
pub trait SessionStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionError>;
    fn save(&self, user: &SessionUser) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// In-process store; lost on restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: Mutex<Option<SessionUser>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        let guard = self.user.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, user: &SessionUser) -> Result<(), SessionError> {
        let mut guard = self.user.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut guard = self.user.lock().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        Ok(())
    }
}

/// JSON file store; a missing file means nobody is logged in.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling the session is written to before being renamed into place.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let user = serde_json::from_str(&raw)?;
        Ok(Some(user))
    }

    fn save(&self, user: &SessionUser) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(user)?;
        // Readers see either the old session or the new one, never a partial write.
        let staging = self.staging_path();
        std::fs::write(&staging, json)?;
        if let Err(e) = std::fs::rename(&staging, &self.path) {
            let _ = std::fs::remove_file(&staging);
            return Err(e.into());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AccountType;
    use chrono::{TimeZone, Utc};

    fn user() -> SessionUser {
        SessionUser {
            id: "42".into(),
            email: "jan@example.pl".into(),
            account_type: AccountType::Individual,
            display_name: "Jan".into(),
            logged_in_at: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("konto-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(&user()).unwrap();
        assert_eq!(store.load().unwrap(), Some(user()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_round_trip() {
        let store = FileSessionStore::new(temp_path("round-trip"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.save(&user()).unwrap();
        assert_eq!(store.load().unwrap(), Some(user()));
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_save_replaces_whole_file() {
        let store = FileSessionStore::new(temp_path("replace"));
        store.save(&user()).unwrap();
        let mut other = user();
        other.display_name = "Anna".into();
        store.save(&other).unwrap();
        assert_eq!(store.load().unwrap(), Some(other));
        assert!(!store.staging_path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn leftover_staging_file_does_not_affect_session() {
        let store = FileSessionStore::new(temp_path("leftover"));
        std::fs::write(store.staging_path(), "{\"truncated").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.save(&user()).unwrap();
        assert_eq!(store.load().unwrap(), Some(user()));
        assert!(!store.staging_path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn staging_path_is_a_sibling() {
        let store = FileSessionStore::new("/var/lib/konto/session.json");
        assert_eq!(
            store.staging_path(),
            PathBuf::from("/var/lib/konto/session.json.tmp")
        );
    }

    #[test]
    fn file_store_rejects_garbage() {
        let path = temp_path("garbage");
        std::fs::write(&path, "not json").unwrap();
        let store = FileSessionStore::new(&path);
        assert!(matches!(store.load(), Err(SessionError::Format(_))));
        store.clear().unwrap();
    }
}
