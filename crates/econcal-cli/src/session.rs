//! Session-scoped flag persistence.
//!
//! The major-only filter survives across invocations in a small JSON state
//! file; the resolved value is always threaded into the normalizer as an
//! explicit parameter. Read failures degrade to "unset".

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const SESSION_ENV: &str = "ECONCAL_SESSION";
const SESSION_FILE: &str = ".econcal-session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    major_only: Option<bool>,
}

/// JSON-file-backed store for session flags.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the store path from `ECONCAL_SESSION`, falling back to a
    /// dotfile in the working directory.
    pub fn from_env() -> Self {
        let path = env::var_os(SESSION_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SESSION_FILE));
        Self::new(path)
    }

    /// The persisted major-only flag, or `None` when absent or unreadable.
    pub fn major_only(&self) -> Option<bool> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let state: SessionState = serde_json::from_str(&raw).ok()?;
        state.major_only
    }

    pub fn set_major_only(&self, value: bool) -> Result<(), std::io::Error> {
        let mut state = self.load_or_default();
        state.major_only = Some(value);
        let payload = serde_json::to_string_pretty(&state)
            .expect("session state must serialize");
        fs::write(&self.path, payload)
    }

    fn load_or_default(&self) -> SessionState {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flag_reads_as_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.major_only(), None);
    }

    #[test]
    fn flag_round_trips_across_store_instances() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("session.json");

        let store = SessionStore::new(&path);
        store.set_major_only(true).expect("write should succeed");
        assert_eq!(store.major_only(), Some(true));

        let reopened = SessionStore::new(&path);
        assert_eq!(reopened.major_only(), Some(true));

        reopened.set_major_only(false).expect("write should succeed");
        assert_eq!(store.major_only(), Some(false));
    }

    #[test]
    fn corrupt_state_degrades_to_unset() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").expect("write should succeed");

        let store = SessionStore::new(&path);
        assert_eq!(store.major_only(), None);
        store.set_major_only(true).expect("write should succeed");
        assert_eq!(store.major_only(), Some(true));
    }
}
