//! Persisted session identity.
//!
//! The session is a single fact: the logged-in username. It lives in
//! ${PIM_HOME}/session.toml and has no expiry. Absence of the file means
//! "logged out". Mutating API calls never trust this state for write
//! authorization; the backend re-verifies the password on every mutation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// The logged-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Loads the persisted session, if any.
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(&paths::session_path())
    }

    /// Loads a session from a specific path. Returns `None` if the file is
    /// absent or names an empty username.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;
        let session: Session = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", path.display()))?;
        if session.username.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Persists this session to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&paths::session_path())
    }

    /// Persists this session to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string(self).context("Failed to serialize session")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write session to {}", path.display()))
    }

    /// Removes the persisted session (logout). Missing file is not an error.
    pub fn clear() -> Result<()> {
        Self::clear_at(&paths::session_path())
    }

    /// Removes the session file at a specific path.
    pub fn clear_at(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove session at {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        Session::new("alice").save_to(&path).unwrap();
        let loaded = Session::load_from(&path).unwrap();

        assert_eq!(loaded, Some(Session::new("alice")));
    }

    #[test]
    fn missing_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Session::load_from(&dir.path().join("nope.toml")).unwrap(), None);
    }

    #[test]
    fn blank_username_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "username = \"  \"\n").unwrap();

        assert_eq!(Session::load_from(&path).unwrap(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        Session::new("bob").save_to(&path).unwrap();
        Session::clear_at(&path).unwrap();
        Session::clear_at(&path).unwrap();

        assert_eq!(Session::load_from(&path).unwrap(), None);
    }
}
