//! File-backed session persistence.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use binwatch_core::error::{BinwatchError, Result};
use binwatch_core::session::{Session, SessionKey, SessionStore};
use tracing::debug;

const SESSION_FILE: &str = "session.json";

/// Persists the session to a JSON file on disk.
///
/// The whole key map is rewritten on every mutation, so the six session keys
/// always change as a single group: a crash between login and logout can
/// leave the previous session or the new one, never a mix.
///
/// Layout:
/// ```text
/// base_dir/
/// └── session.json
/// ```
pub struct FileSessionStore {
    base_dir: PathBuf,
}

impl FileSessionStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(|e| {
            BinwatchError::io(format!(
                "Failed to create session directory {:?}: {}",
                base_dir, e
            ))
        })?;
        Ok(Self { base_dir })
    }

    /// Creates a store at the default location (~/.binwatch).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// directory cannot be created.
    pub fn default_location() -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| BinwatchError::io("Failed to get home directory"))?;
        Self::new(home_dir.join(".binwatch"))
    }

    fn session_file_path(&self) -> PathBuf {
        self.base_dir.join(SESSION_FILE)
    }

    /// Reads the stored key map, treating a missing file as an empty session.
    fn read_entries(&self) -> Result<HashMap<String, String>> {
        let path = self.session_file_path();
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let json = fs::read_to_string(&path).map_err(|e| {
            BinwatchError::io(format!("Failed to read session file {:?}: {}", path, e))
        })?;
        let entries = serde_json::from_str(&json)?;
        Ok(entries)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>> {
        let entries = self.read_entries()?;
        Ok(entries.get(key.as_str()).cloned())
    }

    fn set_all(&self, session: &Session) -> Result<()> {
        let entries: HashMap<&'static str, String> = session
            .to_entries()?
            .into_iter()
            .map(|(key, value)| (key.as_str(), value))
            .collect();

        let path = self.session_file_path();
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&path, json).map_err(|e| {
            BinwatchError::io(format!("Failed to write session file {:?}: {}", path, e))
        })?;

        debug!(keys = entries.len(), "session persisted");
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        let path = self.session_file_path();
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                BinwatchError::io(format!("Failed to delete session file {:?}: {}", path, e))
            })?;
        }
        debug!("session cleared");
        Ok(())
    }
}
