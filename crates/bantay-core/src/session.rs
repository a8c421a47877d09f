//! Session token storage.
//!
//! A session is a single composed authorization string (`"<type> <token>"`).
//! [`FileSessionStore`] keeps it under the `auth` key of `<base>/session.json`
//! with restricted permissions (0600). Tokens are never logged or displayed in full.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use crate::config::paths;

/// Session file name inside the Bantay home directory.
pub const SESSION_FILE: &str = "session.json";

/// Key holding the composed authorization string.
pub const SESSION_KEY: &str = "auth";

/// Errors raised when the session slot cannot be read or written.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read session from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write session to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse session from {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persisted slot for the current session token.
///
/// Writes replace any prior value; there is no validation of token shape.
pub trait SessionStore {
    /// Stores `token`, replacing any previous session.
    ///
    /// # Errors
    /// Returns an error if the backing storage is unavailable.
    fn save(&self, token: &str) -> Result<(), StoreError>;

    /// Returns the last saved token, if any.
    ///
    /// # Errors
    /// Returns an error if the backing storage is unavailable or corrupt.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Removes the stored token. Returns whether a token was present.
    ///
    /// # Errors
    /// Returns an error if the backing storage is unavailable.
    fn clear(&self) -> Result<bool, StoreError>;
}

/// Session store backed by a JSON file.
///
/// Unrelated keys already present in the file are preserved.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new(paths::session_path())
    }
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, Value>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        let write_err = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = serde_json::to_string_pretty(entries).map_err(|e| write_err(e.into()))?;

        // Write to a sibling temp file and rename so readers never see a partial file.
        let tmp_path = self.path.with_extension("json.tmp");
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&tmp_path).map_err(write_err)?;
        file.write_all(contents.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        fs::rename(&tmp_path, &self.path).map_err(write_err)
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(SESSION_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(&entries)?;
        tracing::debug!(path = %self.path.display(), token = %mask_token(token), "session saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(SESSION_KEY)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn clear(&self) -> Result<bool, StoreError> {
        let mut entries = self.read_entries()?;
        if entries.remove(SESSION_KEY).is_none() {
            return Ok(false);
        }
        self.write_entries(&entries)?;
        tracing::debug!(path = %self.path.display(), "session cleared");
        Ok(true)
    }
}

/// In-process session store, scoped to the value's lifetime.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn clear(&self) -> Result<bool, StoreError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some())
    }
}

/// Masks a token for display, keeping the scheme and a short prefix.
pub fn mask_token(token: &str) -> String {
    let (scheme, secret) = match token.split_once(' ') {
        Some((scheme, secret)) => (Some(scheme), secret),
        None => (None, token),
    };
    let masked = match secret.char_indices().nth(8) {
        Some((idx, _)) if secret.len() > 16 => format!("{}...", &secret[..idx]),
        _ => "***".to_string(),
    };
    match scheme {
        Some(scheme) => format!("{scheme} {masked}"),
        None => masked,
    }
}
