//! Local key/value storage and the session identifier kept in it.
//!
//! The storage is a flat JSON object of string values, rewritten on each
//! `set`. The session identifier is created on first use and never
//! rotated.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use eon_types::SessionId;
use rand::Rng;

use crate::error::ClientError;

/// Storage key holding the session identifier.
pub const SESSION_KEY: &str = "living_platform_session";

/// Prefix of generated session identifiers.
pub const SESSION_PREFIX: &str = "sess_";

/// Number of random base-36 characters after the prefix.
pub const SESSION_RANDOM_LEN: usize = 9;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// String key/value storage, optionally persisted to a JSON file.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl LocalStorage {
    /// Storage that lives only as long as this value.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open file-backed storage. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the file exists but cannot be
    /// read, or [`ClientError::StorageFormat`] if it is not a string map.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// Open `path` if given, else in-memory storage.
    ///
    /// # Errors
    ///
    /// See [`LocalStorage::open`].
    pub fn open_optional(path: Option<&Path>) -> Result<Self, ClientError> {
        path.map_or_else(|| Ok(Self::in_memory()), Self::open)
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store `value` under `key` and persist.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the file cannot be written.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<(), ClientError> {
        self.entries.insert(key.into(), value.into());
        self.flush()
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn flush(&self) -> Result<(), ClientError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

/// Generate a fresh identifier: `sess_`, nine base-36 characters, then
/// the unix time in milliseconds.
pub fn generate_session_id(rng: &mut impl Rng, now: DateTime<Utc>) -> SessionId {
    let random: String = (0..SESSION_RANDOM_LEN)
        .filter_map(|_| BASE36.get(rng.random_range(0..BASE36.len())))
        .map(|&b| char::from(b))
        .collect();
    SessionId::new(format!("{SESSION_PREFIX}{random}{}", now.timestamp_millis()))
}

/// The stored session identifier, created and saved on first use.
///
/// An unusable stored value (blank or oversized) is replaced.
///
/// # Errors
///
/// Returns [`ClientError::Storage`] if a new identifier cannot be saved.
pub fn load_or_create(
    storage: &mut LocalStorage,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Result<SessionId, ClientError> {
    if let Some(existing) = storage
        .get(SESSION_KEY)
        .map(SessionId::from)
        .filter(SessionId::is_valid)
    {
        return Ok(existing);
    }
    let session = generate_session_id(rng, now);
    storage.set(SESSION_KEY, session.as_str())?;
    tracing::debug!(session_id = %session, "Created session identifier");
    Ok(session)
}
