//! Key-value storage backing a persisted session.
//!
//! Stores are synchronous: a write has completed when the call returns.

use super::errors::SessionResult;
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key of the JSON-serialized user summary
pub const USER_KEY: &str = "user_data";
/// Storage key of the RFC 3339 expiry timestamp
pub const EXPIRY_KEY: &str = "token_expiry";

/// The three entries a session occupies, always written and removed together
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USER_KEY, EXPIRY_KEY];

/// Client-local string storage
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> SessionResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> SessionResult<()>;

    fn remove(&self, key: &str) -> SessionResult<()>;

    /// Write several entries; stores that can should do so in one step
    fn set_all(&self, entries: &[(&str, &str)]) -> SessionResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Remove several entries; stores that can should do so in one step
    fn remove_all(&self, keys: &[&str]) -> SessionResult<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// Store persisted as a JSON object in a single file
///
/// The whole object is rewritten on every change through a temporary file
/// and a rename, so the entries of one `set_all` land together. A missing
/// file reads as empty; an unreadable one is logged and read as empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> SessionResult<BTreeMap<String, String>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable session file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> SessionResult<()> {
        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }

        let tmp = self.path.with_extension("tmp");
        write_private(&tmp, &serde_json::to_vec_pretty(entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        log::debug!("Session file written: {}", self.path.display());
        Ok(())
    }

    fn update<F>(&self, apply: F) -> SessionResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = lock(&self.guard);
        let mut entries = self.read()?;
        apply(&mut entries);
        self.write(&entries)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let _guard = lock(&self.guard);
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn set_all(&self, pairs: &[(&str, &str)]) -> SessionResult<()> {
        self.update(|entries| {
            for (key, value) in pairs {
                entries.insert(key.to_string(), value.to_string());
            }
        })
    }

    fn remove_all(&self, keys: &[&str]) -> SessionResult<()> {
        self.update(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }
}

/// Write `bytes` to `path`, readable by the owner only on unix.
#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::fs::{OpenOptions, Permissions};
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation; a leftover tmp file keeps its bits
    file.set_permissions(Permissions::from_mode(0o600))?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, bytes)
}
