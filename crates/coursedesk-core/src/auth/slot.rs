use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Identity;

use super::session::Credential;

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Persisted form of a signed-in session. Never leaves the machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub user: Identity,
    pub credential: Credential,
    pub signed_in_at: DateTime<Utc>,
}

impl SessionRecord {
    /// A record is usable only if it names a user and carries a credential.
    pub fn is_usable(&self) -> bool {
        !self.user.id.is_empty() && !self.credential.as_str().is_empty()
    }
}

/// Storage that keeps the session across restarts.
pub trait SessionSlot: Send {
    fn load(&self) -> Result<Option<SessionRecord>>;
    fn save(&self, record: &SessionRecord) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// `session.json` in the cache directory.
pub struct FileSlot {
    cache_dir: PathBuf,
}

impl FileSlot {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

impl SessionSlot for FileSlot {
    fn load(&self) -> Result<Option<SessionRecord>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read session file")?;
        let record = serde_json::from_str(&contents).context("Failed to parse session file")?;
        Ok(Some(record))
    }

    fn save(&self, record: &SessionRecord) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(record)?;
        write_private(&path, contents.as_bytes()).context("Failed to write session file")?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove session file")?;
        }
        Ok(())
    }
}

/// Write `contents` readable by the owner only.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

/// In-process slot. Clones share the same storage, which lets a second
/// store restore what the first one saved.
#[derive(Clone, Default)]
pub struct MemorySlot {
    raw: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with arbitrary stored text, parsed on `load`.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.lock().ok().and_then(|guard| guard.clone())
    }
}

impl SessionSlot for MemorySlot {
    fn load(&self) -> Result<Option<SessionRecord>> {
        let guard = self.raw.lock().map_err(|_| anyhow!("Session slot lock poisoned"))?;
        match guard.as_deref() {
            Some(raw) => Ok(Some(
                serde_json::from_str(raw).context("Failed to parse stored session")?,
            )),
            None => Ok(None),
        }
    }

    fn save(&self, record: &SessionRecord) -> Result<()> {
        let raw = serde_json::to_string(record)?;
        let mut guard = self.raw.lock().map_err(|_| anyhow!("Session slot lock poisoned"))?;
        *guard = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self.raw.lock().map_err(|_| anyhow!("Session slot lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}
