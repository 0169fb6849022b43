//! The session context: an optional user id shared by every view that needs
//! it, mirrored into a single persisted slot by `login`/`logout`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Where the session id lives between runs.
pub trait SessionStore: Send {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, user_id: Option<&str>) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFile {
    #[serde(default)]
    user_id: Option<String>,
}

/// JSON file holding `{ "userId": ... }`.
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
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let file: SessionFile = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(normalize(file.user_id))
    }

    fn save(&self, user_id: Option<&str>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = SessionFile {
            user_id: user_id.map(str::to_string),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// Keeps the id in memory only.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: std::sync::Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_user(user_id: &str) -> Self {
        Self {
            slot: std::sync::Mutex::new(Some(user_id.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("session slot poisoned"))?;
        Ok(slot.clone())
    }

    fn save(&self, user_id: Option<&str>) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("session slot poisoned"))?;
        *slot = user_id.map(str::to_string);
        Ok(())
    }
}

pub struct Session {
    user_id: Option<String>,
    store: Box<dyn SessionStore>,
}

impl Session {
    /// Reads the persisted slot once. An unreadable slot starts logged out.
    pub fn restore(store: Box<dyn SessionStore>) -> Self {
        let user_id = match store.load() {
            Ok(user_id) => user_id,
            Err(err) => {
                warn!("ignoring unreadable session: {err:#}");
                None
            }
        };
        if user_id.is_some() {
            info!("restored session from persisted user id");
        }
        Self { user_id, store }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// In-memory state changes even if persisting fails; the error is
    /// returned so the caller can tell the user.
    pub fn login(&mut self, user_id: impl Into<String>) -> Result<()> {
        let user_id = user_id.into();
        self.user_id = normalize(Some(user_id));
        self.store.save(self.user_id.as_deref())
    }

    pub fn logout(&mut self) -> Result<()> {
        self.user_id = None;
        self.store.save(None)
    }
}

fn normalize(user_id: Option<String>) -> Option<String> {
    user_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}
