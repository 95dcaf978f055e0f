//! Token persistence
//!
//! The authenticator never touches a token file directly; it is handed a
//! [`TokenStore`]. [`FileTokenStore`] keeps the token as JSON on disk so it
//! survives across runs, [`MemoryTokenStore`] keeps it for the process only.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Mutex;

use super::token::Token;

pub trait TokenStore: Send + Sync {
    /// Previously saved token, if any
    fn load(&self) -> Result<Option<Token>>;

    /// Replace the saved token
    fn save(&self, token: &Token) -> Result<()>;
}

/// JSON file token store
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<Token>> {
        if !self.path.exists() {
            log::debug!("No cached token at {}", self.path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token cache: {}", self.path.display()))?;

        match serde_json::from_str(&content) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                // An unreadable cache only costs a new authorization
                log::warn!("Ignoring invalid token cache {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    fn save(&self, token: &Token) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(token).context("Failed to serialize token")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write token cache: {}", self.path.display()))?;

        log::debug!("Saved token to {}", self.path.display());
        Ok(())
    }
}

/// Process-local token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<Token>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Token) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<Token>> {
        let token = self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("Token store lock poisoned"))?;
        Ok(token.clone())
    }

    fn save(&self, token: &Token) -> Result<()> {
        let mut slot = self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("Token store lock poisoned"))?;
        *slot = Some(token.clone());
        Ok(())
    }
}
