//! XDG state store adapter
//!
//! Persists the listening-intent flag as a small TOML file under the
//! XDG state directory, so a rebuilt session can restore the user's
//! last intent.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::application::ports::{ListenStateStore, StateStoreError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    listening: Option<bool>,
}

/// XDG-compliant state store
#[derive(Clone)]
pub struct XdgStateStore {
    path: PathBuf,
}

impl XdgStateStore {
    /// Create a state store at the default XDG path
    pub fn new() -> Self {
        let state_dir = if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
            PathBuf::from(xdg_state)
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join(".local/state")
        };

        Self {
            path: state_dir.join("voice-remote").join("state.toml"),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the state file path
    pub fn path(&self) -> PathBuf {
        self.path.clone()
    }
}

impl Default for XdgStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListenStateStore for XdgStateStore {
    async fn load(&self) -> Result<bool, StateStoreError> {
        if !self.path.exists() {
            return Ok(false);
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| StateStoreError::ReadError(e.to_string()))?;

        let state: StateFile =
            toml::from_str(&content).map_err(|e| StateStoreError::ParseError(e.to_string()))?;

        Ok(state.listening.unwrap_or(false))
    }

    async fn save(&self, listening: bool) -> Result<(), StateStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StateStoreError::WriteError(e.to_string()))?;
        }

        let content = toml::to_string(&StateFile {
            listening: Some(listening),
        })
        .map_err(|e| StateStoreError::WriteError(e.to_string()))?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| StateStoreError::WriteError(e.to_string()))?;

        Ok(())
    }
}
