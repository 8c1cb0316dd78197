//! Configuration for hashing and chunking
//!
//! Stored as JSON, by default in ~/.config/merkle-audit/config.json.
//! Every field is optional; missing fields take their defaults.

use crate::chunk::Chunker;
use crate::model::{Algorithm, HashPrimitive};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the user config dir
pub const CONFIG_DIR: &str = "merkle-audit";

/// File name of the config inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.json";

/// Hashing and chunking settings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digest algorithm for leaves and parents
    pub algorithm: Algorithm,
    /// Join child digests as hex text before hashing parents
    pub hex_join: bool,
    /// How raw input is split into chunks
    pub chunker: Chunker,
}

impl Config {
    /// Default config location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load config from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load config from the default location, falling back to defaults when absent
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Save config to a file path, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::Config(format!("Failed to create config dir: {}", e)))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Hash primitive described by this config
    pub fn primitive(&self) -> Box<dyn HashPrimitive> {
        self.algorithm.primitive(self.hex_join)
    }
}
