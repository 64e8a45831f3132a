//! Configuration types and validation for the register run

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Smallest hash read buffer accepted by `validate`
pub const MIN_CHUNK_SIZE: usize = 512;

/// Largest identifier the register hands out, so every ID reads back as an `i64`
pub const MAX_IDENTIFIER: u64 = i64::MAX as u64;

/// Settings for one register run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterConfig {
    /// Base for `EVID ID`; the Nth file gets `evid_id_base + N`
    pub evid_id_base: u64,
    /// Base for `ID`
    pub id_base: u64,
    /// Base for `file_number`
    pub file_number_base: u64,
    /// Value of `storage_path` when nothing more specific is known
    pub storage_path: String,
    /// Glob matched against file names in the input directory
    pub pattern: String,
    /// Read buffer used while hashing
    pub chunk_size: usize,
    /// Register output path
    pub output: PathBuf,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            evid_id_base: 100_000,
            id_base: 200_000,
            file_number_base: 5_000,
            storage_path: "Root".to_string(),
            pattern: "*.pdf".to_string(),
            chunk_size: 8192,
            output: PathBuf::from("EVIDENCE_REGISTER_OUTPUT.csv"),
        }
    }
}

impl RegisterConfig {
    /// Loads a config file, trying JSON first and then YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "Loaded register configuration");
        Ok(config)
    }

    /// Parses config text, trying JSON first and then YAML.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = match serde_json::from_str(content) {
            Ok(config) => config,
            Err(_) => serde_yaml::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size < MIN_CHUNK_SIZE {
            return Err(Error::InvalidConfiguration(format!(
                "chunk_size must be at least {} bytes, got {}",
                MIN_CHUNK_SIZE, self.chunk_size
            )));
        }
        for (name, base) in self.id_bases() {
            if base >= MAX_IDENTIFIER {
                return Err(Error::InvalidConfiguration(format!(
                    "{} must be below {}, got {}",
                    name, MAX_IDENTIFIER, base
                )));
            }
        }
        if self.pattern.trim().is_empty() {
            return Err(Error::InvalidConfiguration("pattern must not be empty".into()));
        }
        if self.storage_path.trim().is_empty() {
            return Err(Error::InvalidConfiguration("storage_path must not be empty".into()));
        }
        Ok(())
    }

    /// The three identifier bases with their config keys
    pub fn id_bases(&self) -> [(&'static str, u64); 3] {
        [
            ("evid_id_base", self.evid_id_base),
            ("id_base", self.id_base),
            ("file_number_base", self.file_number_base),
        ]
    }
}
