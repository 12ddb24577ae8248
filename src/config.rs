use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::container::ContainerOptions;

pub const DEFAULT_CONFIG_FILE: &str = "symhuff.toml";
pub const MAX_INPUT_SIZE: usize = 1024 * 1024 * 1024; // 1GB

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoderConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence when set.
    pub log_filter: String,
    pub write_checksum: bool,
    pub verify_checksum: bool,
    /// Inputs are read whole, so anything above this is refused.
    pub max_input_size: usize,
    pub extension: String,
}

impl Default for CoderConfig {
    fn default() -> Self {
        Self {
            log_filter: "symhuff=info".to_string(),
            write_checksum: true,
            verify_checksum: true,
            max_input_size: MAX_INPUT_SIZE,
            extension: "symh".to_string(),
        }
    }
}

impl CoderConfig {
    /// Load the given file, or `symhuff.toml` if it exists, or defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        match config_path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CoderConfig = toml::from_str(content)?;
        if config.max_input_size == 0 {
            anyhow::bail!("max_input_size must be positive");
        }
        Ok(config)
    }

    pub fn save(&self, config_path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path.as_ref(), content)?;
        tracing::info!("Wrote config: {:?}", config_path.as_ref());
        Ok(())
    }

    pub fn container_options(&self) -> ContainerOptions {
        ContainerOptions {
            write_checksum: self.write_checksum,
            verify_checksum: self.verify_checksum,
        }
    }
}
