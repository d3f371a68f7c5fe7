use std::path::{Path, PathBuf};

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::protocol::crc::CRC_LEN;
use crate::protocol::frame::Q_FRAME_LEN;

/// Tool configuration stored as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Frame size used by `scan`, CRC trailer included.
    #[serde(default = "default_frame_len")]
    pub frame_len: usize,
    /// Repair single-bit errors when scanning.
    #[serde(default = "default_true")]
    pub correct: bool,
    /// Write repaired scan data next to the input when no output is given.
    #[serde(default)]
    pub write_repaired: bool,
}

fn default_frame_len() -> usize {
    Q_FRAME_LEN
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_len: default_frame_len(),
            correct: true,
            write_repaired: false,
        }
    }
}

impl AppConfig {
    /// Config file path: ~/.config/qcrc/config.toml
    pub fn path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("qcrc");
        config_dir.join("config.toml")
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        ensure!(
            config.frame_len >= CRC_LEN,
            "frame_len must be at least {} bytes, got {}",
            CRC_LEN,
            config.frame_len
        );
        Ok(config)
    }

    /// Load config from `path`, or return defaults.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match Self::from_toml(&contents) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Failed to parse config {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    /// Save config to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        tracing::info!("Config saved to {}", path.display());
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
