use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Start-up settings for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Directory that resource names are resolved against.
    pub asset_root: PathBuf,
    pub width: u32,
    pub height: u32,
    pub max_delta_time: f32,
    pub time_scale: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("."),
            width: 1280,
            height: 720,
            max_delta_time: 1.0 / 30.0,
            time_scale: 1.0,
        }
    }
}

impl EngineConfig {
    /// Reads a JSON config document; absent fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid engine config {}", path.display()))
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}
