//! Per-profile credentials stored as TOML

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "settings.toml";

/// Metrics consent values
pub const METRICS_UNASKED: u8 = 0;
pub const METRICS_ALLOWED: u8 = 1;
pub const METRICS_DENIED: u8 = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Personal token id, used by logout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub authorize_metrics_collection: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_access_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_secret_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_bucket: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_vulcan_version: Option<String>,
}

impl Settings {
    /// Missing files load as empty settings
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))
    }

    /// Forget the session while keeping preferences
    pub fn clear_session(&mut self) {
        self.token = None;
        self.uuid = None;
        self.client_id = None;
        self.email = None;
    }

    pub fn metrics_allowed(&self) -> bool {
        self.authorize_metrics_collection == METRICS_ALLOWED
    }
}

pub fn path(root: &Path, profile: &str) -> PathBuf {
    root.join(profile).join(SETTINGS_FILE)
}
