//! Configuration management

pub mod manifest;
pub mod profiles;
pub mod settings;

use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

pub use settings::Settings;

const DEFAULT_API_URL: &str = "https://api.azionapi.net";
const DEFAULT_API_V4_URL: &str = "https://api.azion.com/v4";
const DEFAULT_CONSOLE_URL: &str = "https://console.azion.com";

/// Where state lives and which endpoints to talk to
#[derive(Debug, Clone)]
pub struct Config {
    /// Root for profiles, metrics and schedules (`~/.azion` by default)
    pub config_dir: PathBuf,

    /// Active profile name
    pub profile: String,

    /// v3 API base URL
    pub api_url: String,

    /// v4 API base URL
    pub api_v4_url: String,

    /// Console URL used by the browser login
    pub console_url: String,

    /// Token from AZION_TOKEN
    pub env_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables and the config root
    pub fn load(config_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_dir.or_else(|| env::var_os("AZION_CONFIG_DIR").map(PathBuf::from)) {
            Some(dir) => dir,
            None => Self::default_dir()?,
        };

        let profile = profiles::active(&config_dir)?;

        Ok(Self {
            profile,
            api_url: env_url("AZION_API_URL", DEFAULT_API_URL),
            api_v4_url: env_url("AZION_API_V4_URL", DEFAULT_API_V4_URL),
            console_url: env_url("AZION_CONSOLE_URL", DEFAULT_CONSOLE_URL),
            env_token: env::var("AZION_TOKEN").ok().filter(|t| !t.is_empty()),
            config_dir,
        })
    }

    /// Get default config directory path
    pub fn default_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))?;
        Ok(home.join(".azion"))
    }

    /// Settings file of the active profile
    pub fn settings_path(&self) -> PathBuf {
        settings::path(&self.config_dir, &self.profile)
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.config_dir.join("schedule.json")
    }

    pub fn metrics_path(&self) -> PathBuf {
        self.config_dir.join("metrics.json")
    }
}

fn env_url(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
impl Config {
    /// Config rooted at `dir` talking to a local mock API
    pub fn for_test(dir: &std::path::Path, api_url: &str) -> Self {
        Self {
            config_dir: dir.to_path_buf(),
            profile: profiles::DEFAULT_PROFILE.to_string(),
            api_url: api_url.to_string(),
            api_v4_url: format!("{}/v4", api_url),
            console_url: api_url.to_string(),
            env_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_the_config_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(config.profile, "default");
        assert_eq!(config.settings_path(), dir.path().join("default").join("settings.toml"));
        assert_eq!(config.schedule_path(), dir.path().join("schedule.json"));
        assert_eq!(config.metrics_path(), dir.path().join("metrics.json"));
    }

    #[test]
    fn active_profile_comes_from_profiles_file() {
        let dir = tempfile::tempdir().unwrap();
        profiles::set_active(dir.path(), "work").unwrap();

        let config = Config::load(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(config.profile, "work");
        assert_eq!(config.settings_path(), dir.path().join("work").join("settings.toml"));
    }
}
