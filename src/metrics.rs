//! Local usage counters in `metrics.json`, keyed by command path

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandMetrics {
    #[serde(default)]
    pub total_successful: u64,
    #[serde(default)]
    pub total_failed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

pub type Metrics = BTreeMap<String, CommandMetrics>;

pub fn load(path: &Path) -> Result<Metrics> {
    if !path.exists() {
        return Ok(Metrics::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Count one run of `command`
pub fn record(path: &Path, command: &str, success: bool, now: DateTime<Utc>) -> Result<()> {
    let mut metrics = load(path)?;
    let entry = metrics.entry(command.to_string()).or_default();
    if success {
        entry.total_successful += 1;
    } else {
        entry.total_failed += 1;
    }
    entry.last_used = Some(now);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&metrics)?)
        .with_context(|| format!("Failed to write {}", path.display()))
}
