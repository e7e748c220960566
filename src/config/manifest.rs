//! Project manifest (`azion/azion.json`)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

pub const DEFAULT_CONFIG_DIR: &str = "azion";
const MANIFEST_FILE: &str = "azion.json";

/// Deployed resources recorded for a local project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AzionApplicationOptions {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub preset: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub env: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub not_first_run: bool,
    #[serde(default)]
    pub application: ApplicationRef,
    #[serde(default)]
    pub domain: DomainRef,
    #[serde(default)]
    pub function: FunctionRef,
    #[serde(default)]
    pub origin: Vec<OriginRef>,
    #[serde(default)]
    pub rt_purge: RtPurge,
    #[serde(default)]
    pub workload: WorkloadRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRef {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainRef {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionRef {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub args: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OriginRef {
    #[serde(default)]
    pub origin_id: i64,
    #[serde(default)]
    pub origin_key: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RtPurge {
    #[serde(default)]
    pub purge_on_publish: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadRef {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl AzionApplicationOptions {
    pub fn new(name: &str, preset: &str, mode: &str) -> Self {
        Self {
            name: name.to_string(),
            preset: preset.to_string(),
            mode: mode.to_string(),
            rt_purge: RtPurge {
                purge_on_publish: true,
            },
            ..Self::default()
        }
    }

    /// Manifest path for a project rooted at `project_dir`
    pub fn path(project_dir: &Path, config_dir: &str) -> PathBuf {
        project_dir.join(config_dir).join(MANIFEST_FILE)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|_| CliError::ManifestNotFound(path.display().to_string()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = AzionApplicationOptions::path(dir.path(), DEFAULT_CONFIG_DIR);
        let mut manifest = AzionApplicationOptions::new("site", "next", "compute");
        manifest.application.id = 42;
        manifest.bucket = "site-bucket".into();

        manifest.save(&path).unwrap();

        assert_eq!(path, dir.path().join("azion").join("azion.json"));
        assert_eq!(AzionApplicationOptions::load(&path).unwrap(), manifest);
    }

    #[test]
    fn keys_are_kebab_case() {
        let manifest = AzionApplicationOptions::new("site", "", "");
        let value = serde_json::to_value(&manifest).unwrap();
        assert!(value.get("not-first-run").is_some());
        assert_eq!(value["rt-purge"]["purge_on_publish"], true);
    }

    #[test]
    fn partial_manifest_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("azion.json");
        fs::write(&path, r#"{"name": "x", "application": {"id": 9}}"#).unwrap();

        let manifest = AzionApplicationOptions::load(&path).unwrap();

        assert_eq!(manifest.application.id, 9);
        assert_eq!(manifest.function.id, 0);
        assert!(manifest.origin.is_empty());
    }

    #[test]
    fn missing_manifest_is_typed() {
        let dir = tempfile::tempdir().unwrap();
        let err = AzionApplicationOptions::load(&dir.path().join("azion.json")).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::ManifestNotFound(_))));
    }
}
