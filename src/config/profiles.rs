//! Named credential profiles under the config root

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::settings::{self, Settings, SETTINGS_FILE};
use crate::error::CliError;

pub const DEFAULT_PROFILE: &str = "default";
const PROFILES_FILE: &str = "profiles.json";

#[derive(Debug, Serialize, Deserialize)]
struct ActiveProfile {
    name: String,
}

/// Name of the active profile, `default` when none was chosen
pub fn active(root: &Path) -> Result<String> {
    let path = root.join(PROFILES_FILE);
    if !path.exists() {
        return Ok(DEFAULT_PROFILE.to_string());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let active: ActiveProfile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    if active.name.is_empty() {
        return Ok(DEFAULT_PROFILE.to_string());
    }
    Ok(active.name)
}

/// A profile name is a single plain path component
pub fn validate_name(name: &str) -> Result<()> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\']);
    if !plain {
        return Err(CliError::InvalidProfileName(name.to_string()).into());
    }
    Ok(())
}

pub fn set_active(root: &Path, name: &str) -> Result<()> {
    validate_name(name)?;
    fs::create_dir_all(root)?;
    let content = serde_json::to_string_pretty(&ActiveProfile {
        name: name.to_string(),
    })?;
    fs::write(root.join(PROFILES_FILE), content)?;
    Ok(())
}

/// Profiles are directories holding a settings file; the active one is always listed
pub fn list(root: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    if root.exists() {
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if entry.path().join(SETTINGS_FILE).is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
    }

    let current = active(root)?;
    if !names.contains(&current) {
        names.push(current);
    }

    names.sort();
    Ok(names)
}

pub fn exists(root: &Path, name: &str) -> bool {
    settings::path(root, name).is_file()
}

pub fn create(root: &Path, name: &str, initial: &Settings) -> Result<()> {
    validate_name(name)?;
    if exists(root, name) {
        return Err(CliError::ProfileExists(name.to_string()).into());
    }
    initial.save(&settings::path(root, name))
}

pub fn delete(root: &Path, name: &str) -> Result<()> {
    validate_name(name)?;
    if active(root)? == name {
        return Err(CliError::CannotDeleteActiveProfile(name.to_string()).into());
    }
    let dir = root.join(name);
    if !dir.join(SETTINGS_FILE).is_file() {
        return Err(CliError::ProfileNotFound(name.to_string()).into());
    }
    fs::remove_dir_all(&dir).with_context(|| format!("Failed to remove {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_without_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(active(dir.path()).unwrap(), "default");
        assert_eq!(list(dir.path()).unwrap(), vec!["default"]);
    }

    #[test]
    fn create_switch_and_list() {
        let dir = tempfile::tempdir().unwrap();
        create(dir.path(), "staging", &Settings::default()).unwrap();
        create(dir.path(), "prod", &Settings::default()).unwrap();
        set_active(dir.path(), "prod").unwrap();

        assert_eq!(active(dir.path()).unwrap(), "prod");
        assert_eq!(list(dir.path()).unwrap(), vec!["prod", "staging"]);
    }

    #[test]
    fn duplicate_profile_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        create(dir.path(), "staging", &Settings::default()).unwrap();

        let err = create(dir.path(), "staging", &Settings::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::ProfileExists(_))));
    }

    #[test]
    fn active_profile_cannot_be_deleted() {
        let dir = tempfile::tempdir().unwrap();
        create(dir.path(), "default", &Settings::default()).unwrap();
        create(dir.path(), "old", &Settings::default()).unwrap();

        let err = delete(dir.path(), "default").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::CannotDeleteActiveProfile(_))
        ));

        delete(dir.path(), "old").unwrap();
        assert!(!exists(dir.path(), "old"));

        let err = delete(dir.path(), "old").unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::ProfileNotFound(_))));
    }

    #[test]
    fn names_cannot_leave_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("azion");

        for name in ["../escaped", "..", ".", "", "a/b", "a\\b"] {
            let err = create(&root, name, &Settings::default()).unwrap_err();
            assert!(
                matches!(err.downcast_ref::<CliError>(), Some(CliError::InvalidProfileName(_))),
                "{name:?} was accepted"
            );
        }
        assert!(!dir.path().join("escaped").exists());

        let err = delete(&root, "../azion").unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::InvalidProfileName(_))));
        assert!(set_active(&root, "../x").is_err());
    }
}
