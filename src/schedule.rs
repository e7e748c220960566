//! Deferred retries persisted between invocations
//!
//! A non-empty bucket cannot be removed until the platform finishes emptying it, so
//! the deletion is recorded in `schedule.json` and retried by a later invocation once
//! a day has passed.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DELETE_BUCKET: &str = "DELETE_BUCKET";

const RETRY_AFTER_HOURS: i64 = 24;

/// A pending action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub name: String,
    pub time: DateTime<Utc>,
    pub kind: String,
}

impl Schedule {
    fn is_due(&self, now: DateTime<Utc>) -> bool {
        now - self.time >= Duration::hours(RETRY_AFTER_HOURS)
    }
}

/// Append a pending action for `name`
pub fn new_schedule(path: &Path, name: &str, kind: &str) -> Result<()> {
    let mut schedules = if path.exists() {
        read_schedules(path)?
    } else {
        Vec::new()
    };

    schedules.push(Schedule {
        name: name.to_string(),
        time: Utc::now(),
        kind: kind.to_string(),
    });

    write_schedules(path, &schedules)
}

/// Retry every due action. Never fails; problems are logged at debug level.
pub async fn exec_schedules<F, Fut>(path: &Path, now: DateTime<Utc>, delete_bucket: F)
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    if !path.exists() {
        return;
    }

    let schedules = match read_schedules(path) {
        Ok(s) => s,
        Err(e) => {
            debug!("Failed to read schedules: {:#}", e);
            set_aside(path);
            return;
        }
    };

    let mut remaining = Vec::with_capacity(schedules.len());
    for schedule in schedules {
        if !schedule.is_due(now) {
            remaining.push(schedule);
            continue;
        }

        if schedule.kind == DELETE_BUCKET {
            debug!("Retrying deletion of bucket {}", schedule.name);
            if let Err(e) = delete_bucket(schedule.name.clone()).await {
                debug!("Deferred deletion of bucket {} failed: {:#}", schedule.name, e);
                remaining.push(schedule);
            }
        }
    }

    if let Err(e) = write_schedules(path, &remaining) {
        debug!("Failed to write schedules: {:#}", e);
    }
}

fn read_schedules(path: &Path) -> Result<Vec<Schedule>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_schedules(path: &Path, schedules: &[Schedule]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(schedules)?;
    let tmp = sibling(path, "tmp");
    fs::write(&tmp, content).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Move an unreadable file out of the way so later runs start clean
fn set_aside(path: &Path) {
    let corrupt = sibling(path, "corrupt");
    match fs::rename(path, &corrupt) {
        Ok(()) => debug!("Moved unreadable schedule file to {}", corrupt.display()),
        Err(e) => debug!("Failed to move unreadable schedule file: {}", e),
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn seed(path: &Path, entries: &[Schedule]) {
        write_schedules(path, entries).unwrap();
    }

    fn entry(name: &str, age_hours: i64, now: DateTime<Utc>) -> Schedule {
        Schedule {
            name: name.to_string(),
            time: now - Duration::hours(age_hours),
            kind: DELETE_BUCKET.to_string(),
        }
    }

    #[test]
    fn new_schedule_creates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");

        new_schedule(&path, "bucket-a", DELETE_BUCKET).unwrap();
        new_schedule(&path, "bucket-a", DELETE_BUCKET).unwrap();

        let entries = read_schedules(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.name == "bucket-a" && e.kind == DELETE_BUCKET));
    }

    #[tokio::test]
    async fn failing_retry_keeps_entry_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        let now = Utc::now();
        let old = entry("stuck", 25, now);
        seed(&path, &[old.clone()]);

        for _ in 0..2 {
            exec_schedules(&path, now, |_| async { Err(anyhow::anyhow!("bucket not empty")) }).await;
            assert_eq!(read_schedules(&path).unwrap(), vec![old.clone()]);
        }
    }

    #[tokio::test]
    async fn young_entries_are_not_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        let now = Utc::now();
        let young = entry("fresh", 2, now);
        seed(&path, &[young.clone()]);
        let before = fs::read_to_string(&path).unwrap();
        let calls = AtomicUsize::new(0);

        exec_schedules(&path, now, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn successful_retry_drops_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        let now = Utc::now();
        seed(&path, &[entry("done", 30, now), entry("later", 1, now)]);

        exec_schedules(&path, now, |name| async move {
            assert_eq!(name, "done");
            Ok(())
        })
        .await;

        let remaining = read_schedules(&path).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "later");
    }

    #[tokio::test]
    async fn due_entries_of_unknown_kind_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        let now = Utc::now();
        let mut other = entry("x", 48, now);
        other.kind = "SOMETHING_ELSE".to_string();
        seed(&path, &[other]);

        exec_schedules(&path, now, |_| async { Ok(()) }).await;

        assert!(read_schedules(&path).unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_set_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        fs::write(&path, "{not json").unwrap();

        exec_schedules(&path, Utc::now(), |_| async { Ok(()) }).await;

        assert!(!path.exists());
        assert!(dir.path().join("schedule.json.corrupt").exists());
    }

    #[tokio::test]
    async fn missing_file_is_left_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");

        exec_schedules(&path, Utc::now(), |_| async { Ok(()) }).await;

        assert!(!path.exists());
    }
}
