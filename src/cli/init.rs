//! `azion init`: start a project from a template repository

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::Args;
use tokio::process::Command;
use tracing::debug;

use super::command::string_or_prompt;
use super::context::Context;
use crate::config::manifest::{AzionApplicationOptions, DEFAULT_CONFIG_DIR};
use crate::output::SliceOutput;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name, also the directory created
    #[arg(long)]
    pub name: Option<String>,

    /// Git URL of the template
    #[arg(long)]
    pub template: Option<String>,

    /// Framework preset, e.g. javascript, react, next
    #[arg(long, default_value = "javascript")]
    pub preset: String,

    /// deliver or compute
    #[arg(long, default_value = "deliver")]
    pub mode: String,
}

pub async fn execute(ctx: &mut Context, args: &InitArgs) -> Result<()> {
    let name = string_or_prompt(ctx, args.name.as_deref(), "Enter the project's name:", "name")?;
    let template = string_or_prompt(
        ctx,
        args.template.as_deref(),
        "Enter the template's git URL:",
        "template",
    )?;
    let target = target_dir(&std::env::current_dir()?, &name)?;

    clone(&template, &target).await?;
    let git_dir = target.join(".git");
    if git_dir.exists() {
        fs::remove_dir_all(&git_dir).with_context(|| format!("Failed to remove {}", git_dir.display()))?;
    }

    let manifest = AzionApplicationOptions::new(&name, &args.preset, &args.mode);
    manifest.save(&AzionApplicationOptions::path(&target, DEFAULT_CONFIG_DIR))?;

    let output = SliceOutput::new(
        vec![
            format!("Project {} initialized", name),
            "Next steps:".to_string(),
            format!("  cd {}", name),
            "  azion dev".to_string(),
        ],
        ctx.flags.clone(),
    );
    ctx.print(&output)
}

fn target_dir(cwd: &Path, name: &str) -> Result<PathBuf> {
    let target = cwd.join(name);
    if target.exists() {
        bail!("Directory '{}' already exists", target.display());
    }
    Ok(target)
}

async fn clone(template: &str, target: &Path) -> Result<()> {
    debug!("git clone --depth 1 {} {}", template, target.display());
    let output = Command::new("git")
        .args(["clone", "--depth", "1", template])
        .arg(target)
        .output()
        .await
        .context("Failed to run git. Make sure git is installed")?;

    if !output.status.success() {
        bail!(
            "Failed to clone the template: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_an_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("site")).unwrap();

        let err = target_dir(dir.path(), "site").unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(target_dir(dir.path(), "fresh").unwrap(), dir.path().join("fresh"));
    }
}
