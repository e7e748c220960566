//! `azion link`: attach an existing project directory

use std::path::Path;

use anyhow::Result;
use clap::Args;

use super::command::string_or_prompt;
use super::context::Context;
use crate::bundler::Bundler;
use crate::config::manifest::{AzionApplicationOptions, DEFAULT_CONFIG_DIR};
use crate::output::GeneralOutput;

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Project name; defaults to the directory name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub preset: Option<String>,

    /// deliver or compute
    #[arg(long)]
    pub mode: Option<String>,

    /// Directory that receives azion.json
    #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: String,

    /// Do not run the bundler's init
    #[arg(long)]
    pub skip_framework_build: bool,
}

pub async fn execute(ctx: &mut Context, args: &LinkArgs) -> Result<()> {
    let project = std::env::current_dir()?;
    let name = match args.name {
        Some(ref n) => n.clone(),
        None => string_or_prompt(ctx, dir_name(&project).as_deref(), "Enter the project's name:", "name")?,
    };
    let preset = string_or_prompt(ctx, args.preset.as_deref(), "Enter the framework preset:", "preset")?;
    let mode = string_or_prompt(ctx, args.mode.as_deref(), "Enter the mode (deliver or compute):", "mode")?;

    let path = AzionApplicationOptions::path(&project, &args.config_dir);
    let mut manifest = if path.exists() {
        AzionApplicationOptions::load(&path)?
    } else {
        AzionApplicationOptions::new(&name, &preset, &mode)
    };
    manifest.name = name.clone();
    manifest.preset = preset.clone();
    manifest.mode = mode.clone();

    if !args.skip_framework_build {
        let bundler = Bundler::new(&project);
        bundler.run(&["init", "--name", &name, "--preset", &preset, "--mode", &mode]).await?;
        ctx.settings.last_vulcan_version = Some(bundler.version().to_string());
        ctx.save_settings()?;
    }
    manifest.save(&path)?;

    let output = GeneralOutput::new(
        format!("Project {} linked successfully\n", name),
        ctx.flags.clone(),
    );
    ctx.print(&output)
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn writes_the_manifest_without_the_bundler() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, out) = test_support::context(dir.path(), "http://127.0.0.1:9", &[]);
        let config_dir = dir.path().join("azion");
        let args = LinkArgs {
            name: Some("site".into()),
            preset: Some("react".into()),
            mode: Some("deliver".into()),
            config_dir: config_dir.to_string_lossy().into_owned(),
            skip_framework_build: true,
        };

        execute(&mut ctx, &args).await.unwrap();

        let manifest = AzionApplicationOptions::load(&config_dir.join("azion.json")).unwrap();
        assert_eq!(manifest.name, "site");
        assert_eq!(manifest.preset, "react");
        assert!(manifest.rt_purge.purge_on_publish);
        assert_eq!(out.contents(), "Project site linked successfully\n");
        assert_eq!(ctx.settings.last_vulcan_version, None);
    }
}
