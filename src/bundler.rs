//! The external bundler behind `link` and `dev`, launched through npx

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use tokio::process::Command;
use tracing::debug;

pub const BUNDLER_PACKAGE: &str = "edge-functions";
pub const BUNDLER_VERSION: &str = "4.3.0";

pub struct Bundler {
    dir: PathBuf,
}

impl Bundler {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn version(&self) -> &'static str {
        BUNDLER_VERSION
    }

    /// npx arguments for a bundler invocation
    pub fn args(&self, args: &[&str]) -> Vec<String> {
        let mut full = vec![
            "--yes".to_string(),
            format!("{}@{}", BUNDLER_PACKAGE, BUNDLER_VERSION),
        ];
        full.extend(args.iter().map(|a| a.to_string()));
        full
    }

    /// Run the bundler with inherited stdio, failing on a non-zero exit
    pub async fn run(&self, args: &[&str]) -> Result<()> {
        let full = self.args(args);
        debug!("npx {}", full.join(" "));

        let status = Command::new("npx")
            .args(&full)
            .current_dir(&self.dir)
            .status()
            .await
            .context("Failed to start the bundler. Make sure Node.js and npx are installed")?;

        if !status.success() {
            bail!("The bundler exited with {}", status);
        }
        Ok(())
    }
}
