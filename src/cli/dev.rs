//! `azion dev`: build and serve the project locally

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::context::Context;
use crate::bundler::Bundler;

#[derive(Args, Debug)]
pub struct DevArgs {
    #[arg(long, default_value_t = 3333)]
    pub port: u16,

    /// Serve the last build as is
    #[arg(long)]
    pub skip_framework_build: bool,
}

pub async fn execute(ctx: &mut Context, args: &DevArgs) -> Result<()> {
    let bundler = Bundler::new(&std::env::current_dir()?);

    if !args.skip_framework_build {
        info!("Building the project");
        bundler.run(&["build"]).await?;
    }

    ctx.settings.last_vulcan_version = Some(bundler.version().to_string());
    ctx.save_settings()?;

    info!("Starting the local server on port {}", args.port);
    let port = args.port.to_string();
    bundler.run(&["dev", "--port", &port]).await
}
