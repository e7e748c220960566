//! azion - command-line client for the Azion edge platform
//!
//! Manages applications, workloads, functions, connectors, origins, domains and
//! personal tokens, and scaffolds local projects.

mod api;
mod bundler;
mod cli;
mod config;
mod error;
mod metrics;
mod output;
mod schedule;
#[cfg(test)]
mod test_support;

use std::io::{self, Write};

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::storage::BucketDeletion;
use crate::api::AzionClient;
use crate::cli::context::{Context, TerminalPrompt};
use crate::cli::{Cli, GlobalArgs};
use crate::config::Config;
use crate::output::{ErrorOutput, Flags, GeneralOutput};

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli.global);

    let flags = Flags::new(cli.global.format.clone(), cli.global.out.clone(), cli.global.no_color);
    if let Err(e) = run(cli, flags.clone()).await {
        ErrorOutput::new(e.to_string(), flags).exit();
    }
}

/// `--silent` wins, then `--debug`, then RUST_LOG, then `--log-level`
fn init_logging(global: &GlobalArgs) {
    let filter = if global.silent {
        EnvFilter::new("off")
    } else if global.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&global.log_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(io::stderr))
        .init();
}

async fn run(cli: Cli, flags: Flags) -> Result<()> {
    let config = Config::load(cli.global.config.clone())?;
    let out: Box<dyn Write> = if cli.global.silent {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };
    let mut ctx = Context::new(config, flags, cli.global.yes, Box::new(TerminalPrompt), out)?;

    if let Some(ref token) = cli.global.token {
        save_token(&mut ctx, token).await?;
        if cli.command.is_none() {
            let output = GeneralOutput::new(
                format!("Token saved in {}\n", ctx.config.settings_path().display()),
                ctx.flags.clone(),
            );
            return ctx.print(&output);
        }
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    run_schedules(&ctx).await;

    let result = command.execute(&mut ctx).await;

    if ctx.settings.metrics_allowed() {
        let path = ctx.config.metrics_path();
        if let Err(e) = metrics::record(&path, &command.path(), result.is_ok(), Utc::now()) {
            debug!("Could not record metrics: {}", e);
        }
    }

    result
}

/// Validate `--token` against the account API and persist it in the active profile
async fn save_token(ctx: &mut Context, token: &str) -> Result<()> {
    let client = AzionClient::new(&ctx.config, token)?;
    let user = client
        .whoami()
        .await
        .map_err(|e| anyhow!("Failed to validate the token: {}", e))?;

    ctx.set_token(token);
    ctx.settings.token = Some(token.to_string());
    // not a token this CLI minted, so logout has nothing to revoke
    ctx.settings.uuid = None;
    ctx.settings.email = Some(user.email).filter(|e| !e.is_empty());
    ctx.settings.client_id = Some(user.client_id).filter(|c| !c.is_empty());
    ctx.save_settings()
}

/// Retry deferred bucket deletions; never fails the invocation
async fn run_schedules(ctx: &Context) {
    let client = match ctx.client() {
        Ok(client) => client,
        Err(e) => {
            debug!("Skipping scheduled tasks: {}", e);
            return;
        }
    };
    let client = &client;

    schedule::exec_schedules(&ctx.config.schedule_path(), Utc::now(), |name: String| async move {
        match client.buckets().delete_with_objects(&name).await {
            Ok(BucketDeletion::Deleted) => Ok(()),
            Ok(BucketDeletion::Deferred) => Err(anyhow!("Bucket {} is still being emptied", name)),
            Err(e) => Err(anyhow::Error::from(e)),
        }
    })
    .await;
}
