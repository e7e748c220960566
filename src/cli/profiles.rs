//! `azion profiles`: named credential sets under the config root

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use super::command::{mask, string_or_prompt};
use super::context::Context;
use crate::config::profiles::{self, DEFAULT_PROFILE};
use crate::config::settings::{self, Settings};
use crate::error::CliError;
use crate::output::{DescribeOutput, GeneralOutput, ListOutput};

#[derive(Args, Debug)]
pub struct ProfilesArgs {
    #[command(subcommand)]
    pub command: ProfilesCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfilesCommand {
    /// List profiles
    List,

    /// Create an empty profile
    Create {
        #[arg(long)]
        name: Option<String>,
    },

    /// Make a profile the active one
    Use {
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a profile other than the active one
    Delete {
        #[arg(long)]
        name: Option<String>,
    },

    /// Show a profile's settings with secrets masked
    Describe {
        /// Defaults to the active profile
        #[arg(long)]
        name: Option<String>,
    },
}

impl ProfilesCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create { .. } => "create",
            Self::Use { .. } => "use",
            Self::Delete { .. } => "delete",
            Self::Describe { .. } => "describe",
        }
    }
}

const ASK_NAME: &str = "Enter the profile name:";

pub fn execute(ctx: &mut Context, args: &ProfilesArgs) -> Result<()> {
    let root = ctx.config.config_dir.clone();

    match args.command {
        ProfilesCommand::List => {
            let active = ctx.config.profile.clone();
            let lines = profiles::list(&root)?
                .into_iter()
                .map(|name| {
                    let marker = if name == active { "*" } else { "" };
                    vec![name, marker.to_string()]
                })
                .collect();
            let output = ListOutput::new(vec!["NAME".into(), "ACTIVE".into()], lines, ctx.flags.clone());
            ctx.print(&output)
        }

        ProfilesCommand::Create { ref name } => {
            let name = string_or_prompt(ctx, name.as_deref(), ASK_NAME, "name")?;
            profiles::create(&root, &name, &Settings::default())?;
            let output = GeneralOutput::new(format!("Profile {} created\n", name), ctx.flags.clone());
            ctx.print(&output)
        }

        ProfilesCommand::Use { ref name } => {
            let name = string_or_prompt(ctx, name.as_deref(), ASK_NAME, "name")?;
            if name != DEFAULT_PROFILE && !profiles::exists(&root, &name) {
                return Err(CliError::ProfileNotFound(name).into());
            }
            profiles::set_active(&root, &name)?;
            let output = GeneralOutput::new(format!("Switched to profile {}\n", name), ctx.flags.clone());
            ctx.print(&output)
        }

        ProfilesCommand::Delete { ref name } => {
            let name = string_or_prompt(ctx, name.as_deref(), ASK_NAME, "name")?;
            if !ctx.confirm(&format!("Delete profile {}?", name))? {
                let output = GeneralOutput::new("Nothing was deleted\n", ctx.flags.clone());
                return ctx.print(&output);
            }
            profiles::delete(&root, &name)?;
            let output = GeneralOutput::new(format!("Profile {} deleted\n", name), ctx.flags.clone());
            ctx.print(&output)
        }

        ProfilesCommand::Describe { ref name } => {
            let name = name.clone().unwrap_or_else(|| ctx.config.profile.clone());
            profiles::validate_name(&name)?;
            if name != DEFAULT_PROFILE && !profiles::exists(&root, &name) {
                return Err(CliError::ProfileNotFound(name).into());
            }
            let loaded = Settings::load(&settings::path(&root, &name))?;
            let view = MaskedProfile::new(&name, &loaded);
            let output = DescribeOutput::new(
                &view,
                &[
                    ("Name", "name"),
                    ("Email", "email"),
                    ("Client ID", "client_id"),
                    ("Token", "token"),
                    ("Token ID", "uuid"),
                    ("S3 Access Key", "s3_access_key"),
                    ("S3 Secret Key", "s3_secret_key"),
                    ("S3 Bucket", "s3_bucket"),
                    ("Metrics", "metrics"),
                ],
                ctx.flags.clone(),
            );
            ctx.print(&output)
        }
    }
}

#[derive(Debug, Serialize)]
struct MaskedProfile {
    name: String,
    email: Option<String>,
    client_id: Option<String>,
    token: Option<String>,
    uuid: Option<String>,
    s3_access_key: Option<String>,
    s3_secret_key: Option<String>,
    s3_bucket: Option<String>,
    metrics: &'static str,
}

impl MaskedProfile {
    fn new(name: &str, s: &Settings) -> Self {
        Self {
            name: name.to_string(),
            email: s.email.clone(),
            client_id: s.client_id.clone(),
            token: s.token.as_deref().map(mask),
            uuid: s.uuid.clone(),
            s3_access_key: s.s3_access_key.as_deref().map(mask),
            s3_secret_key: s.s3_secret_key.as_deref().map(mask),
            s3_bucket: s.s3_bucket.clone(),
            metrics: match s.authorize_metrics_collection {
                settings::METRICS_ALLOWED => "allowed",
                settings::METRICS_DENIED => "denied",
                _ => "not asked",
            },
        }
    }
}
