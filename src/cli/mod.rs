//! CLI commands module

pub mod application;
pub mod command;
pub mod connector;
pub mod context;
pub mod dev;
pub mod domain;
pub mod function;
pub mod init;
pub mod link;
pub mod login;
pub mod logout;
pub mod origin;
pub mod personal_token;
pub mod profiles;
pub mod reset;
pub mod verbs;
pub mod whoami;
pub mod workload;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use self::context::Context;

/// Azion CLI - manage edge applications, domains and functions
#[derive(Parser, Debug)]
#[command(name = "azion")]
#[command(version)]
#[command(about = "Azion edge platform CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Personal token to validate and save in the active profile
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Config root (default ~/.azion)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output
    #[arg(short, long, global = true)]
    pub silent: bool,

    /// Log level: error, warn, info, debug, trace
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Write structured output to this file
    #[arg(long, global = true)]
    pub out: Option<PathBuf>,

    /// Output format: json, yaml, toml
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Disable colors
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a resource
    #[command(subcommand)]
    Create(verbs::CreateCommand),

    /// Update a resource
    #[command(subcommand)]
    Update(verbs::UpdateCommand),

    /// Delete a resource
    #[command(subcommand)]
    Delete(verbs::DeleteCommand),

    /// List resources
    #[command(subcommand)]
    List(verbs::ListCommand),

    /// Show a resource
    #[command(subcommand)]
    Describe(verbs::DescribeCommand),

    /// Log in to your Azion account
    Login(login::LoginArgs),

    /// Log out and revoke the stored token
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Forget the stored token
    Reset,

    /// Manage profiles
    Profiles(profiles::ProfilesArgs),

    /// Create a project from a template
    Init(init::InitArgs),

    /// Link the current directory to Azion
    Link(link::LinkArgs),

    /// Run the project locally
    Dev(dev::DevArgs),
}

impl Commands {
    /// Command path used as the metrics key, e.g. `create domain`
    pub fn path(&self) -> String {
        match self {
            Self::Create(c) => format!("create {}", c.resource()),
            Self::Update(c) => format!("update {}", c.resource()),
            Self::Delete(c) => format!("delete {}", c.resource()),
            Self::List(c) => format!("list {}", c.resource()),
            Self::Describe(c) => format!("describe {}", c.resource()),
            Self::Login(_) => "login".to_string(),
            Self::Logout => "logout".to_string(),
            Self::Whoami => "whoami".to_string(),
            Self::Reset => "reset".to_string(),
            Self::Profiles(p) => format!("profiles {}", p.command.name()),
            Self::Init(_) => "init".to_string(),
            Self::Link(_) => "link".to_string(),
            Self::Dev(_) => "dev".to_string(),
        }
    }

    pub async fn execute(&self, ctx: &mut Context) -> Result<()> {
        match self {
            Self::Create(c) => c.execute(ctx).await,
            Self::Update(c) => c.execute(ctx).await,
            Self::Delete(c) => c.execute(ctx).await,
            Self::List(c) => c.execute(ctx).await,
            Self::Describe(c) => c.execute(ctx).await,
            Self::Login(args) => login::execute(ctx, args).await,
            Self::Logout => logout::execute(ctx).await,
            Self::Whoami => whoami::execute(ctx).await,
            Self::Reset => reset::execute(ctx),
            Self::Profiles(args) => profiles::execute(ctx, args),
            Self::Init(args) => init::execute(ctx, args).await,
            Self::Link(args) => link::execute(ctx, args).await,
            Self::Dev(args) => dev::execute(ctx, args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verb_first_parsing() {
        let cli = Cli::try_parse_from([
            "azion",
            "create",
            "domain",
            "--name",
            "foo",
            "--application-id",
            "42",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.global.format.as_deref(), Some("json"));
        assert_eq!(cli.command.unwrap().path(), "create domain");
    }

    #[test]
    fn personal_token_has_no_update() {
        assert!(Cli::try_parse_from(["azion", "update", "personal-token", "--id", "x"]).is_err());
        let cli = Cli::try_parse_from(["azion", "delete", "personal-token", "--id", "x"]).unwrap();
        assert_eq!(cli.command.unwrap().path(), "delete personal-token");
    }
}
