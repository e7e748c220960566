//! Verb-first command groups: `azion <verb> <resource>`

use anyhow::Result;
use clap::Subcommand;

use super::command::run;
use super::context::Context;
use super::{application, connector, domain, function, origin, personal_token, workload};

#[derive(Subcommand, Debug)]
pub enum CreateCommand {
    /// Create an application
    Application(application::CreateArgs),
    /// Create a connector
    Connector(connector::CreateArgs),
    /// Create a domain
    Domain(domain::CreateArgs),
    /// Create a function
    Function(function::CreateArgs),
    /// Create an origin in an application
    Origin(origin::CreateArgs),
    /// Create a personal token
    PersonalToken(personal_token::CreateArgs),
    /// Create a workload
    Workload(workload::CreateArgs),
}

#[derive(Subcommand, Debug)]
pub enum UpdateCommand {
    /// Update an application
    Application(application::UpdateArgs),
    /// Update a connector
    Connector(connector::UpdateArgs),
    /// Update a domain
    Domain(domain::UpdateArgs),
    /// Update a function
    Function(function::UpdateArgs),
    /// Update an origin
    Origin(origin::UpdateArgs),
    /// Update a workload
    Workload(workload::UpdateArgs),
}

#[derive(Subcommand, Debug)]
pub enum DeleteCommand {
    /// Delete an application, or with --cascade the whole linked project
    Application(application::DeleteArgs),
    /// Delete a connector
    Connector(connector::DeleteArgs),
    /// Delete a domain
    Domain(domain::DeleteArgs),
    /// Delete a function
    Function(function::DeleteArgs),
    /// Delete an origin
    Origin(origin::DeleteArgs),
    /// Delete a personal token
    PersonalToken(personal_token::DeleteArgs),
    /// Delete a workload
    Workload(workload::DeleteArgs),
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// List applications
    Application(application::ListArgs),
    /// List connectors
    Connector(connector::ListArgs),
    /// List domains
    Domain(domain::ListArgs),
    /// List functions
    Function(function::ListArgs),
    /// List the origins of an application
    Origin(origin::ListArgs),
    /// List personal tokens
    PersonalToken(personal_token::ListArgs),
    /// List workloads
    Workload(workload::ListArgs),
}

#[derive(Subcommand, Debug)]
pub enum DescribeCommand {
    /// Show an application
    Application(application::DescribeArgs),
    /// Show a connector
    Connector(connector::DescribeArgs),
    /// Show a domain
    Domain(domain::DescribeArgs),
    /// Show a function
    Function(function::DescribeArgs),
    /// Show an origin
    Origin(origin::DescribeArgs),
    /// Show a personal token
    PersonalToken(personal_token::DescribeArgs),
    /// Show a workload
    Workload(workload::DescribeArgs),
}

impl CreateCommand {
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Application(_) => "application",
            Self::Connector(_) => "connector",
            Self::Domain(_) => "domain",
            Self::Function(_) => "function",
            Self::Origin(_) => "origin",
            Self::PersonalToken(_) => "personal-token",
            Self::Workload(_) => "workload",
        }
    }

    pub async fn execute(&self, ctx: &mut Context) -> Result<()> {
        match self {
            Self::Application(args) => run(args, ctx).await,
            Self::Connector(args) => run(args, ctx).await,
            Self::Domain(args) => run(args, ctx).await,
            Self::Function(args) => run(args, ctx).await,
            Self::Origin(args) => run(args, ctx).await,
            Self::PersonalToken(args) => run(args, ctx).await,
            Self::Workload(args) => run(args, ctx).await,
        }
    }
}

impl UpdateCommand {
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Application(_) => "application",
            Self::Connector(_) => "connector",
            Self::Domain(_) => "domain",
            Self::Function(_) => "function",
            Self::Origin(_) => "origin",
            Self::Workload(_) => "workload",
        }
    }

    pub async fn execute(&self, ctx: &mut Context) -> Result<()> {
        match self {
            Self::Application(args) => run(args, ctx).await,
            Self::Connector(args) => run(args, ctx).await,
            Self::Domain(args) => run(args, ctx).await,
            Self::Function(args) => run(args, ctx).await,
            Self::Origin(args) => run(args, ctx).await,
            Self::Workload(args) => run(args, ctx).await,
        }
    }
}

impl DeleteCommand {
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Application(_) => "application",
            Self::Connector(_) => "connector",
            Self::Domain(_) => "domain",
            Self::Function(_) => "function",
            Self::Origin(_) => "origin",
            Self::PersonalToken(_) => "personal-token",
            Self::Workload(_) => "workload",
        }
    }

    pub async fn execute(&self, ctx: &mut Context) -> Result<()> {
        match self {
            Self::Application(args) => run(args, ctx).await,
            Self::Connector(args) => run(args, ctx).await,
            Self::Domain(args) => run(args, ctx).await,
            Self::Function(args) => run(args, ctx).await,
            Self::Origin(args) => run(args, ctx).await,
            Self::PersonalToken(args) => run(args, ctx).await,
            Self::Workload(args) => run(args, ctx).await,
        }
    }
}

impl ListCommand {
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Application(_) => "application",
            Self::Connector(_) => "connector",
            Self::Domain(_) => "domain",
            Self::Function(_) => "function",
            Self::Origin(_) => "origin",
            Self::PersonalToken(_) => "personal-token",
            Self::Workload(_) => "workload",
        }
    }

    pub async fn execute(&self, ctx: &mut Context) -> Result<()> {
        match self {
            Self::Application(args) => run(args, ctx).await,
            Self::Connector(args) => run(args, ctx).await,
            Self::Domain(args) => run(args, ctx).await,
            Self::Function(args) => run(args, ctx).await,
            Self::Origin(args) => run(args, ctx).await,
            Self::PersonalToken(args) => run(args, ctx).await,
            Self::Workload(args) => run(args, ctx).await,
        }
    }
}

impl DescribeCommand {
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Application(_) => "application",
            Self::Connector(_) => "connector",
            Self::Domain(_) => "domain",
            Self::Function(_) => "function",
            Self::Origin(_) => "origin",
            Self::PersonalToken(_) => "personal-token",
            Self::Workload(_) => "workload",
        }
    }

    pub async fn execute(&self, ctx: &mut Context) -> Result<()> {
        match self {
            Self::Application(args) => run(args, ctx).await,
            Self::Connector(args) => run(args, ctx).await,
            Self::Domain(args) => run(args, ctx).await,
            Self::Function(args) => run(args, ctx).await,
            Self::Origin(args) => run(args, ctx).await,
            Self::PersonalToken(args) => run(args, ctx).await,
            Self::Workload(args) => run(args, ctx).await,
        }
    }
}
