//! Domain commands

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::command::{
    failed, id_or_prompt, optional_bool, read_request_file, string_or_prompt, ListFlags, ResourceCommand,
};
use super::context::Context;
use crate::api::domain::{CreateDomainRequest, Domain, UpdateDomainRequest};
use crate::api::response::ListResponse;
use crate::error::CliError;
use crate::output::{DescribeOutput, Flags, GeneralOutput, ListOutput, Output};

const ASK_ID: &str = "Enter the Domain's ID:";

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Application served by this domain
    #[arg(long)]
    pub application_id: Option<String>,

    /// Comma-separated CNAMEs
    #[arg(long, value_delimiter = ',')]
    pub cnames: Vec<String>,

    /// Serve only through the CNAMEs (true|false)
    #[arg(long)]
    pub cname_access_only: Option<String>,

    #[arg(long)]
    pub digital_certificate_id: Option<i64>,

    #[arg(long)]
    pub active: Option<String>,

    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ResourceCommand for CreateArgs {
    type Request = CreateDomainRequest;
    type Response = Domain;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        if let Some(ref path) = self.file {
            return Ok(read_request_file(path)?);
        }
        let name = string_or_prompt(ctx, self.name.as_deref(), "Enter the new Domain's name:", "name")?;
        let edge_application_id = id_or_prompt(
            ctx,
            self.application_id.as_deref(),
            "Enter the Application's ID this Domain is linked to:",
            CliError::ConvertApplicationId,
        )?;
        Ok(CreateDomainRequest {
            name,
            cnames: self.cnames.clone(),
            cname_access_only: optional_bool("cname-access-only", self.cname_access_only.as_deref())?
                .unwrap_or(false),
            digital_certificate_id: self.digital_certificate_id,
            edge_application_id,
            is_active: optional_bool("active", self.active.as_deref())?.unwrap_or(true),
        })
    }

    async fn execute(&self, ctx: &Context, request: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .domains()
            .create(&request)
            .await
            .map_err(|e| failed("create", "domain", e))
    }

    fn render(&self, domain: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Created domain with ID {}\n", domain.id),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub domain_id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub application_id: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub cnames: Option<Vec<String>>,

    #[arg(long)]
    pub cname_access_only: Option<String>,

    #[arg(long)]
    pub digital_certificate_id: Option<i64>,

    #[arg(long)]
    pub active: Option<String>,

    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ResourceCommand for UpdateArgs {
    type Request = (i64, UpdateDomainRequest);
    type Response = Domain;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        let id = id_or_prompt(ctx, self.domain_id.as_deref(), ASK_ID, CliError::ConvertDomainId)?;
        if let Some(ref path) = self.file {
            return Ok((id, read_request_file(path)?));
        }
        let edge_application_id: Option<i64> = match self.application_id.as_deref() {
            Some(raw) => Some(raw.trim().parse().map_err(|_| CliError::ConvertApplicationId)?),
            None => None,
        };
        Ok((
            id,
            UpdateDomainRequest {
                name: self.name.clone(),
                cnames: self.cnames.clone(),
                cname_access_only: optional_bool("cname-access-only", self.cname_access_only.as_deref())?,
                digital_certificate_id: self.digital_certificate_id,
                edge_application_id,
                is_active: optional_bool("active", self.active.as_deref())?,
            },
        ))
    }

    async fn execute(&self, ctx: &Context, (id, request): Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .domains()
            .update(id, &request)
            .await
            .map_err(|e| failed("update", "domain", e))
    }

    fn render(&self, domain: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Updated domain with ID {}\n", domain.id),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(long)]
    pub domain_id: Option<String>,
}

impl ResourceCommand for DeleteArgs {
    type Request = i64;
    type Response = i64;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        id_or_prompt(ctx, self.domain_id.as_deref(), ASK_ID, CliError::ConvertDomainId)
    }

    async fn execute(&self, ctx: &Context, id: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .domains()
            .delete(id)
            .await
            .map_err(|e| failed("delete", "domain", e))?;
        Ok(id)
    }

    fn render(&self, id: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(format!("Deleted domain with ID {}\n", id), flags.clone()))
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub list: ListFlags,
}

impl ResourceCommand for ListArgs {
    type Request = ();
    type Response = ListResponse<Domain>;

    fn validate(&self, _ctx: &Context) -> Result<Self::Request> {
        Ok(())
    }

    async fn execute(&self, ctx: &Context, _: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .domains()
            .list(&self.list.page())
            .await
            .map_err(|e| failed("list", "domains", e))
    }

    fn render(&self, list: Self::Response, flags: &Flags) -> Box<dyn Output> {
        let output = if self.list.details {
            ListOutput::from_items(
                &["ID", "NAME", "DOMAIN NAME", "APPLICATION ID", "CNAMES", "ACTIVE"],
                &["id", "name", "domain_name", "edge_application_id", "cnames", "is_active"],
                &list.results,
                flags.clone(),
            )
        } else {
            ListOutput::from_items(&["ID", "NAME", "ACTIVE"], &["id", "name", "is_active"], &list.results, flags.clone())
        };
        Box::new(output)
    }
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[arg(long)]
    pub domain_id: Option<String>,
}

impl ResourceCommand for DescribeArgs {
    type Request = i64;
    type Response = Domain;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        id_or_prompt(ctx, self.domain_id.as_deref(), ASK_ID, CliError::ConvertDomainId)
    }

    async fn execute(&self, ctx: &Context, id: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .domains()
            .get(id)
            .await
            .map_err(|e| failed("describe", "domain", e))
    }

    fn render(&self, domain: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(DescribeOutput::new(
            &domain,
            &[
                ("ID", "id"),
                ("Name", "name"),
                ("Domain Name", "domain_name"),
                ("CNAMEs", "cnames"),
                ("CNAME Access Only", "cname_access_only"),
                ("Digital Certificate ID", "digital_certificate_id"),
                ("Application ID", "edge_application_id"),
                ("Active", "is_active"),
                ("Environment", "environment"),
            ],
            flags.clone(),
        ))
    }
}
