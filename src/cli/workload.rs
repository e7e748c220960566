//! Workload commands

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::command::{
    failed, id_or_prompt, optional_bool, read_request_file, string_or_prompt, ListFlags, ResourceCommand,
};
use super::context::Context;
use crate::api::response::ListResponse;
use crate::api::workload::{CreateWorkloadRequest, UpdateWorkloadRequest, Workload};
use crate::error::CliError;
use crate::output::{DescribeOutput, Flags, GeneralOutput, ListOutput, Output};

const ASK_ID: &str = "Enter the Workload's ID:";

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub active: Option<String>,

    /// Infrastructure id (1 production, 2 staging)
    #[arg(long)]
    pub infrastructure: Option<i64>,

    /// Comma-separated domains served by the workload
    #[arg(long, value_delimiter = ',')]
    pub domains: Vec<String>,

    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ResourceCommand for CreateArgs {
    type Request = CreateWorkloadRequest;
    type Response = Workload;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        if let Some(ref path) = self.file {
            return Ok(read_request_file(path)?);
        }
        Ok(CreateWorkloadRequest {
            name: string_or_prompt(ctx, self.name.as_deref(), "Enter the new Workload's name:", "name")?,
            active: optional_bool("active", self.active.as_deref())?,
            infrastructure: self.infrastructure,
            domains: self.domains.clone(),
        })
    }

    async fn execute(&self, ctx: &Context, request: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .workloads()
            .create(&request)
            .await
            .map_err(|e| failed("create", "workload", e))
    }

    fn render(&self, workload: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Created workload with ID {}\n", workload.id),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub workload_id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub active: Option<String>,

    #[arg(long)]
    pub infrastructure: Option<i64>,

    #[arg(long, value_delimiter = ',')]
    pub domains: Option<Vec<String>>,

    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ResourceCommand for UpdateArgs {
    type Request = (i64, UpdateWorkloadRequest);
    type Response = Workload;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        let id = id_or_prompt(ctx, self.workload_id.as_deref(), ASK_ID, CliError::ConvertWorkloadId)?;
        if let Some(ref path) = self.file {
            return Ok((id, read_request_file(path)?));
        }
        Ok((
            id,
            UpdateWorkloadRequest {
                name: self.name.clone(),
                active: optional_bool("active", self.active.as_deref())?,
                infrastructure: self.infrastructure,
                domains: self.domains.clone(),
            },
        ))
    }

    async fn execute(&self, ctx: &Context, (id, request): Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .workloads()
            .update(id, &request)
            .await
            .map_err(|e| failed("update", "workload", e))
    }

    fn render(&self, workload: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Updated workload with ID {}\n", workload.id),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(long)]
    pub workload_id: Option<String>,
}

impl ResourceCommand for DeleteArgs {
    type Request = i64;
    type Response = i64;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        id_or_prompt(ctx, self.workload_id.as_deref(), ASK_ID, CliError::ConvertWorkloadId)
    }

    async fn execute(&self, ctx: &Context, id: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .workloads()
            .delete(id)
            .await
            .map_err(|e| failed("delete", "workload", e))?;
        Ok(id)
    }

    fn render(&self, id: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(format!("Deleted workload with ID {}\n", id), flags.clone()))
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub list: ListFlags,
}

impl ResourceCommand for ListArgs {
    type Request = ();
    type Response = ListResponse<Workload>;

    fn validate(&self, _ctx: &Context) -> Result<Self::Request> {
        Ok(())
    }

    async fn execute(&self, ctx: &Context, _: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .workloads()
            .list(&self.list.page())
            .await
            .map_err(|e| failed("list", "workloads", e))
    }

    fn render(&self, list: Self::Response, flags: &Flags) -> Box<dyn Output> {
        let output = if self.list.details {
            ListOutput::from_items(
                &["ID", "NAME", "ACTIVE", "WORKLOAD DOMAIN", "DOMAINS", "LAST MODIFIED"],
                &["id", "name", "active", "workload_domain", "domains", "last_modified"],
                &list.results,
                flags.clone(),
            )
        } else {
            ListOutput::from_items(&["ID", "NAME", "ACTIVE"], &["id", "name", "active"], &list.results, flags.clone())
        };
        Box::new(output)
    }
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[arg(long)]
    pub workload_id: Option<String>,
}

impl ResourceCommand for DescribeArgs {
    type Request = i64;
    type Response = Workload;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        id_or_prompt(ctx, self.workload_id.as_deref(), ASK_ID, CliError::ConvertWorkloadId)
    }

    async fn execute(&self, ctx: &Context, id: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .workloads()
            .get(id)
            .await
            .map_err(|e| failed("describe", "workload", e))
    }

    fn render(&self, workload: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(DescribeOutput::new(
            &workload,
            &[
                ("ID", "id"),
                ("Name", "name"),
                ("Active", "active"),
                ("Infrastructure", "infrastructure"),
                ("Workload Domain", "workload_domain"),
                ("Domains", "domains"),
                ("Last Editor", "last_editor"),
                ("Last Modified", "last_modified"),
            ],
            flags.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command::run;
    use crate::test_support;
    use axum::http::StatusCode;
    use axum::routing::delete;
    use axum::Router;

    #[tokio::test]
    async fn delete_reports_the_id() {
        let router = Router::new().route("/v4/workspace/workloads/77", delete(|| async { StatusCode::NO_CONTENT }));
        let base = test_support::serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, out) = test_support::context(dir.path(), &base, &[]);

        run(&DeleteArgs { workload_id: Some("77".into()) }, &mut ctx).await.unwrap();

        assert_eq!(out.contents(), "Deleted workload with ID 77\n");
    }
}
