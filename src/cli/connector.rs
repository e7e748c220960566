//! Edge connector commands

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::command::{
    failed, id_or_prompt, optional_bool, read_request_file, string_or_prompt, ListFlags, ResourceCommand,
};
use super::context::Context;
use crate::api::connector::{Connector, CreateConnectorRequest, UpdateConnectorRequest};
use crate::api::response::ListResponse;
use crate::error::CliError;
use crate::output::{DescribeOutput, Flags, GeneralOutput, ListOutput, Output};

const ASK_ID: &str = "Enter the Connector's ID:";

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Connector type, e.g. http, storage or live_ingest
    #[arg(long = "type")]
    pub connector_type: Option<String>,

    #[arg(long)]
    pub active: Option<String>,

    /// JSON file with the full request body, attributes included
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ResourceCommand for CreateArgs {
    type Request = CreateConnectorRequest;
    type Response = Connector;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        if let Some(ref path) = self.file {
            return Ok(read_request_file(path)?);
        }
        Ok(CreateConnectorRequest {
            name: string_or_prompt(ctx, self.name.as_deref(), "Enter the new Connector's name:", "name")?,
            connector_type: string_or_prompt(
                ctx,
                self.connector_type.as_deref(),
                "Enter the Connector's type:",
                "type",
            )?,
            active: optional_bool("active", self.active.as_deref())?,
            ..Default::default()
        })
    }

    async fn execute(&self, ctx: &Context, request: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .connectors()
            .create(&request)
            .await
            .map_err(|e| failed("create", "connector", e))
    }

    fn render(&self, connector: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Created connector with ID {}\n", connector.id),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub connector_id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub active: Option<String>,

    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ResourceCommand for UpdateArgs {
    type Request = (i64, UpdateConnectorRequest);
    type Response = Connector;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        let id = id_or_prompt(ctx, self.connector_id.as_deref(), ASK_ID, CliError::ConvertConnectorId)?;
        if let Some(ref path) = self.file {
            return Ok((id, read_request_file(path)?));
        }
        Ok((
            id,
            UpdateConnectorRequest {
                name: self.name.clone(),
                active: optional_bool("active", self.active.as_deref())?,
                ..Default::default()
            },
        ))
    }

    async fn execute(&self, ctx: &Context, (id, request): Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .connectors()
            .update(id, &request)
            .await
            .map_err(|e| failed("update", "connector", e))
    }

    fn render(&self, connector: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Updated connector with ID {}\n", connector.id),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(long)]
    pub connector_id: Option<String>,
}

impl ResourceCommand for DeleteArgs {
    type Request = i64;
    type Response = i64;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        id_or_prompt(ctx, self.connector_id.as_deref(), ASK_ID, CliError::ConvertConnectorId)
    }

    async fn execute(&self, ctx: &Context, id: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .connectors()
            .delete(id)
            .await
            .map_err(|e| failed("delete", "connector", e))?;
        Ok(id)
    }

    fn render(&self, id: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(format!("Deleted connector with ID {}\n", id), flags.clone()))
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub list: ListFlags,
}

impl ResourceCommand for ListArgs {
    type Request = ();
    type Response = ListResponse<Connector>;

    fn validate(&self, _ctx: &Context) -> Result<Self::Request> {
        Ok(())
    }

    async fn execute(&self, ctx: &Context, _: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .connectors()
            .list(&self.list.page())
            .await
            .map_err(|e| failed("list", "connectors", e))
    }

    fn render(&self, list: Self::Response, flags: &Flags) -> Box<dyn Output> {
        let output = if self.list.details {
            ListOutput::from_items(
                &["ID", "NAME", "TYPE", "ACTIVE", "LAST EDITOR", "LAST MODIFIED"],
                &["id", "name", "type", "active", "last_editor", "last_modified"],
                &list.results,
                flags.clone(),
            )
        } else {
            ListOutput::from_items(
                &["ID", "NAME", "TYPE"],
                &["id", "name", "type"],
                &list.results,
                flags.clone(),
            )
        };
        Box::new(output)
    }
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[arg(long)]
    pub connector_id: Option<String>,
}

impl ResourceCommand for DescribeArgs {
    type Request = i64;
    type Response = Connector;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        id_or_prompt(ctx, self.connector_id.as_deref(), ASK_ID, CliError::ConvertConnectorId)
    }

    async fn execute(&self, ctx: &Context, id: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .connectors()
            .get(id)
            .await
            .map_err(|e| failed("describe", "connector", e))
    }

    fn render(&self, connector: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(DescribeOutput::new(
            &connector,
            &[
                ("ID", "id"),
                ("Name", "name"),
                ("Type", "type"),
                ("Active", "active"),
                ("Attributes", "attributes"),
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
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn describe_reads_the_type_field() {
        let router = Router::new().route(
            "/v4/edge_connector/connectors/{id}",
            get(|| async {
                Json(json!({"data": {"id": 5, "name": "origin", "type": "http", "active": true}}))
            }),
        );
        let base = test_support::serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, out) = test_support::context(dir.path(), &base, &[]);

        run(&DescribeArgs { connector_id: Some("5".into()) }, &mut ctx).await.unwrap();

        let text = out.contents();
        assert!(text.contains("Type:"));
        assert!(text.contains("http"));
    }
}
