//! Origin commands. Origins belong to an application and are addressed by key.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::command::{
    failed, id_or_prompt, mask, optional_bool, read_request_file, string_or_prompt, ListFlags,
    ResourceCommand,
};
use super::context::Context;
use crate::api::origin::{CreateOriginRequest, Origin, OriginAddress, UpdateOriginRequest};
use crate::api::response::ListResponse;
use crate::error::CliError;
use crate::output::{DescribeOutput, Flags, GeneralOutput, ListOutput, Output};

const ASK_APPLICATION: &str = "Enter the Application's ID this Origin belongs to:";
const ASK_KEY: &str = "Enter the Origin's key:";
const DEFAULT_HOST_HEADER: &str = "${host}";

/// Optional origin settings shared by create and update
#[derive(Args, Debug, Default)]
pub struct OriginOptions {
    /// single_origin, load_balancer or live_ingest
    #[arg(long)]
    pub origin_type: Option<String>,

    /// preserve, http or https
    #[arg(long)]
    pub origin_protocol_policy: Option<String>,

    #[arg(long)]
    pub origin_path: Option<String>,

    #[arg(long)]
    pub hmac_authentication: Option<String>,

    #[arg(long)]
    pub hmac_region_name: Option<String>,

    #[arg(long)]
    pub hmac_access_key: Option<String>,

    #[arg(long)]
    pub hmac_secret_key: Option<String>,
}

fn addresses(raw: &[String]) -> Vec<OriginAddress> {
    raw.iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(OriginAddress::new)
        .collect()
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub application_id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    /// Comma-separated origin addresses
    #[arg(long, value_delimiter = ',')]
    pub addresses: Vec<String>,

    #[arg(long)]
    pub host_header: Option<String>,

    #[command(flatten)]
    pub options: OriginOptions,

    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ResourceCommand for CreateArgs {
    type Request = (i64, CreateOriginRequest);
    type Response = Origin;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        let application_id = id_or_prompt(
            ctx,
            self.application_id.as_deref(),
            ASK_APPLICATION,
            CliError::ConvertApplicationId,
        )?;
        if let Some(ref path) = self.file {
            return Ok((application_id, read_request_file(path)?));
        }
        let name = string_or_prompt(ctx, self.name.as_deref(), "Enter the new Origin's name:", "name")?;
        let mut addrs = addresses(&self.addresses);
        if addrs.is_empty() {
            let answer = string_or_prompt(ctx, None, "Enter the Origin's addresses (comma-separated):", "addresses")?;
            let split: Vec<String> = answer.split(',').map(str::to_string).collect();
            addrs = addresses(&split);
        }
        let opts = &self.options;
        Ok((
            application_id,
            CreateOriginRequest {
                name,
                addresses: addrs,
                host_header: self
                    .host_header
                    .clone()
                    .unwrap_or_else(|| DEFAULT_HOST_HEADER.to_string()),
                origin_type: opts.origin_type.clone(),
                origin_protocol_policy: opts.origin_protocol_policy.clone(),
                origin_path: opts.origin_path.clone(),
                hmac_authentication: optional_bool("hmac-authentication", opts.hmac_authentication.as_deref())?,
                hmac_region_name: opts.hmac_region_name.clone(),
                hmac_access_key: opts.hmac_access_key.clone(),
                hmac_secret_key: opts.hmac_secret_key.clone(),
            },
        ))
    }

    async fn execute(&self, ctx: &Context, (application_id, request): Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .origins()
            .create(application_id, &request)
            .await
            .map_err(|e| failed("create", "origin", e))
    }

    fn render(&self, origin: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Created origin with ID {}\n", origin.origin_key),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub application_id: Option<String>,

    #[arg(long)]
    pub origin_key: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub addresses: Option<Vec<String>>,

    #[arg(long)]
    pub host_header: Option<String>,

    #[command(flatten)]
    pub options: OriginOptions,

    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ResourceCommand for UpdateArgs {
    type Request = (i64, String, UpdateOriginRequest);
    type Response = Origin;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        let application_id = id_or_prompt(
            ctx,
            self.application_id.as_deref(),
            ASK_APPLICATION,
            CliError::ConvertApplicationId,
        )?;
        let key = string_or_prompt(ctx, self.origin_key.as_deref(), ASK_KEY, "origin-key")?;
        if let Some(ref path) = self.file {
            return Ok((application_id, key, read_request_file(path)?));
        }
        let opts = &self.options;
        Ok((
            application_id,
            key,
            UpdateOriginRequest {
                name: self.name.clone(),
                addresses: self.addresses.as_deref().map(addresses),
                host_header: self.host_header.clone(),
                origin_type: opts.origin_type.clone(),
                origin_protocol_policy: opts.origin_protocol_policy.clone(),
                origin_path: opts.origin_path.clone(),
                hmac_authentication: optional_bool("hmac-authentication", opts.hmac_authentication.as_deref())?,
                hmac_region_name: opts.hmac_region_name.clone(),
                hmac_access_key: opts.hmac_access_key.clone(),
                hmac_secret_key: opts.hmac_secret_key.clone(),
            },
        ))
    }

    async fn execute(&self, ctx: &Context, (application_id, key, request): Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .origins()
            .update(application_id, &key, &request)
            .await
            .map_err(|e| failed("update", "origin", e))
    }

    fn render(&self, origin: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Updated origin with ID {}\n", origin.origin_key),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(long)]
    pub application_id: Option<String>,

    #[arg(long)]
    pub origin_key: Option<String>,
}

impl ResourceCommand for DeleteArgs {
    type Request = (i64, String);
    type Response = String;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        let application_id = id_or_prompt(
            ctx,
            self.application_id.as_deref(),
            ASK_APPLICATION,
            CliError::ConvertApplicationId,
        )?;
        let key = string_or_prompt(ctx, self.origin_key.as_deref(), ASK_KEY, "origin-key")?;
        Ok((application_id, key))
    }

    async fn execute(&self, ctx: &Context, (application_id, key): Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .origins()
            .delete(application_id, &key)
            .await
            .map_err(|e| failed("delete", "origin", e))?;
        Ok(key)
    }

    fn render(&self, key: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(format!("Deleted origin with ID {}\n", key), flags.clone()))
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long)]
    pub application_id: Option<String>,

    #[command(flatten)]
    pub list: ListFlags,
}

impl ResourceCommand for ListArgs {
    type Request = i64;
    type Response = ListResponse<Origin>;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        id_or_prompt(
            ctx,
            self.application_id.as_deref(),
            ASK_APPLICATION,
            CliError::ConvertApplicationId,
        )
    }

    async fn execute(&self, ctx: &Context, application_id: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .origins()
            .list(application_id, &self.list.page())
            .await
            .map_err(|e| failed("list", "origins", e))
    }

    fn render(&self, list: Self::Response, flags: &Flags) -> Box<dyn Output> {
        let output = if self.list.details {
            ListOutput::from_items(
                &["ID", "KEY", "NAME", "TYPE", "HOST HEADER", "PROTOCOL POLICY", "ADDRESSES"],
                &["origin_id", "origin_key", "name", "origin_type", "host_header", "origin_protocol_policy", "addresses"],
                &list.results,
                flags.clone(),
            )
        } else {
            ListOutput::from_items(
                &["ID", "KEY", "NAME"],
                &["origin_id", "origin_key", "name"],
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
    pub application_id: Option<String>,

    #[arg(long)]
    pub origin_key: Option<String>,
}

impl ResourceCommand for DescribeArgs {
    type Request = (i64, String);
    type Response = Origin;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        let application_id = id_or_prompt(
            ctx,
            self.application_id.as_deref(),
            ASK_APPLICATION,
            CliError::ConvertApplicationId,
        )?;
        let key = string_or_prompt(ctx, self.origin_key.as_deref(), ASK_KEY, "origin-key")?;
        Ok((application_id, key))
    }

    async fn execute(&self, ctx: &Context, (application_id, key): Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .origins()
            .get(application_id, &key)
            .await
            .map_err(|e| failed("describe", "origin", e))
    }

    fn render(&self, mut origin: Self::Response, flags: &Flags) -> Box<dyn Output> {
        if !origin.hmac_secret_key.is_empty() {
            origin.hmac_secret_key = mask(&origin.hmac_secret_key);
        }
        Box::new(DescribeOutput::new(
            &origin,
            &[
                ("Origin ID", "origin_id"),
                ("Origin Key", "origin_key"),
                ("Name", "name"),
                ("Origin Type", "origin_type"),
                ("Addresses", "addresses"),
                ("Origin Protocol Policy", "origin_protocol_policy"),
                ("Redirection Enabled", "is_origin_redirection_enabled"),
                ("Host Header", "host_header"),
                ("Method", "method"),
                ("Origin Path", "origin_path"),
                ("Connection Timeout", "connection_timeout"),
                ("Timeout Between Bytes", "timeout_between_bytes"),
                ("HMAC Authentication", "hmac_authentication"),
                ("HMAC Region Name", "hmac_region_name"),
                ("HMAC Access Key", "hmac_access_key"),
                ("HMAC Secret Key", "hmac_secret_key"),
            ],
            flags.clone(),
        ))
    }
}
