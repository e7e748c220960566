//! Application commands, including the cascade delete of a linked project

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;
use tracing::{debug, info};

use super::command::{
    failed, id_or_prompt, optional_bool, read_request_file, string_or_prompt, ListFlags, ResourceCommand,
};
use super::context::Context;
use crate::api::application::{Application, CreateApplicationRequest, UpdateApplicationRequest};
use crate::api::response::ListResponse;
use crate::api::storage::BucketDeletion;
use crate::config::manifest::{AzionApplicationOptions, DEFAULT_CONFIG_DIR};
use crate::error::CliError;
use crate::output::{DescribeOutput, Flags, GeneralOutput, ListOutput, Output};
use crate::schedule::{self, DELETE_BUCKET};

const ASK_ID: &str = "Enter the Application's ID:";

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Application name
    #[arg(long)]
    pub name: Option<String>,

    /// Whether the application is active (true|false)
    #[arg(long)]
    pub active: Option<String>,

    /// Whether debug rules are enabled (true|false)
    #[arg(long)]
    pub debug_rules: Option<String>,

    /// JSON file with the full request body
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ResourceCommand for CreateArgs {
    type Request = CreateApplicationRequest;
    type Response = Application;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        if let Some(ref path) = self.file {
            return Ok(read_request_file(path)?);
        }
        Ok(CreateApplicationRequest {
            name: string_or_prompt(ctx, self.name.as_deref(), "Enter the new Application's name:", "name")?,
            active: optional_bool("active", self.active.as_deref())?,
            debug: optional_bool("debug-rules", self.debug_rules.as_deref())?,
            ..Default::default()
        })
    }

    async fn execute(&self, ctx: &Context, request: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .applications()
            .create(&request)
            .await
            .map_err(|e| failed("create", "application", e))
    }

    fn render(&self, app: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Created application with ID {}\n", app.id),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub application_id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub active: Option<String>,

    #[arg(long)]
    pub debug_rules: Option<String>,

    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ResourceCommand for UpdateArgs {
    type Request = (i64, UpdateApplicationRequest);
    type Response = Application;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        let id = id_or_prompt(ctx, self.application_id.as_deref(), ASK_ID, CliError::ConvertApplicationId)?;
        if let Some(ref path) = self.file {
            return Ok((id, read_request_file(path)?));
        }
        Ok((
            id,
            UpdateApplicationRequest {
                name: self.name.clone(),
                active: optional_bool("active", self.active.as_deref())?,
                debug: optional_bool("debug-rules", self.debug_rules.as_deref())?,
                ..Default::default()
            },
        ))
    }

    async fn execute(&self, ctx: &Context, (id, request): Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .applications()
            .update(id, &request)
            .await
            .map_err(|e| failed("update", "application", e))
    }

    fn render(&self, app: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Updated application with ID {}\n", app.id),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(long)]
    pub application_id: Option<String>,

    /// Also delete the function, workload and bucket recorded in azion.json
    #[arg(long)]
    pub cascade: bool,

    /// Directory holding azion.json, relative to the current directory
    #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: String,
}

pub enum DeleteTarget {
    Single(i64),
    Cascade {
        path: PathBuf,
        manifest: AzionApplicationOptions,
    },
}

pub enum Deleted {
    Single(i64),
    Cascade {
        id: i64,
        deferred_bucket: Option<String>,
    },
}

impl ResourceCommand for DeleteArgs {
    type Request = DeleteTarget;
    type Response = Deleted;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        if !self.cascade {
            let id = id_or_prompt(ctx, self.application_id.as_deref(), ASK_ID, CliError::ConvertApplicationId)?;
            return Ok(DeleteTarget::Single(id));
        }
        let path = AzionApplicationOptions::path(&std::env::current_dir()?, &self.config_dir);
        let manifest = AzionApplicationOptions::load(&path)?;
        Ok(DeleteTarget::Cascade { path, manifest })
    }

    async fn execute(&self, ctx: &Context, target: Self::Request) -> Result<Self::Response> {
        match target {
            DeleteTarget::Single(id) => {
                ctx.client()?
                    .applications()
                    .delete(id)
                    .await
                    .map_err(|e| failed("delete", "application", e))?;
                Ok(Deleted::Single(id))
            }
            DeleteTarget::Cascade { path, manifest } => cascade(ctx, &path, manifest).await,
        }
    }

    fn render(&self, deleted: Self::Response, flags: &Flags) -> Box<dyn Output> {
        let message = match deleted {
            Deleted::Single(id) => format!("Deleted application with ID {}\n", id),
            Deleted::Cascade {
                id,
                deferred_bucket: None,
            } => format!("Deleted application with ID {} and its dependent resources\n", id),
            Deleted::Cascade {
                id,
                deferred_bucket: Some(bucket),
            } => format!(
                "Deleted application with ID {} and its dependent resources\nBucket {} is still being emptied and will be deleted within 24 hours\n",
                id, bucket
            ),
        };
        Box::new(GeneralOutput::new(message, flags.clone()))
    }
}

/// Delete everything the manifest points at. Every failure is collected; the
/// manifest keeps the entries that could not be removed.
async fn cascade(ctx: &Context, path: &std::path::Path, mut manifest: AzionApplicationOptions) -> Result<Deleted> {
    let id = manifest.application.id;
    if id == 0 {
        return Err(anyhow!(
            "The manifest at {} has no application to delete",
            path.display()
        ));
    }

    let client = ctx.client()?;
    let mut errors = Vec::new();
    let mut deferred_bucket = None;

    if manifest.function.id != 0 {
        match client.functions().delete(manifest.function.id).await {
            Ok(()) => manifest.function = Default::default(),
            Err(e) => errors.push(failed("delete", "function", e)),
        }
    }

    if manifest.workload.id != 0 {
        match client.workloads().delete(manifest.workload.id).await {
            Ok(()) => manifest.workload = Default::default(),
            Err(e) => errors.push(failed("delete", "workload", e)),
        }
    }

    match client.applications().delete(id).await {
        Ok(()) => {
            manifest.application = Default::default();
            manifest.origin.clear();
        }
        Err(e) => errors.push(failed("delete", "application", e)),
    }

    if !manifest.bucket.is_empty() {
        let bucket = manifest.bucket.clone();
        match client.buckets().delete_with_objects(&bucket).await {
            Ok(BucketDeletion::Deleted) => manifest.bucket.clear(),
            Ok(BucketDeletion::Deferred) => {
                info!("Bucket {} is not empty yet, scheduling its deletion", bucket);
                match schedule::new_schedule(&ctx.config.schedule_path(), &bucket, DELETE_BUCKET) {
                    Ok(()) => {
                        manifest.bucket.clear();
                        deferred_bucket = Some(bucket);
                    }
                    Err(e) => errors.push(anyhow!("Failed to schedule the deletion of bucket {}: {}", bucket, e)),
                }
            }
            Err(e) => errors.push(failed("delete", "bucket", e)),
        }
    }

    if let Err(e) = manifest.save(path) {
        debug!("Could not update {}: {}", path.display(), e);
        errors.push(e);
    }

    if errors.is_empty() {
        return Ok(Deleted::Cascade { id, deferred_bucket });
    }
    let combined: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    Err(anyhow!("Failed to delete in cascade:\n{}", combined.join("\n")))
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub list: ListFlags,
}

impl ResourceCommand for ListArgs {
    type Request = ();
    type Response = ListResponse<Application>;

    fn validate(&self, _ctx: &Context) -> Result<Self::Request> {
        Ok(())
    }

    async fn execute(&self, ctx: &Context, _: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .applications()
            .list(&self.list.page())
            .await
            .map_err(|e| failed("list", "applications", e))
    }

    fn render(&self, list: Self::Response, flags: &Flags) -> Box<dyn Output> {
        let output = if self.list.details {
            ListOutput::from_items(
                &["ID", "NAME", "ACTIVE", "DEBUG", "LAST EDITOR", "LAST MODIFIED"],
                &["id", "name", "active", "debug", "last_editor", "last_modified"],
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
    pub application_id: Option<String>,
}

impl ResourceCommand for DescribeArgs {
    type Request = i64;
    type Response = Application;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        id_or_prompt(ctx, self.application_id.as_deref(), ASK_ID, CliError::ConvertApplicationId)
    }

    async fn execute(&self, ctx: &Context, id: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .applications()
            .get(id)
            .await
            .map_err(|e| failed("describe", "application", e))
    }

    fn render(&self, app: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(DescribeOutput::new(
            &app,
            &[
                ("ID", "id"),
                ("Name", "name"),
                ("Active", "active"),
                ("Debug", "debug"),
                ("Last Editor", "last_editor"),
                ("Last Modified", "last_modified"),
                ("Modules", "modules"),
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
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn invalid_prompted_id_is_rejected_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, out) = test_support::context(dir.path(), "http://127.0.0.1:9", &["invalid"]);
        let args = DescribeArgs { application_id: None };

        let err = run(&args, &mut ctx).await.unwrap_err();

        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::ConvertApplicationId)));
        assert!(out.contents().is_empty());
    }

    #[tokio::test]
    async fn missing_request_file_makes_no_call() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/v4/edge_application/applications",
            post(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Json(json!({"data": {"id": 1}})) }
            }),
        );
        let base = test_support::serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, _) = test_support::context(dir.path(), &base, &[]);
        let args = CreateArgs {
            name: None,
            active: None,
            debug_rules: None,
            file: Some(dir.path().join("missing.json")),
        };

        let err = run(&args, &mut ctx).await.unwrap_err();

        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::UnmarshalReader)));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_prints_the_new_id() {
        let router = Router::new().route(
            "/v4/edge_application/applications",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["name"], "site");
                assert_eq!(body["active"], true);
                Json(json!({"data": {"id": 1700, "name": "site", "active": true}}))
            }),
        );
        let base = test_support::serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, out) = test_support::context(dir.path(), &base, &[]);
        let args = CreateArgs {
            name: Some("site".into()),
            active: Some("true".into()),
            debug_rules: None,
            file: None,
        };

        run(&args, &mut ctx).await.unwrap();

        assert_eq!(out.contents(), "Created application with ID 1700\n");
    }

    #[tokio::test]
    async fn list_renders_a_table() {
        let router = Router::new().route(
            "/v4/edge_application/applications",
            get(|| async {
                Json(json!({"count": 2, "results": [
                    {"id": 1, "name": "one", "active": true},
                    {"id": 2, "name": "two", "active": false}
                ]}))
            }),
        );
        let base = test_support::serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, out) = test_support::context(dir.path(), &base, &[]);
        let args = ListArgs {
            list: ListFlags {
                details: false,
                page: 1,
                page_size: 10,
            },
        };

        run(&args, &mut ctx).await.unwrap();

        let text = out.contents();
        assert!(text.starts_with("ID"));
        assert!(text.contains("one"));
        assert!(text.contains("false"));
    }

    fn manifest_in(dir: &std::path::Path, bucket: &str) -> PathBuf {
        let path = AzionApplicationOptions::path(dir, DEFAULT_CONFIG_DIR);
        let mut manifest = AzionApplicationOptions::new("site", "javascript", "deliver");
        manifest.application.id = 10;
        manifest.function.id = 20;
        manifest.workload.id = 30;
        manifest.bucket = bucket.to_string();
        manifest.save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn cascade_collects_every_failure() {
        let router = Router::new()
            .route(
                "/v4/edge_functions/functions/20",
                delete(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/v4/workspace/workloads/30", delete(|| async { StatusCode::NO_CONTENT }))
            .route(
                "/v4/edge_application/applications/10",
                delete(|| async { (StatusCode::NOT_FOUND, "") }),
            );
        let base = test_support::serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let path = manifest_in(dir.path(), "");
        let (ctx, _) = test_support::context(dir.path(), &base, &[]);

        let manifest = AzionApplicationOptions::load(&path).unwrap();
        let err = cascade(&ctx, &path, manifest).await.err().unwrap().to_string();

        assert!(err.contains("Failed to delete the function"));
        assert!(err.contains("Failed to delete the application"));
        assert!(!err.contains("workload"));

        let saved = AzionApplicationOptions::load(&path).unwrap();
        assert_eq!(saved.function.id, 20);
        assert_eq!(saved.workload.id, 0);
        assert_eq!(saved.application.id, 10);
    }

    #[tokio::test]
    async fn cascade_schedules_a_bucket_that_is_not_empty() {
        let router = Router::new()
            .route("/v4/edge_functions/functions/20", delete(|| async { StatusCode::NO_CONTENT }))
            .route("/v4/workspace/workloads/30", delete(|| async { StatusCode::NO_CONTENT }))
            .route(
                "/v4/edge_application/applications/10",
                delete(|| async { StatusCode::NO_CONTENT }),
            )
            .route(
                "/v4/storage/buckets/site-bucket",
                delete(|| async { (StatusCode::CONFLICT, "bucket is not empty") }),
            )
            .route(
                "/v4/storage/buckets/site-bucket/objects",
                get(|| async { Json(json!({"count": 0, "results": []})) }),
            );
        let base = test_support::serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let path = manifest_in(dir.path(), "site-bucket");
        let (ctx, _) = test_support::context(dir.path(), &base, &[]);

        let manifest = AzionApplicationOptions::load(&path).unwrap();
        let deleted = cascade(&ctx, &path, manifest).await.unwrap();

        match deleted {
            Deleted::Cascade { id, deferred_bucket } => {
                assert_eq!(id, 10);
                assert_eq!(deferred_bucket.as_deref(), Some("site-bucket"));
            }
            Deleted::Single(_) => panic!("expected a cascade result"),
        }
        let scheduled = std::fs::read_to_string(ctx.config.schedule_path()).unwrap();
        assert!(scheduled.contains("site-bucket"));
        assert!(scheduled.contains(DELETE_BUCKET));

        let saved = AzionApplicationOptions::load(&path).unwrap();
        assert_eq!(saved.application.id, 0);
        assert!(saved.bucket.is_empty());
    }
}
