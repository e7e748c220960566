//! Edge function commands

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::Value;

use super::command::{
    failed, id_or_prompt, optional_bool, read_request_file, string_or_prompt, ListFlags, ResourceCommand,
};
use super::context::Context;
use crate::api::function::{CreateFunctionRequest, Function, UpdateFunctionRequest};
use crate::api::response::ListResponse;
use crate::error::CliError;
use crate::output::{DescribeOutput, Flags, GeneralOutput, ListOutput, Output};

const ASK_ID: &str = "Enter the Function's ID:";

fn read_code(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read the code file: {}", path.display()))
}

fn read_args(path: Option<&PathBuf>) -> Result<Value> {
    match path {
        Some(p) => Ok(read_request_file(p)?),
        None => Ok(Value::Null),
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Path to the function's source
    #[arg(long)]
    pub code: Option<PathBuf>,

    #[arg(long)]
    pub active: Option<String>,

    #[arg(long)]
    pub runtime: Option<String>,

    #[arg(long)]
    pub execution_environment: Option<String>,

    /// Path to a JSON file with the default arguments
    #[arg(long)]
    pub args: Option<PathBuf>,

    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ResourceCommand for CreateArgs {
    type Request = CreateFunctionRequest;
    type Response = Function;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        if let Some(ref path) = self.file {
            return Ok(read_request_file(path)?);
        }
        let name = string_or_prompt(ctx, self.name.as_deref(), "Enter the new Function's name:", "name")?;
        let code_path = match self.code {
            Some(ref p) => p.clone(),
            None => PathBuf::from(string_or_prompt(
                ctx,
                None,
                "Enter the path to the Function's code:",
                "code",
            )?),
        };
        Ok(CreateFunctionRequest {
            name,
            code: read_code(&code_path)?,
            active: optional_bool("active", self.active.as_deref())?,
            runtime: self.runtime.clone(),
            execution_environment: self.execution_environment.clone(),
            default_args: read_args(self.args.as_ref())?,
        })
    }

    async fn execute(&self, ctx: &Context, request: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .functions()
            .create(&request)
            .await
            .map_err(|e| failed("create", "function", e))
    }

    fn render(&self, function: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Created function with ID {}\n", function.id),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub function_id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub code: Option<PathBuf>,

    #[arg(long)]
    pub active: Option<String>,

    #[arg(long)]
    pub runtime: Option<String>,

    #[arg(long)]
    pub execution_environment: Option<String>,

    #[arg(long)]
    pub args: Option<PathBuf>,

    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl ResourceCommand for UpdateArgs {
    type Request = (i64, UpdateFunctionRequest);
    type Response = Function;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        let id = id_or_prompt(ctx, self.function_id.as_deref(), ASK_ID, CliError::ConvertFunctionId)?;
        if let Some(ref path) = self.file {
            return Ok((id, read_request_file(path)?));
        }
        let code = self.code.as_deref().map(read_code).transpose()?;
        Ok((
            id,
            UpdateFunctionRequest {
                name: self.name.clone(),
                code,
                active: optional_bool("active", self.active.as_deref())?,
                runtime: self.runtime.clone(),
                execution_environment: self.execution_environment.clone(),
                default_args: read_args(self.args.as_ref())?,
            },
        ))
    }

    async fn execute(&self, ctx: &Context, (id, request): Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .functions()
            .update(id, &request)
            .await
            .map_err(|e| failed("update", "function", e))
    }

    fn render(&self, function: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Updated function with ID {}\n", function.id),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(long)]
    pub function_id: Option<String>,
}

impl ResourceCommand for DeleteArgs {
    type Request = i64;
    type Response = i64;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        id_or_prompt(ctx, self.function_id.as_deref(), ASK_ID, CliError::ConvertFunctionId)
    }

    async fn execute(&self, ctx: &Context, id: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .functions()
            .delete(id)
            .await
            .map_err(|e| failed("delete", "function", e))?;
        Ok(id)
    }

    fn render(&self, id: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(format!("Deleted function with ID {}\n", id), flags.clone()))
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub list: ListFlags,
}

impl ResourceCommand for ListArgs {
    type Request = ();
    type Response = ListResponse<Function>;

    fn validate(&self, _ctx: &Context) -> Result<Self::Request> {
        Ok(())
    }

    async fn execute(&self, ctx: &Context, _: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .functions()
            .list(&self.list.page())
            .await
            .map_err(|e| failed("list", "functions", e))
    }

    fn render(&self, list: Self::Response, flags: &Flags) -> Box<dyn Output> {
        let output = if self.list.details {
            ListOutput::from_items(
                &["ID", "NAME", "RUNTIME", "EXECUTION ENVIRONMENT", "ACTIVE", "LAST EDITOR", "LAST MODIFIED"],
                &["id", "name", "runtime", "execution_environment", "active", "last_editor", "last_modified"],
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
    pub function_id: Option<String>,

    /// Include the function's source
    #[arg(long)]
    pub with_code: bool,
}

impl ResourceCommand for DescribeArgs {
    type Request = i64;
    type Response = Function;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        id_or_prompt(ctx, self.function_id.as_deref(), ASK_ID, CliError::ConvertFunctionId)
    }

    async fn execute(&self, ctx: &Context, id: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .functions()
            .get(id)
            .await
            .map_err(|e| failed("describe", "function", e))
    }

    fn render(&self, function: Self::Response, flags: &Flags) -> Box<dyn Output> {
        let mut fields = vec![
            ("ID", "id"),
            ("Name", "name"),
            ("Active", "active"),
            ("Runtime", "runtime"),
            ("Execution Environment", "execution_environment"),
            ("Default Args", "default_args"),
            ("Reference Count", "reference_count"),
            ("Last Editor", "last_editor"),
            ("Last Modified", "last_modified"),
        ];
        if self.with_code {
            fields.push(("Code", "code"));
        }
        Box::new(DescribeOutput::new(&function, &fields, flags.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn code_and_args_are_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let code = dir.path().join("main.js");
        let args = dir.path().join("args.json");
        fs::write(&code, "addEventListener('fetch', () => {});").unwrap();
        fs::write(&args, r#"{"greeting": "hi"}"#).unwrap();
        let (ctx, _) = test_support::context(dir.path(), "http://127.0.0.1:9", &[]);

        let request = CreateArgs {
            name: Some("hello".into()),
            code: Some(code),
            active: Some("t".into()),
            runtime: None,
            execution_environment: None,
            args: Some(args),
            file: None,
        }
        .validate(&ctx)
        .unwrap();

        assert!(request.code.starts_with("addEventListener"));
        assert_eq!(request.default_args["greeting"], "hi");
        assert_eq!(request.active, Some(true));
    }

    #[test]
    fn invalid_args_file_is_an_unmarshal_error() {
        let dir = tempfile::tempdir().unwrap();
        let code = dir.path().join("main.js");
        fs::write(&code, "x").unwrap();
        let (ctx, _) = test_support::context(dir.path(), "http://127.0.0.1:9", &[]);

        let err = CreateArgs {
            name: Some("hello".into()),
            code: Some(code),
            active: None,
            runtime: None,
            execution_environment: None,
            args: Some(dir.path().join("nope.json")),
            file: None,
        }
        .validate(&ctx)
        .unwrap_err();

        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::UnmarshalReader)));
    }
}
