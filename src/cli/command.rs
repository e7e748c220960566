//! The validate, execute, render pipeline every resource command goes through

use std::fmt::Display;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use clap::Args;
use serde::de::DeserializeOwned;

use super::context::Context;
use crate::api::Page;
use crate::error::CliError;
use crate::output::{Flags, Output};

/// One resource operation, e.g. `create domain`
#[allow(async_fn_in_trait)]
pub trait ResourceCommand {
    type Request;
    type Response;

    /// Collect flags, prompts and files into a request. No network access.
    fn validate(&self, ctx: &Context) -> Result<Self::Request>;

    async fn execute(&self, ctx: &Context, request: Self::Request) -> Result<Self::Response>;

    fn render(&self, response: Self::Response, flags: &Flags) -> Box<dyn Output>;
}

pub async fn run<C: ResourceCommand>(command: &C, ctx: &mut Context) -> Result<()> {
    let request = command.validate(ctx)?;
    let response = command.execute(ctx, request).await?;
    let output = command.render(response, &ctx.flags);
    ctx.print(output.as_ref())
}

/// Paging and column flags shared by every `list`
#[derive(Args, Debug, Clone)]
pub struct ListFlags {
    /// Show all columns
    #[arg(long)]
    pub details: bool,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = 10)]
    pub page_size: u32,
}

impl ListFlags {
    pub fn page(&self) -> Page {
        Page {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Integer id from its flag, or from a prompt; unparsable values raise `invalid`
pub fn id_or_prompt(ctx: &Context, value: Option<&str>, question: &str, invalid: CliError) -> Result<i64> {
    let raw = match value {
        Some(v) => v.to_string(),
        None => ctx.prompt().input(question)?,
    };
    raw.trim().parse().map_err(|_| invalid.into())
}

pub fn string_or_prompt(
    ctx: &Context,
    value: Option<&str>,
    question: &str,
    field: &'static str,
) -> Result<String> {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        return Ok(v.to_string());
    }
    let answer = ctx.prompt().input(question)?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(CliError::MissingValue { field }.into());
    }
    Ok(answer.to_string())
}

pub fn parse_bool(flag: &'static str, value: &str) -> Result<bool, CliError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CliError::ConvertBool { flag }),
    }
}

pub fn optional_bool(flag: &'static str, value: Option<&str>) -> Result<Option<bool>, CliError> {
    value.map(|v| parse_bool(flag, v)).transpose()
}

/// Request body from a `--file` JSON document
pub fn read_request_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = fs::read_to_string(path).map_err(|_| CliError::UnmarshalReader)?;
    serde_json::from_str(&content).map_err(|_| CliError::UnmarshalReader)
}

/// Wrap an API failure in the user-facing message for `verb` on `resource`
pub fn failed(verb: &str, resource: &str, err: impl Display) -> anyhow::Error {
    anyhow!(
        "Failed to {} the {}: {}. Check your settings and try again. If the error persists, contact Azion support",
        verb,
        resource,
        err
    )
}

/// Hide a secret, keeping its last four characters
pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn masking() {
        assert_eq!(mask("abcdefgh"), "****efgh");
        assert_eq!(mask("abc"), "***");
    }

    #[test]
    fn bool_flags() {
        for v in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(parse_bool("active", v).unwrap());
        }
        for v in ["0", "f", "F", "FALSE", "false", "False"] {
            assert!(!parse_bool("active", v).unwrap());
        }
        let err = parse_bool("active", "yes").unwrap_err();
        assert!(err.to_string().starts_with("Invalid --active flag"));
        assert_eq!(optional_bool("debug", None).unwrap(), None);
    }

    #[test]
    fn prompted_id_must_be_an_integer() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _) = test_support::context(dir.path(), "http://127.0.0.1:9", &["invalid", " 42 "]);

        let err = id_or_prompt(&ctx, None, "Application ID:", CliError::ConvertApplicationId).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::ConvertApplicationId)));

        let id = id_or_prompt(&ctx, None, "Application ID:", CliError::ConvertApplicationId).unwrap();
        assert_eq!(id, 42);
        assert_eq!(id_or_prompt(&ctx, Some("7"), "unused", CliError::ConvertDomainId).unwrap(), 7);

        let err = id_or_prompt(&ctx, Some("seven"), "unused", CliError::ConvertDomainId).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::ConvertDomainId)));
    }

    #[test]
    fn empty_prompt_answer_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, _) = test_support::context(dir.path(), "http://127.0.0.1:9", &["  "]);

        let err = string_or_prompt(&ctx, None, "Name:", "name").unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::MissingValue { field: "name" })));
    }

    #[test]
    fn request_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = read_request_file::<serde_json::Value>(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, CliError::UnmarshalReader));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{not json").unwrap();
        assert!(matches!(
            read_request_file::<serde_json::Value>(&bad).unwrap_err(),
            CliError::UnmarshalReader
        ));
    }

    #[test]
    fn failure_message_shape() {
        let msg = failed("delete", "personal token", "boom").to_string();
        assert_eq!(
            msg,
            "Failed to delete the personal token: boom. Check your settings and try again. If the error persists, contact Azion support"
        );
    }
}
