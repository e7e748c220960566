//! Personal token commands. Tokens are addressed by uuid and cannot be updated.

use anyhow::Result;
use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use clap::Args;

use super::command::{failed, string_or_prompt, ListFlags, ResourceCommand};
use super::context::Context;
use crate::api::personal_token::{CreatePersonalTokenRequest, PersonalToken};
use crate::api::response::ListResponse;
use crate::error::CliError;
use crate::output::{DescribeOutput, Flags, GeneralOutput, ListOutput, Output};

const ASK_ID: &str = "Enter the Personal Token's ID:";

/// `YYYY-MM-DD` or a period from `now`: `<n>d`, `<n>w`, `<n>m`, `<n>y`
pub fn parse_expiration(value: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, CliError> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let at = date
            .and_hms_opt(0, 0, 0)
            .ok_or(CliError::ConvertExpiration)?
            .and_utc();
        return if at > now { Ok(at) } else { Err(CliError::ConvertExpiration) };
    }

    let (last, _) = value.char_indices().last().ok_or(CliError::ConvertExpiration)?;
    let (count, unit) = value.split_at(last);
    let n: u32 = count.parse().map_err(|_| CliError::ConvertExpiration)?;
    if n == 0 {
        return Err(CliError::ConvertExpiration);
    }
    let expires = match unit {
        "d" => now.checked_add_days(Days::new(n.into())),
        "w" => now.checked_add_days(Days::new(u64::from(n) * 7)),
        "m" => now.checked_add_months(Months::new(n)),
        "y" => n.checked_mul(12).and_then(|months| now.checked_add_months(Months::new(months))),
        _ => None,
    };
    expires.ok_or(CliError::ConvertExpiration)
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Expiration date (YYYY-MM-DD) or period (30d, 2w, 6m, 1y)
    #[arg(long)]
    pub expiration: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

impl ResourceCommand for CreateArgs {
    type Request = CreatePersonalTokenRequest;
    type Response = PersonalToken;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        let name = string_or_prompt(ctx, self.name.as_deref(), "Enter the new Personal Token's name:", "name")?;
        let expiration = string_or_prompt(
            ctx,
            self.expiration.as_deref(),
            "Enter the expiration date (YYYY-MM-DD) or period (e.g. 30d):",
            "expiration",
        )?;
        Ok(CreatePersonalTokenRequest {
            name,
            expires_at: parse_expiration(&expiration, Utc::now())?,
            description: self.description.clone(),
        })
    }

    async fn execute(&self, ctx: &Context, request: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .personal_tokens()
            .create(&request)
            .await
            .map_err(|e| failed("create", "personal token", e))
    }

    fn render(&self, token: Self::Response, flags: &Flags) -> Box<dyn Output> {
        let mut message = format!("Created personal token with ID {}\n", token.uuid);
        if let Some(key) = token.key {
            message.push_str(&format!("Token: {}\nStore it now, it cannot be retrieved later\n", key));
        }
        Box::new(GeneralOutput::new(message, flags.clone()))
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Personal token uuid
    #[arg(long)]
    pub id: Option<String>,
}

impl ResourceCommand for DeleteArgs {
    type Request = String;
    type Response = String;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        string_or_prompt(ctx, self.id.as_deref(), ASK_ID, "id")
    }

    async fn execute(&self, ctx: &Context, uuid: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .personal_tokens()
            .delete(&uuid)
            .await
            .map_err(|e| failed("delete", "personal token", e))?;
        Ok(uuid)
    }

    fn render(&self, uuid: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(GeneralOutput::new(
            format!("Deleted personal token with ID {}\n", uuid),
            flags.clone(),
        ))
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub list: ListFlags,
}

impl ResourceCommand for ListArgs {
    type Request = ();
    type Response = ListResponse<PersonalToken>;

    fn validate(&self, _ctx: &Context) -> Result<Self::Request> {
        Ok(())
    }

    async fn execute(&self, ctx: &Context, _: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .personal_tokens()
            .list(&self.list.page())
            .await
            .map_err(|e| failed("list", "personal tokens", e))
    }

    fn render(&self, list: Self::Response, flags: &Flags) -> Box<dyn Output> {
        let output = if self.list.details {
            ListOutput::from_items(
                &["ID", "NAME", "DESCRIPTION", "CREATED", "EXPIRES AT"],
                &["uuid", "name", "description", "created", "expires_at"],
                &list.results,
                flags.clone(),
            )
        } else {
            ListOutput::from_items(
                &["ID", "NAME", "EXPIRES AT"],
                &["uuid", "name", "expires_at"],
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
    pub id: Option<String>,
}

impl ResourceCommand for DescribeArgs {
    type Request = String;
    type Response = PersonalToken;

    fn validate(&self, ctx: &Context) -> Result<Self::Request> {
        string_or_prompt(ctx, self.id.as_deref(), ASK_ID, "id")
    }

    async fn execute(&self, ctx: &Context, uuid: Self::Request) -> Result<Self::Response> {
        ctx.client()?
            .personal_tokens()
            .get(&uuid)
            .await
            .map_err(|e| failed("describe", "personal token", e))
    }

    fn render(&self, token: Self::Response, flags: &Flags) -> Box<dyn Output> {
        Box::new(DescribeOutput::new(
            &token,
            &[
                ("ID", "uuid"),
                ("Name", "name"),
                ("Description", "description"),
                ("Created", "created"),
                ("Expires At", "expires_at"),
            ],
            flags.clone(),
        ))
    }
}
