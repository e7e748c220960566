//! `azion whoami`

use anyhow::Result;

use super::context::Context;
use crate::error::CliError;
use crate::output::GeneralOutput;

pub async fn execute(ctx: &mut Context) -> Result<()> {
    let email = match ctx.settings.email.clone().filter(|e| !e.is_empty()) {
        Some(email) => email,
        // a token from --token or AZION_TOKEN has no stored email
        None if ctx.token().is_some() => ctx.client()?.whoami().await?.email,
        None => return Err(CliError::NotLoggedIn.into()),
    };

    let output = GeneralOutput::new(format!("{}\n", email), ctx.flags.clone());
    ctx.print(&output)
}
