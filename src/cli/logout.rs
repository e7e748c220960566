//! `azion logout`

use anyhow::Result;
use tracing::debug;

use super::context::Context;
use crate::output::GeneralOutput;

/// Revoke the stored personal token when possible, then forget the session
pub async fn execute(ctx: &mut Context) -> Result<()> {
    if let Some(uuid) = ctx.settings.uuid.clone() {
        match ctx.client() {
            Ok(client) => {
                if let Err(e) = client.personal_tokens().delete(&uuid).await {
                    debug!("Could not revoke personal token {}: {}", uuid, e);
                }
            }
            Err(e) => debug!("Skipping token revocation: {}", e),
        }
    }

    ctx.settings.clear_session();
    ctx.save_settings()?;

    let output = GeneralOutput::new("Logout succeeded\n", ctx.flags.clone());
    ctx.print(&output)
}
