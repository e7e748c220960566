//! `azion reset`

use anyhow::Result;

use super::context::Context;
use crate::output::GeneralOutput;

/// Forget the stored token and session locally; nothing is revoked remotely
pub fn execute(ctx: &mut Context) -> Result<()> {
    ctx.settings.clear_session();
    ctx.save_settings()?;

    let output = GeneralOutput::new("Token reset successfully\n", ctx.flags.clone());
    ctx.print(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::test_support;

    #[test]
    fn clears_the_session_and_keeps_s3_settings() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, out) = test_support::context(dir.path(), "http://127.0.0.1:9", &[]);
        ctx.settings.s3_bucket = Some("bucket".into());
        ctx.save_settings().unwrap();

        execute(&mut ctx).unwrap();

        assert_eq!(out.contents(), "Token reset successfully\n");
        let saved = Settings::load(&ctx.config.settings_path()).unwrap();
        assert_eq!(saved.token, None);
        assert_eq!(saved.s3_bucket.as_deref(), Some("bucket"));
    }
}
