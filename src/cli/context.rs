//! Per-invocation state handed to every command

use std::io::Write;

use anyhow::Result;

use crate::api::AzionClient;
use crate::config::{Config, Settings};
use crate::error::CliError;
use crate::output::{self, Flags, Output};

/// Interactive input used when a required flag is missing
pub trait Prompt {
    fn input(&self, message: &str) -> Result<String>;

    fn password(&self, message: &str) -> Result<String> {
        self.input(message)
    }

    fn confirm(&self, message: &str) -> Result<bool>;

    /// Index of the chosen item
    fn select(&self, message: &str, items: &[&str]) -> Result<usize>;
}

/// Terminal prompts backed by dialoguer
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn input(&self, message: &str) -> Result<String> {
        Ok(dialoguer::Input::<String>::new()
            .with_prompt(message)
            .interact_text()?)
    }

    fn password(&self, message: &str) -> Result<String> {
        Ok(dialoguer::Password::new().with_prompt(message).interact()?)
    }

    fn confirm(&self, message: &str) -> Result<bool> {
        Ok(dialoguer::Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()?)
    }

    fn select(&self, message: &str, items: &[&str]) -> Result<usize> {
        Ok(dialoguer::Select::new()
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact()?)
    }
}

pub struct Context {
    pub config: Config,
    pub settings: Settings,
    pub flags: Flags,
    /// Answer yes to every confirmation
    pub yes: bool,
    token_override: Option<String>,
    prompt: Box<dyn Prompt>,
    out: Box<dyn Write>,
}

impl Context {
    pub fn new(
        config: Config,
        flags: Flags,
        yes: bool,
        prompt: Box<dyn Prompt>,
        out: Box<dyn Write>,
    ) -> Result<Self> {
        let settings = Settings::load(&config.settings_path())?;
        Ok(Self {
            config,
            settings,
            flags,
            yes,
            token_override: None,
            prompt,
            out,
        })
    }

    /// Token from `--token`, then `AZION_TOKEN`, then the active profile
    pub fn token(&self) -> Option<String> {
        self.token_override
            .clone()
            .or_else(|| self.config.env_token.clone())
            .or_else(|| self.settings.token.clone())
            .filter(|t| !t.is_empty())
    }

    pub fn set_token(&mut self, token: &str) {
        self.token_override = Some(token.to_string());
    }

    /// Authenticated client, or `TokenNotFound`
    pub fn client(&self) -> Result<AzionClient> {
        let token = self.token().ok_or(CliError::TokenNotFound)?;
        Ok(AzionClient::new(&self.config, &token)?)
    }

    pub fn prompt(&self) -> &dyn Prompt {
        self.prompt.as_ref()
    }

    pub fn confirm(&self, message: &str) -> Result<bool> {
        if self.yes {
            return Ok(true);
        }
        self.prompt.confirm(message)
    }

    pub fn print(&mut self, v: &dyn Output) -> Result<()> {
        output::print(v, self.out.as_mut())
    }

    pub fn out(&mut self) -> &mut dyn Write {
        self.out.as_mut()
    }

    pub fn save_settings(&self) -> Result<()> {
        self.settings.save(&self.config.settings_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn token_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, _) = test_support::context(dir.path(), "http://127.0.0.1:9", &[]);
        ctx.settings.token = Some("from-settings".into());
        assert_eq!(ctx.token().as_deref(), Some("from-settings"));

        ctx.config.env_token = Some("from-env".into());
        assert_eq!(ctx.token().as_deref(), Some("from-env"));

        ctx.set_token("from-flag");
        assert_eq!(ctx.token().as_deref(), Some("from-flag"));
    }

    #[test]
    fn missing_token_is_typed() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, _) = test_support::context(dir.path(), "http://127.0.0.1:9", &[]);
        ctx.settings.token = None;

        let err = ctx.client().err().unwrap();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::TokenNotFound)));
    }

    #[test]
    fn yes_flag_skips_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, _) = test_support::context(dir.path(), "http://127.0.0.1:9", &["n"]);
        assert!(!ctx.confirm("continue?").unwrap());

        ctx.yes = true;
        assert!(ctx.confirm("continue?").unwrap());
    }
}
