//! `azion login`: terminal or browser authentication, then a personal token
//! is minted and stored in the active profile

use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context as _, Result};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use chrono::{Duration, Utc};
use clap::Args;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing::{debug, info};

use super::command::{failed, string_or_prompt};
use super::context::Context;
use crate::api::account::create_session_token;
use crate::api::personal_token::CreatePersonalTokenRequest;
use crate::api::AzionClient;
use crate::config::settings::{METRICS_ALLOWED, METRICS_DENIED, METRICS_UNASKED};
use crate::output::GeneralOutput;

const CALLBACK_PORT: u16 = 8080;
const TOKEN_LIFETIME_DAYS: i64 = 30;
const METHODS: [&str; 2] = ["Log in via browser", "Log in via terminal"];

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email; selects the terminal flow
    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// Local port for the browser callback
    #[arg(long, default_value_t = CALLBACK_PORT)]
    pub port: u16,
}

pub async fn execute(ctx: &mut Context, args: &LoginArgs) -> Result<()> {
    let session = if args.username.is_some() || args.password.is_some() {
        terminal(ctx, args).await?
    } else {
        match ctx.prompt().select("Choose a login method:", &METHODS)? {
            0 => browser(ctx, args.port).await?,
            _ => terminal(ctx, args).await?,
        }
    };
    store_personal_token(ctx, &session).await
}

async fn terminal(ctx: &Context, args: &LoginArgs) -> Result<String> {
    let username = string_or_prompt(ctx, args.username.as_deref(), "Email:", "username")?;
    let password = match args.password {
        Some(ref p) => p.clone(),
        None => ctx.prompt().password("Password:")?,
    };
    let session = create_session_token(&ctx.config, &username, &password)
        .await
        .map_err(|e| anyhow!("Failed to log in: {}", e))?;
    Ok(session.token)
}

async fn browser(ctx: &mut Context, port: u16) -> Result<String> {
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("Failed to listen for the login callback on port {}", port))?;
    let url = format!("{}/login?next=cli", ctx.config.console_url);

    if let Err(e) = open_browser(&url) {
        debug!("Could not open a browser: {}", e);
    }
    writeln!(
        ctx.out(),
        "Complete the login in your browser. If it did not open, visit {}",
        url
    )?;

    receive_callback(listener).await
}

fn open_browser(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    command
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[derive(Debug, Deserialize)]
struct Callback {
    c: String,
}

#[derive(Clone, Default)]
struct CallbackState {
    token: Arc<Mutex<Option<String>>>,
    done: Arc<Notify>,
}

async fn callback(State(state): State<CallbackState>, Query(cb): Query<Callback>) -> Html<&'static str> {
    if let Ok(mut slot) = state.token.lock() {
        *slot = Some(cb.c);
    }
    state.done.notify_one();
    Html("<html><body><h2>Login succeeded</h2><p>You can close this window and return to the terminal.</p></body></html>")
}

/// Serve `/callback?c=<token>` until the console redirects once, then shut down
async fn receive_callback(listener: TcpListener) -> Result<String> {
    let state = CallbackState::default();
    let app = Router::new()
        .route("/callback", get(callback))
        .with_state(state.clone());

    let done = state.done.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { done.notified().await })
        .await?;

    let token = state
        .token
        .lock()
        .map_err(|_| anyhow!("Login callback state is unavailable"))?
        .take();
    token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| anyhow!("The login callback did not carry a token"))
}

async fn store_personal_token(ctx: &mut Context, session: &str) -> Result<()> {
    let client = AzionClient::new(&ctx.config, session)?;
    let user = client
        .whoami()
        .await
        .map_err(|e| anyhow!("Failed to log in: {}", e))?;

    let now = Utc::now();
    let request = CreatePersonalTokenRequest {
        name: format!("azion-cli-{}", now.format("%Y%m%d%H%M%S")),
        expires_at: now + Duration::days(TOKEN_LIFETIME_DAYS),
        description: Some("Created by azion login".to_string()),
    };
    let token = client
        .personal_tokens()
        .create(&request)
        .await
        .map_err(|e| failed("create", "personal token", e))?;
    let key = token
        .key
        .ok_or_else(|| anyhow!("The API did not return the personal token"))?;
    info!("Logged in as {}", user.email);

    ctx.settings.token = Some(key);
    ctx.settings.uuid = Some(token.uuid);
    ctx.settings.email = Some(user.email).filter(|e| !e.is_empty());
    ctx.settings.client_id = Some(user.client_id).filter(|c| !c.is_empty());

    if ctx.settings.authorize_metrics_collection == METRICS_UNASKED {
        let allowed = ctx.confirm("Allow Azion to collect anonymous usage metrics?")?;
        ctx.settings.authorize_metrics_collection = if allowed { METRICS_ALLOWED } else { METRICS_DENIED };
    }
    ctx.save_settings()?;

    let output = GeneralOutput::new("Login succeeded\n", ctx.flags.clone());
    ctx.print(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::test_support;
    use axum::routing::post;
    use axum::Json;
    use serde_json::json;

    fn account_api() -> Router {
        Router::new()
            .route("/tokens", post(|| async { Json(json!({"token": "session-token"})) }))
            .route(
                "/user/me",
                get(|| async { Json(json!({"results": {"email": "dev@example.com", "client_id": "4521a"}})) }),
            )
            .route(
                "/iam/personal_tokens",
                post(|Json(body): Json<serde_json::Value>| async move {
                    assert_eq!(body["description"], "Created by azion login");
                    Json(json!({"results": {"uuid": "pt-1", "name": body["name"], "key": "azion-key"}}))
                }),
            )
    }

    #[tokio::test]
    async fn terminal_login_stores_the_personal_token() {
        let base = test_support::serve(account_api()).await;
        let dir = tempfile::tempdir().unwrap();
        let (mut ctx, out) = test_support::context(dir.path(), &base, &["n"]);
        let args = LoginArgs {
            username: Some("dev@example.com".into()),
            password: Some("secret".into()),
            port: 0,
        };

        execute(&mut ctx, &args).await.unwrap();

        assert_eq!(out.contents(), "Login succeeded\n");
        let saved = Settings::load(&ctx.config.settings_path()).unwrap();
        assert_eq!(saved.token.as_deref(), Some("azion-key"));
        assert_eq!(saved.uuid.as_deref(), Some("pt-1"));
        assert_eq!(saved.email.as_deref(), Some("dev@example.com"));
        assert_eq!(saved.client_id.as_deref(), Some("4521a"));
        assert_eq!(saved.authorize_metrics_collection, METRICS_DENIED);
    }

    #[tokio::test]
    async fn metrics_consent_is_asked_only_once() {
        let base = test_support::serve(account_api()).await;
        let dir = tempfile::tempdir().unwrap();
        // no answers queued: a second consent prompt would fail the login
        let (mut ctx, _) = test_support::context(dir.path(), &base, &[]);
        ctx.settings.authorize_metrics_collection = METRICS_ALLOWED;
        let args = LoginArgs {
            username: Some("dev@example.com".into()),
            password: Some("secret".into()),
            port: 0,
        };

        execute(&mut ctx, &args).await.unwrap();

        assert!(ctx.settings.metrics_allowed());
    }

    #[tokio::test]
    async fn browser_callback_yields_the_token_and_stops() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(receive_callback(listener));

        let body = reqwest::get(format!("http://{}/callback?c=from-console", addr))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(body.contains("Login succeeded"));
        assert_eq!(server.await.unwrap().unwrap(), "from-console");
    }
}
