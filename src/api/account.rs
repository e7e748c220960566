//! Session tokens and the authenticated user (v3)

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::{http_client, read_body, ApiVersion, AzionClient};
use super::error::ApiError;
use crate::config::Config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "client_id")]
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// The API sends the client id as either a string or a number
fn client_id<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Exchange username and password for a short-lived session token
pub async fn create_session_token(
    config: &Config,
    username: &str,
    password: &str,
) -> Result<SessionToken, ApiError> {
    let url = format!("{}/tokens", config.api_url);
    debug!("POST {}", url);

    let response = http_client()?
        .post(&url)
        .basic_auth(username, Some(password))
        .header("Accept", "application/json; version=3")
        .send()
        .await?;

    let value = read_body(response).await?;
    Ok(serde_json::from_value(value)?)
}

impl AzionClient {
    /// Identity behind the client's token; also used to validate `--token`
    pub async fn whoami(&self) -> Result<UserInfo, ApiError> {
        self.get(ApiVersion::V3, "/user/me").await
    }
}
