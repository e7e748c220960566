//! HTTP client for the Azion API

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::api::error::ApiError;
use crate::api::response::{unwrap_envelope, ListResponse};
use crate::config::Config;

const USER_AGENT: &str = concat!("azion-cli/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

/// API generation an endpoint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V3,
    V4,
}

/// Listing page
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

impl Page {
    fn apply(&self, path: &str) -> String {
        let sep = if path.contains('?') { '&' } else { '?' };
        format!("{}{}page={}&page_size={}", path, sep, self.page, self.page_size)
    }
}

/// Percent-encode `value` as a single path segment
pub fn segment(value: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return value.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(value);
    }
    url.path().strip_prefix('/').unwrap_or_default().to_string()
}

/// Shared reqwest client with the CLI's user agent and timeout
pub fn http_client() -> Result<Client, ApiError> {
    Ok(Client::builder().user_agent(USER_AGENT).timeout(TIMEOUT).build()?)
}

/// Authenticated Azion API client
pub struct AzionClient {
    client: Client,
    token: String,
    api_url: String,
    api_v4_url: String,
}

impl AzionClient {
    /// Create a new client authenticated with `token`
    pub fn new(config: &Config, token: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client: http_client()?,
            token: token.to_string(),
            api_url: config.api_url.clone(),
            api_v4_url: config.api_v4_url.clone(),
        })
    }

    fn url(&self, version: ApiVersion, path: &str) -> String {
        match version {
            ApiVersion::V3 => format!("{}{}", self.api_url, path),
            ApiVersion::V4 => format!("{}{}", self.api_v4_url, path),
        }
    }

    /// Build request with authentication headers
    fn build_request(&self, method: Method, version: ApiVersion, url: &str) -> RequestBuilder {
        let mut req = self
            .client
            .request(method, url)
            .header("Authorization", format!("Token {}", self.token))
            .header("Content-Type", "application/json");

        if version == ApiVersion::V3 {
            req = req.header("Accept", "application/json; version=3");
        }

        req
    }

    /// Send a request and return the decoded body (`Null` when empty)
    pub async fn send(
        &self,
        method: Method,
        version: ApiVersion,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url(version, path);
        debug!("{} {}", method, url);

        let mut req = self.build_request(method, version, &url);
        if let Some(ref body) = body {
            trace!("Request body: {}", body);
            req = req.json(body);
        }

        let response = req.send().await?;
        read_body(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, version: ApiVersion, path: &str) -> Result<T, ApiError> {
        let value = self.send(Method::GET, version, path, None).await?;
        Ok(serde_json::from_value(unwrap_envelope(value))?)
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        version: ApiVersion,
        path: &str,
        page: &Page,
    ) -> Result<ListResponse<T>, ApiError> {
        let value = self.send(Method::GET, version, &page.apply(path), None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        version: ApiVersion,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let value = self
            .send(Method::POST, version, path, Some(serde_json::to_value(body)?))
            .await?;
        Ok(serde_json::from_value(unwrap_envelope(value))?)
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        version: ApiVersion,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let value = self
            .send(Method::PATCH, version, path, Some(serde_json::to_value(body)?))
            .await?;
        Ok(serde_json::from_value(unwrap_envelope(value))?)
    }

    pub async fn delete(&self, version: ApiVersion, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, version, path, None).await?;
        Ok(())
    }
}

/// Map non-2xx responses, decode the rest
pub async fn read_body(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response.text().await?;
    trace!("Response: {}", text);

    if !status.is_success() {
        debug!("API error ({}): {}", status, text);
        return Err(ApiError::from_response(status.as_u16(), &text));
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_str(&text)?)
}
