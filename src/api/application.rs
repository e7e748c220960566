//! Applications (v4)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{ApiVersion, AzionClient, Page};
use super::error::ApiError;
use super::response::ListResponse;

const PATH: &str = "/edge_application/applications";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub debug: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_editor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub modules: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateApplicationRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub modules: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateApplicationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub modules: Value,
}

pub struct Applications<'a> {
    client: &'a AzionClient,
}

impl AzionClient {
    pub fn applications(&self) -> Applications<'_> {
        Applications { client: self }
    }
}

impl Applications<'_> {
    pub async fn get(&self, id: i64) -> Result<Application, ApiError> {
        self.client.get(ApiVersion::V4, &format!("{}/{}", PATH, id)).await
    }

    pub async fn list(&self, page: &Page) -> Result<ListResponse<Application>, ApiError> {
        self.client.list(ApiVersion::V4, PATH, page).await
    }

    pub async fn create(&self, request: &CreateApplicationRequest) -> Result<Application, ApiError> {
        self.client.post(ApiVersion::V4, PATH, request).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &UpdateApplicationRequest,
    ) -> Result<Application, ApiError> {
        self.client
            .patch(ApiVersion::V4, &format!("{}/{}", PATH, id), request)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(ApiVersion::V4, &format!("{}/{}", PATH, id)).await
    }
}
