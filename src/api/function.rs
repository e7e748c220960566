//! Edge functions (v4)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{ApiVersion, AzionClient, Page};
use super::error::ApiError;
use super::response::ListResponse;

const PATH: &str = "/edge_functions/functions";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Function {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub default_args: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_editor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFunctionRequest {
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_environment: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub default_args: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFunctionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_environment: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub default_args: Value,
}

pub struct Functions<'a> {
    client: &'a AzionClient,
}

impl AzionClient {
    pub fn functions(&self) -> Functions<'_> {
        Functions { client: self }
    }
}

impl Functions<'_> {
    pub async fn get(&self, id: i64) -> Result<Function, ApiError> {
        self.client.get(ApiVersion::V4, &format!("{}/{}", PATH, id)).await
    }

    pub async fn list(&self, page: &Page) -> Result<ListResponse<Function>, ApiError> {
        self.client.list(ApiVersion::V4, PATH, page).await
    }

    pub async fn create(&self, request: &CreateFunctionRequest) -> Result<Function, ApiError> {
        self.client.post(ApiVersion::V4, PATH, request).await
    }

    pub async fn update(&self, id: i64, request: &UpdateFunctionRequest) -> Result<Function, ApiError> {
        self.client
            .patch(ApiVersion::V4, &format!("{}/{}", PATH, id), request)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(ApiVersion::V4, &format!("{}/{}", PATH, id)).await
    }
}
