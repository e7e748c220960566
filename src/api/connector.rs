//! Edge connectors (v4)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{ApiVersion, AzionClient, Page};
use super::error::ApiError;
use super::response::ListResponse;

const PATH: &str = "/edge_connector/connectors";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(rename = "type", default)]
    pub connector_type: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub attributes: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_editor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateConnectorRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub connector_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub attributes: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateConnectorRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub attributes: Value,
}

pub struct Connectors<'a> {
    client: &'a AzionClient,
}

impl AzionClient {
    pub fn connectors(&self) -> Connectors<'_> {
        Connectors { client: self }
    }
}

impl Connectors<'_> {
    pub async fn get(&self, id: i64) -> Result<Connector, ApiError> {
        self.client.get(ApiVersion::V4, &format!("{}/{}", PATH, id)).await
    }

    pub async fn list(&self, page: &Page) -> Result<ListResponse<Connector>, ApiError> {
        self.client.list(ApiVersion::V4, PATH, page).await
    }

    pub async fn create(&self, request: &CreateConnectorRequest) -> Result<Connector, ApiError> {
        self.client.post(ApiVersion::V4, PATH, request).await
    }

    pub async fn update(&self, id: i64, request: &UpdateConnectorRequest) -> Result<Connector, ApiError> {
        self.client
            .patch(ApiVersion::V4, &format!("{}/{}", PATH, id), request)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(ApiVersion::V4, &format!("{}/{}", PATH, id)).await
    }
}
