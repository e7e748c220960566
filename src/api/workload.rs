//! Workloads (v4)

use serde::{Deserialize, Serialize};

use super::client::{ApiVersion, AzionClient, Page};
use super::error::ApiError;
use super::response::ListResponse;

const PATH: &str = "/workspace/workloads";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workload {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure: Option<i64>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_editor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWorkloadRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkloadRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,
}

pub struct Workloads<'a> {
    client: &'a AzionClient,
}

impl AzionClient {
    pub fn workloads(&self) -> Workloads<'_> {
        Workloads { client: self }
    }
}

impl Workloads<'_> {
    pub async fn get(&self, id: i64) -> Result<Workload, ApiError> {
        self.client.get(ApiVersion::V4, &format!("{}/{}", PATH, id)).await
    }

    pub async fn list(&self, page: &Page) -> Result<ListResponse<Workload>, ApiError> {
        self.client.list(ApiVersion::V4, PATH, page).await
    }

    pub async fn create(&self, request: &CreateWorkloadRequest) -> Result<Workload, ApiError> {
        self.client.post(ApiVersion::V4, PATH, request).await
    }

    pub async fn update(&self, id: i64, request: &UpdateWorkloadRequest) -> Result<Workload, ApiError> {
        self.client
            .patch(ApiVersion::V4, &format!("{}/{}", PATH, id), request)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(ApiVersion::V4, &format!("{}/{}", PATH, id)).await
    }
}
