//! Domains (v3)

use serde::{Deserialize, Serialize};

use super::client::{ApiVersion, AzionClient, Page};
use super::error::ApiError;
use super::response::ListResponse;

const PATH: &str = "/domains";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cnames: Vec<String>,
    #[serde(default)]
    pub cname_access_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_certificate_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_application_id: Option<i64>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDomainRequest {
    pub name: String,
    #[serde(default)]
    pub cnames: Vec<String>,
    #[serde(default)]
    pub cname_access_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_certificate_id: Option<i64>,
    pub edge_application_id: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDomainRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnames: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname_access_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_certificate_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_application_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

pub struct Domains<'a> {
    client: &'a AzionClient,
}

impl AzionClient {
    pub fn domains(&self) -> Domains<'_> {
        Domains { client: self }
    }
}

impl Domains<'_> {
    pub async fn get(&self, id: i64) -> Result<Domain, ApiError> {
        self.client.get(ApiVersion::V3, &format!("{}/{}", PATH, id)).await
    }

    pub async fn list(&self, page: &Page) -> Result<ListResponse<Domain>, ApiError> {
        self.client.list(ApiVersion::V3, PATH, page).await
    }

    pub async fn create(&self, request: &CreateDomainRequest) -> Result<Domain, ApiError> {
        self.client.post(ApiVersion::V3, PATH, request).await
    }

    pub async fn update(&self, id: i64, request: &UpdateDomainRequest) -> Result<Domain, ApiError> {
        self.client
            .patch(ApiVersion::V3, &format!("{}/{}", PATH, id), request)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(ApiVersion::V3, &format!("{}/{}", PATH, id)).await
    }
}
