//! Origins of an application (v3)

use serde::{Deserialize, Serialize};

use super::client::{segment, ApiVersion, AzionClient, Page};
use super::error::ApiError;
use super::response::ListResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginAddress {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl OriginAddress {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            weight: None,
            server_role: None,
            is_active: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Origin {
    #[serde(default)]
    pub origin_id: i64,
    #[serde(default)]
    pub origin_key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub origin_type: String,
    #[serde(default)]
    pub addresses: Vec<OriginAddress>,
    #[serde(default)]
    pub origin_protocol_policy: String,
    #[serde(default)]
    pub is_origin_redirection_enabled: bool,
    #[serde(default)]
    pub host_header: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub origin_path: String,
    #[serde(default)]
    pub connection_timeout: i64,
    #[serde(default)]
    pub timeout_between_bytes: i64,
    #[serde(default)]
    pub hmac_authentication: bool,
    #[serde(default)]
    pub hmac_region_name: String,
    #[serde(default)]
    pub hmac_access_key: String,
    #[serde(default)]
    pub hmac_secret_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOriginRequest {
    pub name: String,
    pub addresses: Vec<OriginAddress>,
    pub host_header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_protocol_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmac_authentication: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmac_region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmac_access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmac_secret_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOriginRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<OriginAddress>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_protocol_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmac_authentication: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmac_region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmac_access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmac_secret_key: Option<String>,
}

pub struct Origins<'a> {
    client: &'a AzionClient,
}

impl AzionClient {
    pub fn origins(&self) -> Origins<'_> {
        Origins { client: self }
    }
}

fn collection(application_id: i64) -> String {
    format!("/edge_applications/{}/origins", application_id)
}

impl Origins<'_> {
    pub async fn get(&self, application_id: i64, origin_key: &str) -> Result<Origin, ApiError> {
        let path = format!("{}/{}", collection(application_id), segment(origin_key));
        self.client.get(ApiVersion::V3, &path).await
    }

    pub async fn list(&self, application_id: i64, page: &Page) -> Result<ListResponse<Origin>, ApiError> {
        self.client
            .list(ApiVersion::V3, &collection(application_id), page)
            .await
    }

    pub async fn create(
        &self,
        application_id: i64,
        request: &CreateOriginRequest,
    ) -> Result<Origin, ApiError> {
        self.client
            .post(ApiVersion::V3, &collection(application_id), request)
            .await
    }

    pub async fn update(
        &self,
        application_id: i64,
        origin_key: &str,
        request: &UpdateOriginRequest,
    ) -> Result<Origin, ApiError> {
        let path = format!("{}/{}", collection(application_id), segment(origin_key));
        self.client.patch(ApiVersion::V3, &path, request).await
    }

    pub async fn delete(&self, application_id: i64, origin_key: &str) -> Result<(), ApiError> {
        let path = format!("{}/{}", collection(application_id), segment(origin_key));
        self.client.delete(ApiVersion::V3, &path).await
    }
}
