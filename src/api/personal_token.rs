//! Personal tokens (v3 IAM)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::client::{segment, ApiVersion, AzionClient, Page};
use super::error::ApiError;
use super::response::ListResponse;

const PATH: &str = "/iam/personal_tokens";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalToken {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// Only returned on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePersonalTokenRequest {
    pub name: String,
    pub expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub struct PersonalTokens<'a> {
    client: &'a AzionClient,
}

impl AzionClient {
    pub fn personal_tokens(&self) -> PersonalTokens<'_> {
        PersonalTokens { client: self }
    }
}

impl PersonalTokens<'_> {
    pub async fn get(&self, uuid: &str) -> Result<PersonalToken, ApiError> {
        self.client.get(ApiVersion::V3, &format!("{}/{}", PATH, segment(uuid))).await
    }

    pub async fn list(&self, page: &Page) -> Result<ListResponse<PersonalToken>, ApiError> {
        self.client.list(ApiVersion::V3, PATH, page).await
    }

    pub async fn create(&self, request: &CreatePersonalTokenRequest) -> Result<PersonalToken, ApiError> {
        self.client.post(ApiVersion::V3, PATH, request).await
    }

    pub async fn delete(&self, uuid: &str) -> Result<(), ApiError> {
        self.client.delete(ApiVersion::V3, &format!("{}/{}", PATH, segment(uuid))).await
    }
}
