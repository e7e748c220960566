//! Storage buckets (v4), used when a project is deleted in cascade

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::{segment, ApiVersion, AzionClient, Page};
use super::error::ApiError;

const PATH: &str = "/storage/buckets";
const OBJECT_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketObject {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Outcome of a bucket removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketDeletion {
    Deleted,
    /// The platform is still emptying the bucket
    Deferred,
}

pub struct Buckets<'a> {
    client: &'a AzionClient,
}

impl AzionClient {
    pub fn buckets(&self) -> Buckets<'_> {
        Buckets { client: self }
    }
}

impl Buckets<'_> {
    pub async fn delete(&self, name: &str) -> Result<(), ApiError> {
        self.client.delete(ApiVersion::V4, &format!("{}/{}", PATH, segment(name))).await
    }

    pub async fn list_objects(&self, name: &str) -> Result<Vec<BucketObject>, ApiError> {
        let page = Page {
            page: 1,
            page_size: OBJECT_PAGE_SIZE,
        };
        let list = self
            .client
            .list(ApiVersion::V4, &format!("{}/{}/objects", PATH, segment(name)), &page)
            .await?;
        Ok(list.results)
    }

    pub async fn delete_object(&self, name: &str, key: &str) -> Result<(), ApiError> {
        self.client
            .delete(ApiVersion::V4, &format!("{}/{}/objects/{}", PATH, segment(name), segment(key)))
            .await
    }

    /// Delete a bucket, emptying it first when the API refuses because it has objects
    pub async fn delete_with_objects(&self, name: &str) -> Result<BucketDeletion, ApiError> {
        match self.delete(name).await {
            Ok(()) => return Ok(BucketDeletion::Deleted),
            Err(e) if e.is_conflict() => debug!("Bucket {} is not empty: {}", name, e),
            Err(e) => return Err(e),
        }

        for object in self.list_objects(name).await? {
            self.delete_object(name, &object.key).await?;
        }

        match self.delete(name).await {
            Ok(()) => Ok(BucketDeletion::Deleted),
            Err(e) if e.is_conflict() => Ok(BucketDeletion::Deferred),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::test_support;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn non_empty_bucket_is_emptied_then_deferred() {
        let removed = Arc::new(AtomicUsize::new(0));
        let counter = removed.clone();
        let router = Router::new()
            .route(
                "/v4/storage/buckets/site",
                delete(|| async { (StatusCode::CONFLICT, "bucket is not empty") }),
            )
            .route(
                "/v4/storage/buckets/site/objects",
                get(|| async { Json(json!({"count": 2, "results": [{"key": "a.js"}, {"key": "b.css"}]})) }),
            )
            .route(
                "/v4/storage/buckets/site/objects/{key}",
                delete(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { StatusCode::NO_CONTENT }
                }),
            );
        let base = test_support::serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let client = AzionClient::new(&Config::for_test(dir.path(), &base), "t").unwrap();

        let outcome = client.buckets().delete_with_objects("site").await.unwrap();

        assert_eq!(outcome, BucketDeletion::Deferred);
        assert_eq!(removed.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_bucket_is_deleted_directly() {
        let router = Router::new().route(
            "/v4/storage/buckets/site",
            delete(|| async { StatusCode::NO_CONTENT }),
        );
        let base = test_support::serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let client = AzionClient::new(&Config::for_test(dir.path(), &base), "t").unwrap();

        let outcome = client.buckets().delete_with_objects("site").await.unwrap();

        assert_eq!(outcome, BucketDeletion::Deleted);
    }

    #[tokio::test]
    async fn object_keys_reach_the_api_intact() {
        let keys = Arc::new(Mutex::new(Vec::new()));
        let seen = keys.clone();
        let router = Router::new()
            .route(
                "/v4/storage/buckets/site",
                delete(|| async { (StatusCode::CONFLICT, "bucket is not empty") }),
            )
            .route(
                "/v4/storage/buckets/site/objects",
                get(|| async { Json(json!({"count": 1, "results": [{"key": "assets/a#b.js"}]})) }),
            )
            .route(
                "/v4/storage/buckets/site/objects/{key}",
                delete(move |Path(key): Path<String>| {
                    seen.lock().unwrap().push(key);
                    async { StatusCode::NO_CONTENT }
                }),
            );
        let base = test_support::serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let client = AzionClient::new(&Config::for_test(dir.path(), &base), "t").unwrap();

        client.buckets().delete_with_objects("site").await.unwrap();

        assert_eq!(*keys.lock().unwrap(), vec!["assets/a#b.js".to_string()]);
    }
}
