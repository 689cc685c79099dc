//! HTTP client for the hosted content API.
//!
//! Queries go over GET with a GROQ expression and JSON-encoded parameters;
//! writes are batched mutations over POST. Both carry a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use super::{ContentStore, StoreError};
use crate::models::{FeedItem, NewFeedItem};

/// Document type discriminator used by every query and mutation.
const DOC_TYPE: &str = "newsItem";

#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: Option<Value>,
}

/// Client for a dataset in the hosted content API.
pub struct ContentApiStore {
    client: reqwest::Client,
    base_url: String,
    dataset: String,
    token: String,
    api_version: String,
}

impl ContentApiStore {
    /// Build a client with the given credentials.
    ///
    /// Fails with `MissingCredentials` when any of url, dataset, or token is
    /// empty, so a half-configured environment is caught before the first
    /// request.
    pub fn new(
        url: &str,
        dataset: &str,
        token: &str,
        api_version: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        if url.is_empty() || dataset.is_empty() || token.is_empty() {
            return Err(StoreError::MissingCredentials);
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            dataset: dataset.to_string(),
            token: token.to_string(),
            api_version: api_version.to_string(),
        })
    }

    fn query_endpoint(&self) -> String {
        format!(
            "{}/{}/data/query/{}",
            self.base_url, self.api_version, self.dataset
        )
    }

    fn mutate_endpoint(&self) -> String {
        format!(
            "{}/{}/data/mutate/{}",
            self.base_url, self.api_version, self.dataset
        )
    }

    /// Run a GROQ query and return its `result` value.
    ///
    /// Parameter values must already be JSON-encoded (strings quoted).
    async fn query(&self, groq: &str, params: &[(&str, String)]) -> Result<Value, StoreError> {
        debug!(query = groq, "content API query");

        let mut request = self
            .client
            .get(self.query_endpoint())
            .bearer_auth(&self.token)
            .query(&[("query", groq)]);
        for (name, value) in params {
            request = request.query(&[(*name, value.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(body.result.unwrap_or(Value::Null))
    }

    /// Submit a mutation batch.
    async fn mutate(&self, mutations: Value) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.mutate_endpoint())
            .bearer_auth(&self.token)
            .json(&json!({ "mutations": mutations }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for ContentApiStore {
    async fn find_by_guid(&self, guid: &str) -> Result<Option<FeedItem>, StoreError> {
        let groq = format!("*[_type == \"{DOC_TYPE}\" && guid == $guid][0]");
        let param = serde_json::to_string(guid).map_err(|e| StoreError::Decode(e.to_string()))?;
        let value = self.query(&groq, &[("$guid", param)]).await?;
        if value.is_null() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn create_item(&self, item: NewFeedItem) -> Result<FeedItem, StoreError> {
        let item = item.into_item(Uuid::new_v4().to_string());
        let mut doc =
            serde_json::to_value(&item).map_err(|e| StoreError::Decode(e.to_string()))?;
        if let Value::Object(map) = &mut doc {
            map.insert("_type".to_string(), Value::String(DOC_TYPE.to_string()));
        }
        self.mutate(json!([{ "create": doc }])).await?;
        Ok(item)
    }

    async fn has_featured(&self) -> Result<bool, StoreError> {
        let groq = format!("count(*[_type == \"{DOC_TYPE}\" && featured == true])");
        let value = self.query(&groq, &[]).await?;
        let count = value
            .as_u64()
            .ok_or_else(|| StoreError::Decode(format!("expected count, got {value}")))?;
        Ok(count > 0)
    }

    async fn count_items(&self) -> Result<usize, StoreError> {
        let groq = format!("count(*[_type == \"{DOC_TYPE}\"])");
        let value = self.query(&groq, &[]).await?;
        let count = value
            .as_u64()
            .ok_or_else(|| StoreError::Decode(format!("expected count, got {value}")))?;
        Ok(count as usize)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<FeedItem>, StoreError> {
        let groq =
            format!("*[_type == \"{DOC_TYPE}\"] | order(publishedAt desc) [0...{limit}]");
        let value = self.query(&groq, &[]).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn set_featured(&self, id: &str, featured: bool) -> Result<(), StoreError> {
        self.mutate(json!([{ "patch": { "id": id, "set": { "featured": featured } } }]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ContentApiStore {
        ContentApiStore::new(
            "https://content.example.org/",
            "production",
            "secret",
            "v1",
            "stairwell-test",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoints_strip_trailing_slash() {
        let store = store();
        assert_eq!(
            store.query_endpoint(),
            "https://content.example.org/v1/data/query/production"
        );
        assert_eq!(
            store.mutate_endpoint(),
            "https://content.example.org/v1/data/mutate/production"
        );
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let result = ContentApiStore::new(
            "https://content.example.org",
            "production",
            "",
            "v1",
            "stairwell-test",
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(StoreError::MissingCredentials)));
    }
}
