//! Tag endpoints.

use super::with_query;
use crate::CachingClient;
use frontdesk_error::FrontdeskResult;
use serde_json::{Value as JsonValue, json};

/// `/tags` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Tags<'a> {
    client: &'a CachingClient,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(client: &'a CachingClient) -> Self {
        Self { client }
    }

    /// List tags.
    pub async fn list(&self, query: Option<&str>) -> FrontdeskResult<JsonValue> {
        self.client.get(&with_query("/tags".to_string(), query)).await
    }

    /// Fetch one tag.
    pub async fn get(&self, tag_id: &str) -> FrontdeskResult<JsonValue> {
        self.client.get(&format!("/tags/{}", tag_id)).await
    }

    /// Conversations carrying the tag.
    pub async fn conversations(
        &self,
        tag_id: &str,
        query: Option<&str>,
    ) -> FrontdeskResult<JsonValue> {
        self.client
            .get(&with_query(format!("/tags/{}/conversations", tag_id), query))
            .await
    }

    /// Create a tag.
    pub async fn create(&self, name: &str) -> FrontdeskResult<JsonValue> {
        self.client.post("/tags", &json!({ "name": name })).await
    }

    /// Delete a tag.
    pub async fn delete(&self, tag_id: &str) -> FrontdeskResult<JsonValue> {
        self.client.delete(&format!("/tags/{}", tag_id)).await
    }
}
