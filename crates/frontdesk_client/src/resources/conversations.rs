//! Conversation endpoints.

use super::with_query;
use crate::CachingClient;
use frontdesk_error::FrontdeskResult;
use serde_json::{Value as JsonValue, json};

/// `/conversations` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Conversations<'a> {
    client: &'a CachingClient,
}

impl<'a> Conversations<'a> {
    pub(crate) fn new(client: &'a CachingClient) -> Self {
        Self { client }
    }

    /// List conversations, optionally filtered by a raw query string.
    pub async fn list(&self, query: Option<&str>) -> FrontdeskResult<JsonValue> {
        self.client
            .get(&with_query("/conversations".to_string(), query))
            .await
    }

    /// Fetch one conversation.
    pub async fn get(&self, conversation_id: &str) -> FrontdeskResult<JsonValue> {
        self.client
            .get(&format!("/conversations/{}", conversation_id))
            .await
    }

    /// Update status, assignee or other conversation fields.
    pub async fn update(
        &self,
        conversation_id: &str,
        fields: &JsonValue,
    ) -> FrontdeskResult<JsonValue> {
        self.client
            .patch(&format!("/conversations/{}", conversation_id), fields)
            .await
    }

    /// Assign the conversation to a teammate.
    pub async fn assign(
        &self,
        conversation_id: &str,
        teammate_id: &str,
    ) -> FrontdeskResult<JsonValue> {
        self.client
            .put(
                &format!("/conversations/{}/assignee", conversation_id),
                &json!({ "assignee_id": teammate_id }),
            )
            .await
    }

    /// Messages in the conversation.
    pub async fn messages(&self, conversation_id: &str) -> FrontdeskResult<JsonValue> {
        self.client
            .get(&format!("/conversations/{}/messages", conversation_id))
            .await
    }

    /// Internal comments on the conversation.
    pub async fn comments(&self, conversation_id: &str) -> FrontdeskResult<JsonValue> {
        self.client
            .get(&format!("/conversations/{}/comments", conversation_id))
            .await
    }

    /// Add an internal comment.
    pub async fn add_comment(
        &self,
        conversation_id: &str,
        body: &str,
    ) -> FrontdeskResult<JsonValue> {
        self.client
            .post(
                &format!("/conversations/{}/comments", conversation_id),
                &json!({ "body": body }),
            )
            .await
    }

    /// Attach tags.
    pub async fn add_tags(
        &self,
        conversation_id: &str,
        tag_ids: &[&str],
    ) -> FrontdeskResult<JsonValue> {
        self.client
            .post(
                &format!("/conversations/{}/tags", conversation_id),
                &json!({ "tag_ids": tag_ids }),
            )
            .await
    }
}
