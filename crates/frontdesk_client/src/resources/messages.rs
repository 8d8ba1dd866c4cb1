//! Message and draft endpoints.

use crate::CachingClient;
use frontdesk_error::FrontdeskResult;
use serde_json::Value as JsonValue;

/// `/messages` endpoints plus the reply/draft endpoints nested under a conversation.
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    client: &'a CachingClient,
}

impl<'a> Messages<'a> {
    pub(crate) fn new(client: &'a CachingClient) -> Self {
        Self { client }
    }

    /// Fetch one message.
    pub async fn get(&self, message_id: &str) -> FrontdeskResult<JsonValue> {
        self.client.get(&format!("/messages/{}", message_id)).await
    }

    /// Send a reply in a conversation.
    pub async fn reply(
        &self,
        conversation_id: &str,
        message: &JsonValue,
    ) -> FrontdeskResult<JsonValue> {
        self.client
            .post(&format!("/conversations/{}/messages", conversation_id), message)
            .await
    }

    /// Save a draft reply without sending it.
    pub async fn create_draft(
        &self,
        conversation_id: &str,
        draft: &JsonValue,
    ) -> FrontdeskResult<JsonValue> {
        self.client
            .post(&format!("/conversations/{}/drafts", conversation_id), draft)
            .await
    }

    /// Drafts saved on a conversation.
    pub async fn drafts(&self, conversation_id: &str) -> FrontdeskResult<JsonValue> {
        self.client
            .get(&format!("/conversations/{}/drafts", conversation_id))
            .await
    }
}
