//! Read-mostly directory endpoints: contacts, inboxes, teammates.

use super::with_query;
use crate::CachingClient;
use frontdesk_error::FrontdeskResult;
use serde_json::Value as JsonValue;

/// `/contacts` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Contacts<'a> {
    client: &'a CachingClient,
}

impl<'a> Contacts<'a> {
    pub(crate) fn new(client: &'a CachingClient) -> Self {
        Self { client }
    }

    /// List contacts.
    pub async fn list(&self, query: Option<&str>) -> FrontdeskResult<JsonValue> {
        self.client.get(&with_query("/contacts".to_string(), query)).await
    }

    /// Fetch one contact.
    pub async fn get(&self, contact_id: &str) -> FrontdeskResult<JsonValue> {
        self.client.get(&format!("/contacts/{}", contact_id)).await
    }

    /// Conversations with the contact.
    pub async fn conversations(&self, contact_id: &str) -> FrontdeskResult<JsonValue> {
        self.client
            .get(&format!("/contacts/{}/conversations", contact_id))
            .await
    }
}

/// `/inboxes` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Inboxes<'a> {
    client: &'a CachingClient,
}

impl<'a> Inboxes<'a> {
    pub(crate) fn new(client: &'a CachingClient) -> Self {
        Self { client }
    }

    /// List inboxes.
    pub async fn list(&self) -> FrontdeskResult<JsonValue> {
        self.client.get("/inboxes").await
    }

    /// Conversations in an inbox.
    pub async fn conversations(
        &self,
        inbox_id: &str,
        query: Option<&str>,
    ) -> FrontdeskResult<JsonValue> {
        self.client
            .get(&with_query(format!("/inboxes/{}/conversations", inbox_id), query))
            .await
    }
}

/// `/teammates` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Teammates<'a> {
    client: &'a CachingClient,
}

impl<'a> Teammates<'a> {
    pub(crate) fn new(client: &'a CachingClient) -> Self {
        Self { client }
    }

    /// List teammates.
    pub async fn list(&self) -> FrontdeskResult<JsonValue> {
        self.client.get("/teammates").await
    }

    /// Fetch one teammate.
    pub async fn get(&self, teammate_id: &str) -> FrontdeskResult<JsonValue> {
        self.client.get(&format!("/teammates/{}", teammate_id)).await
    }
}
