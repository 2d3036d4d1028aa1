use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{VenuexError, VenuexResult};
use crate::models::Venue;

/// Body of `POST /api/v1/agents/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
}

/// Decoded chat response. `response` may be missing; `slots_found` may be
/// missing or null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty_list")]
    pub slots_found: Vec<Venue>,
}

impl ChatReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
            slots_found: Vec::new(),
        }
    }

    pub fn with_venues(text: impl Into<String>, venues: Vec<Venue>) -> Self {
        Self {
            response: Some(text.into()),
            slots_found: venues,
        }
    }
}

fn null_as_empty_list<'de, D>(deserializer: D) -> Result<Vec<Venue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Venue>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

/// Transport used by the chat session.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> VenuexResult<ChatReply>;
}

pub struct HttpChatClient {
    client: reqwest::Client,
    chat_url: String,
    health_url: String,
    timeout: Duration,
}

impl HttpChatClient {
    pub fn new(config: &ApiConfig) -> VenuexResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| VenuexError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            chat_url: config.chat_url(),
            health_url: config.health_url(),
            timeout: config.timeout(),
        })
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    pub async fn health(&self) -> VenuexResult<HealthStatus> {
        let response = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let response = check_status(response)?;
        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| VenuexError::ApiParseError(e.to_string()))
    }

    fn map_transport(&self, err: reqwest::Error) -> VenuexError {
        if err.is_timeout() {
            VenuexError::ApiTimeout(self.timeout.as_secs())
        } else {
            err.into()
        }
    }
}

fn check_status(response: reqwest::Response) -> VenuexResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(VenuexError::ApiStatus {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        })
    }
}

#[async_trait]
impl ChatBackend for HttpChatClient {
    async fn send(&self, request: &ChatRequest) -> VenuexResult<ChatReply> {
        debug!(url = %self.chat_url, user_id = %request.user_id, "Sending chat request");

        let response = self
            .client
            .post(&self.chat_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let response = check_status(response).inspect_err(|e| warn!("Chat API error: {}", e))?;

        let reply = response
            .json::<ChatReply>()
            .await
            .map_err(|e| VenuexError::ApiParseError(e.to_string()))?;

        debug!(venues = reply.slots_found.len(), "Chat reply received");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_expected_fields() {
        let request = ChatRequest {
            message: "Find cricket venues in Mumbai".to_string(),
            user_id: "user123".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "Find cricket venues in Mumbai", "user_id": "user123"})
        );
    }

    #[test]
    fn test_reply_tolerates_missing_and_null_fields() {
        let reply: ChatReply = serde_json::from_str("{}").unwrap();
        assert!(reply.response.is_none());
        assert!(reply.slots_found.is_empty());

        let reply: ChatReply =
            serde_json::from_str(r#"{"response": "No venues", "slots_found": null}"#).unwrap();
        assert_eq!(reply.response.as_deref(), Some("No venues"));
        assert!(reply.slots_found.is_empty());
    }

    #[test]
    fn test_client_uses_configured_urls() {
        let mut config = ApiConfig::default();
        config.base_url = "http://127.0.0.1:9999".to_string();
        let client = HttpChatClient::new(&config).unwrap();
        assert_eq!(client.chat_url(), "http://127.0.0.1:9999/api/v1/agents/chat");
    }
}
