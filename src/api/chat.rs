use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{ApiClient, ApiError, check, decode, discard, flexible_id, optional_flexible_id};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatSummary {
    #[serde(alias = "id", deserialize_with = "flexible_id")]
    pub chat_id: String,
    #[serde(alias = "title", default)]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatHistory {
    #[serde(alias = "id", deserialize_with = "flexible_id")]
    pub chat_id: String,
    #[serde(alias = "title", default)]
    pub label: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SendRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatReply {
    pub message: Message,
    #[serde(default)]
    pub model_used: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub usage: Option<Value>,
    #[serde(default, deserialize_with = "optional_flexible_id")]
    pub chat_id: Option<String>,
}

impl ApiClient {
    pub(super) async fn post_chat(&self, req: &SendRequest) -> Result<ChatReply, ApiError> {
        let res = self.http.post(self.url("/chat")).json(req).send().await?;
        decode(check(res, "Could not send message").await?).await
    }

    pub(super) async fn get_chats(&self) -> Result<Vec<ChatSummary>, ApiError> {
        let res = self.http.get(self.url("/chats")).send().await?;
        decode(check(res, "Could not load chats").await?).await
    }

    pub(super) async fn get_chat(&self, chat_id: &str) -> Result<ChatHistory, ApiError> {
        let res = self
            .http
            .get(self.url_with_id("/chats", chat_id))
            .send()
            .await?;
        decode(check(res, "Could not load chat history").await?).await
    }

    pub(super) async fn remove_chat(&self, chat_id: &str) -> Result<(), ApiError> {
        let res = self
            .http
            .delete(self.url_with_id("/chats", chat_id))
            .send()
            .await?;
        discard(check(res, "Could not delete chat").await?).await
    }

    pub(super) async fn patch_chat_title(
        &self,
        chat_id: &str,
        label: &str,
    ) -> Result<ChatSummary, ApiError> {
        let res = self
            .http
            .patch(self.url_with_id("/chats", chat_id))
            .json(&json!({ "title": label }))
            .send()
            .await?;
        let body = check(res, "Could not rename chat").await?.text().await?;
        // Some backends answer with a bare status object.
        Ok(serde_json::from_str(&body).unwrap_or_else(|_| ChatSummary {
            chat_id: chat_id.to_string(),
            label: label.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_request_omits_unset_fields() {
        let req = SendRequest {
            message: "hi".into(),
            chat_name: None,
            model_id: Some("m1".into()),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, json!({ "message": "hi", "model_id": "m1" }));
    }

    #[test]
    fn summary_accepts_title_and_numeric_id() {
        let s: ChatSummary = serde_json::from_str(r#"{"id": 7, "title": "Sore throat"}"#).unwrap();
        assert_eq!(s.chat_id, "7");
        assert_eq!(s.label, "Sore throat");
    }

    #[test]
    fn reply_tolerates_missing_metadata() {
        let r: ChatReply =
            serde_json::from_str(r#"{"message":{"role":"assistant","content":"ok"}}"#).unwrap();
        assert_eq!(r.message, Message::assistant("ok"));
        assert_eq!(r.chat_id, None);
        assert!(r.model_used.is_empty());
    }
}
