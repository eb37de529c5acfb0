//! REST client for the RAG backend.
//!
//! `ApiClient` wraps a `reqwest::Client` bound to one base URL. Each endpoint
//! is a thin async method that serialises the request, checks the status and
//! decodes the JSON body. Containers never talk to `ApiClient` directly; they
//! go through the [`Backend`] trait so they can be driven by a test double.

use std::sync::Arc;

use async_trait::async_trait;
use dioxus::logger::tracing::{info, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

mod chat;
mod error;
mod files;
mod models;

pub use chat::{ChatHistory, ChatReply, ChatSummary, Message, Role, SendRequest};
pub use error::ApiError;
pub use files::{FileRecord, FileUpdate, FileUpload, FileUploaded};
pub use models::{Model, ModelCreated, ModelDraft, Provider};

/// Characters left as-is inside a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Everything the containers need from the backend.
#[async_trait(?Send)]
pub trait Backend {
    async fn send_message(&self, req: &SendRequest) -> Result<ChatReply, ApiError>;
    async fn list_chats(&self) -> Result<Vec<ChatSummary>, ApiError>;
    async fn chat_history(&self, chat_id: &str) -> Result<ChatHistory, ApiError>;
    async fn delete_chat(&self, chat_id: &str) -> Result<(), ApiError>;
    async fn rename_chat(&self, chat_id: &str, label: &str) -> Result<ChatSummary, ApiError>;

    async fn list_models(&self) -> Result<Vec<Model>, ApiError>;
    async fn create_model(&self, draft: &ModelDraft) -> Result<ModelCreated, ApiError>;
    async fn update_model(&self, model_id: &str, draft: &ModelDraft) -> Result<Model, ApiError>;
    async fn delete_model(&self, model_id: &str) -> Result<(), ApiError>;

    async fn list_files(&self) -> Result<Vec<FileRecord>, ApiError>;
    async fn upload_file(&self, upload: FileUpload) -> Result<FileUploaded, ApiError>;
    async fn delete_file(&self, file_id: &str) -> Result<(), ApiError>;
    async fn update_file(&self, file_id: &str, update: &FileUpdate) -> Result<FileRecord, ApiError>;
}

/// Shared handle placed in the UI context.
pub type SharedBackend = Arc<dyn Backend>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn shared(self) -> SharedBackend {
        Arc::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn url_with_id(&self, prefix: &str, id: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            prefix,
            utf8_percent_encode(id, SEGMENT)
        )
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Returns the response untouched on 2xx, otherwise an [`ApiError::Status`]
/// carrying the backend's `detail` text or `fallback`.
async fn check(res: Response, fallback: &str) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let text = res.text().await.unwrap_or_default();
    let message = detail_message(&text).unwrap_or_else(|| fallback.to_string());
    warn!("{} {status}: {message}", fallback);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

fn detail_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) => Some(s).filter(|s| !s.trim().is_empty()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Backend ids are uuids on most routes and integers on a few.
fn flexible_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    RawId::deserialize(d).map(String::from)
}

fn optional_flexible_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(d)?.map(String::from))
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    let text = res.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Delete endpoints may answer 204 or an arbitrary JSON body; both are fine.
async fn discard(res: Response) -> Result<(), ApiError> {
    if res.status() != StatusCode::NO_CONTENT {
        let _ = res.bytes().await?;
    }
    Ok(())
}

#[async_trait(?Send)]
impl Backend for ApiClient {
    async fn send_message(&self, req: &SendRequest) -> Result<ChatReply, ApiError> {
        info!("POST /chat (chat: {:?}, model: {:?})", req.chat_name, req.model_id);
        self.post_chat(req).await
    }

    async fn list_chats(&self) -> Result<Vec<ChatSummary>, ApiError> {
        self.get_chats().await
    }

    async fn chat_history(&self, chat_id: &str) -> Result<ChatHistory, ApiError> {
        self.get_chat(chat_id).await
    }

    async fn delete_chat(&self, chat_id: &str) -> Result<(), ApiError> {
        info!("DELETE /chats/{chat_id}");
        self.remove_chat(chat_id).await
    }

    async fn rename_chat(&self, chat_id: &str, label: &str) -> Result<ChatSummary, ApiError> {
        self.patch_chat_title(chat_id, label).await
    }

    async fn list_models(&self) -> Result<Vec<Model>, ApiError> {
        self.get_models().await
    }

    async fn create_model(&self, draft: &ModelDraft) -> Result<ModelCreated, ApiError> {
        info!("POST /model/create ({})", draft.model_name);
        self.post_model(draft).await
    }

    async fn update_model(&self, model_id: &str, draft: &ModelDraft) -> Result<Model, ApiError> {
        self.patch_model(model_id, draft).await
    }

    async fn delete_model(&self, model_id: &str) -> Result<(), ApiError> {
        info!("DELETE /model/{model_id}");
        self.remove_model(model_id).await
    }

    async fn list_files(&self) -> Result<Vec<FileRecord>, ApiError> {
        self.get_files().await
    }

    async fn upload_file(&self, upload: FileUpload) -> Result<FileUploaded, ApiError> {
        info!("POST /upload ({}, {} bytes)", upload.filename, upload.bytes.len());
        self.post_upload(upload).await
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), ApiError> {
        info!("DELETE /files/{file_id}");
        self.remove_file(file_id).await
    }

    async fn update_file(&self, file_id: &str, update: &FileUpdate) -> Result<FileRecord, ApiError> {
        self.put_file(file_id, update).await
    }
}
