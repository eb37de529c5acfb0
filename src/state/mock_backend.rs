//! In-memory `Backend` double for state tests.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use crate::api::{
    ApiError, Backend, ChatHistory, ChatReply, ChatSummary, FileRecord, FileUpdate, FileUpload,
    FileUploaded, Message, Model, ModelCreated, ModelDraft, SendRequest,
};

#[derive(Default)]
pub struct MockBackend {
    /// Every call as `"<operation> <argument>"`.
    pub calls: RefCell<Vec<String>>,
    /// When set, the next call fails with this status and message.
    pub fail_next: RefCell<Option<(u16, String)>>,
    pub reply_chat_id: RefCell<Option<String>>,
    pub reply_content: RefCell<String>,
    pub chats: RefCell<Vec<ChatSummary>>,
    pub models: RefCell<Vec<Model>>,
    pub files: RefCell<Vec<FileRecord>>,
    next_id: Cell<u32>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            reply_content: RefCell::new("Try warm salt water.".into()),
            ..Default::default()
        }
    }

    pub fn fail_next(&self, status: u16, message: &str) {
        *self.fail_next.borrow_mut() = Some((status, message.to_string()));
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.split(' ').next() == Some(op))
            .count()
    }

    fn record(&self, op: &str, arg: &str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(format!("{op} {arg}"));
        match self.fail_next.borrow_mut().take() {
            Some((status, message)) => Err(ApiError::Status { status, message }),
            None => Ok(()),
        }
    }

    fn fresh_id(&self, prefix: &str) -> String {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        format!("{prefix}-{n}")
    }
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    async fn send_message(&self, req: &SendRequest) -> Result<ChatReply, ApiError> {
        self.record("send_message", &req.message)?;
        Ok(ChatReply {
            message: Message::assistant(self.reply_content.borrow().clone()),
            model_used: req.model_id.clone().unwrap_or_default(),
            provider: "openrouter".into(),
            usage: None,
            chat_id: self.reply_chat_id.borrow().clone(),
        })
    }

    async fn list_chats(&self) -> Result<Vec<ChatSummary>, ApiError> {
        self.record("list_chats", "")?;
        Ok(self.chats.borrow().clone())
    }

    async fn chat_history(&self, chat_id: &str) -> Result<ChatHistory, ApiError> {
        self.record("chat_history", chat_id)?;
        Ok(ChatHistory {
            chat_id: chat_id.to_string(),
            label: None,
            messages: vec![Message::user("hello"), Message::assistant("hi there")],
        })
    }

    async fn delete_chat(&self, chat_id: &str) -> Result<(), ApiError> {
        self.record("delete_chat", chat_id)?;
        self.chats.borrow_mut().retain(|c| c.chat_id != chat_id);
        Ok(())
    }

    async fn rename_chat(&self, chat_id: &str, label: &str) -> Result<ChatSummary, ApiError> {
        self.record("rename_chat", chat_id)?;
        Ok(ChatSummary { chat_id: chat_id.to_string(), label: label.to_string() })
    }

    async fn list_models(&self) -> Result<Vec<Model>, ApiError> {
        self.record("list_models", "")?;
        Ok(self.models.borrow().clone())
    }

    async fn create_model(&self, draft: &ModelDraft) -> Result<ModelCreated, ApiError> {
        self.record("create_model", &draft.model_name)?;
        Ok(ModelCreated {
            status: "success".into(),
            model_name: draft.model_name.clone(),
            model_id: self.fresh_id("model"),
            error: None,
        })
    }

    async fn update_model(&self, model_id: &str, draft: &ModelDraft) -> Result<Model, ApiError> {
        self.record("update_model", model_id)?;
        Ok(draft.clone().into_model(model_id.to_string()))
    }

    async fn delete_model(&self, model_id: &str) -> Result<(), ApiError> {
        self.record("delete_model", model_id)?;
        Ok(())
    }

    async fn list_files(&self) -> Result<Vec<FileRecord>, ApiError> {
        self.record("list_files", "")?;
        Ok(self.files.borrow().clone())
    }

    async fn upload_file(&self, upload: FileUpload) -> Result<FileUploaded, ApiError> {
        self.record("upload_file", &upload.filename)?;
        Ok(FileUploaded {
            file_id: self.fresh_id("file"),
            filename: upload.filename,
            content_type: upload.content_type.unwrap_or_default(),
            size: upload.bytes.len() as u64,
        })
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), ApiError> {
        self.record("delete_file", file_id)?;
        Ok(())
    }

    async fn update_file(&self, file_id: &str, update: &FileUpdate) -> Result<FileRecord, ApiError> {
        self.record("update_file", file_id)?;
        Ok(FileRecord {
            file_id: file_id.to_string(),
            filename: update.filename.clone(),
            size: None,
            num_chunks: None,
            upload_time: None,
            content_type: None,
            chunking_method: None,
        })
    }
}
