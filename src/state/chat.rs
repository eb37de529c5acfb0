#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::api::{ApiError, ChatHistory, ChatReply, Message, Role, SendRequest};

const NO_RESPONSE: &str = "(no response)";
const LABEL_LIMIT: usize = 40;

/// One open conversation: the thread, the input buffer and request status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSession {
    pub chat_id: Option<String>,
    pub messages: Vec<Message>,
    pub input: String,
    pub model_id: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    /// Request in flight, or the last one that failed.
    pending: Option<SendRequest>,
}

impl ChatSession {
    pub fn new(model_id: Option<String>) -> Self {
        Self { model_id, ..Default::default() }
    }

    pub fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub fn select_model(&mut self, model_id: Option<String>) {
        self.model_id = model_id;
    }

    /// Appends the user's message and returns the request to send, or `None`
    /// when there is nothing to send or a request is already in flight.
    pub fn begin_send(&mut self) -> Option<SendRequest> {
        if self.loading {
            return None;
        }
        let text = self.input.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.messages.push(Message::user(text.clone()));
        self.input.clear();
        self.error = None;
        self.loading = true;

        let req = self.request(text);
        self.pending = Some(req.clone());
        Some(req)
    }

    /// Re-issues the last failed message without appending it again.
    pub fn begin_retry(&mut self) -> Option<SendRequest> {
        if self.loading || self.error.is_none() {
            return None;
        }
        let text = self.pending.take()?.message;
        self.error = None;
        self.loading = true;

        let req = self.request(text);
        self.pending = Some(req.clone());
        Some(req)
    }

    /// Applies the backend's answer. Returns the chat id when this reply is
    /// the one that gave the conversation its id.
    pub fn finish_send(&mut self, result: Result<ChatReply, ApiError>) -> Option<String> {
        self.loading = false;
        match result {
            Ok(reply) => {
                self.pending = None;
                let content = if reply.message.content.trim().is_empty() {
                    NO_RESPONSE.to_string()
                } else {
                    reply.message.content
                };
                self.messages.push(Message::assistant(content));
                match (&self.chat_id, reply.chat_id) {
                    (None, Some(id)) => {
                        self.chat_id = Some(id.clone());
                        Some(id)
                    }
                    _ => None,
                }
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
        self.pending = None;
    }

    /// Switches the session to an existing chat and clears the thread until
    /// its history arrives.
    pub fn begin_load(&mut self, chat_id: &str) {
        self.chat_id = Some(chat_id.to_string());
        self.messages.clear();
        self.error = None;
        self.pending = None;
        self.loading = true;
    }

    /// Applies loaded history. Results for a chat that is no longer the
    /// current one are dropped.
    pub fn finish_load(&mut self, chat_id: &str, result: Result<ChatHistory, ApiError>) {
        if self.chat_id.as_deref() != Some(chat_id) {
            return;
        }
        self.loading = false;
        match result {
            Ok(history) => {
                self.messages = history
                    .messages
                    .into_iter()
                    .filter(|m| m.role != Role::System)
                    .collect();
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Sidebar label for a conversation, taken from its first user message.
    pub fn derived_label(&self) -> Option<String> {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| derive_label(&m.content))
    }

    /// True when a failed send can be re-issued. Failed history loads
    /// have nothing to retry.
    pub fn can_retry(&self) -> bool {
        !self.loading && self.error.is_some() && self.pending.is_some()
    }

    fn request(&self, message: String) -> SendRequest {
        SendRequest {
            message,
            chat_name: self.chat_id.clone(),
            model_id: self.model_id.clone(),
        }
    }
}

pub fn derive_label(text: &str) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= LABEL_LIMIT {
        return line;
    }
    let mut label: String = line.chars().take(LABEL_LIMIT).collect();
    label.truncate(label.trim_end().len());
    label.push('…');
    label
}
