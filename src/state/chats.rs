#[cfg(test)]
#[path = "chats_test.rs"]
mod chats_test;

use super::ChatSession;
use crate::api::{ApiError, ChatSummary};

/// The sidebar's list of conversations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatDirectory {
    pub chats: Vec<ChatSummary>,
    pub selected: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    /// Session that just received its chat id, waiting for the view
    /// mounted under the new route to pick it up.
    live: Option<ChatSession>,
}

impl ChatDirectory {
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_fetch(&mut self, result: Result<Vec<ChatSummary>, ApiError>) {
        self.loading = false;
        match result {
            Ok(chats) => {
                self.chats = chats;
                if let Some(sel) = &self.selected
                    && !self.chats.iter().any(|c| &c.chat_id == sel)
                {
                    self.selected = None;
                }
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn fail(&mut self, e: &ApiError) {
        self.error = Some(e.to_string());
    }

    pub fn select(&mut self, chat_id: Option<String>) {
        self.selected = chat_id;
    }

    pub fn is_selected(&self, chat_id: &str) -> bool {
        self.selected.as_deref() == Some(chat_id)
    }

    /// Replaces a known chat or puts a new one at the top.
    pub fn upsert(&mut self, summary: ChatSummary) {
        match self.chats.iter_mut().find(|c| c.chat_id == summary.chat_id) {
            Some(existing) => *existing = summary,
            None => self.chats.insert(0, summary),
        }
    }

    pub fn rename(&mut self, chat_id: &str, label: &str) -> bool {
        match self.chats.iter_mut().find(|c| c.chat_id == chat_id) {
            Some(c) => {
                c.label = label.to_string();
                true
            }
            None => false,
        }
    }

    /// Drops a chat from the list. Returns `true` when it was the selected
    /// one, in which case the selection is cleared.
    pub fn remove(&mut self, chat_id: &str) -> bool {
        self.chats.retain(|c| c.chat_id != chat_id);
        if self.is_selected(chat_id) {
            self.selected = None;
            return true;
        }
        false
    }

    pub fn hand_off(&mut self, session: ChatSession) {
        if session.chat_id.is_some() {
            self.live = Some(session);
        }
    }

    pub fn live_session(&self, chat_id: &str) -> Option<&ChatSession> {
        self.live
            .as_ref()
            .filter(|s| s.chat_id.as_deref() == Some(chat_id))
    }

    /// Takes the handed-off session if it belongs to `chat_id`.
    pub fn claim(&mut self, chat_id: &str) -> Option<ChatSession> {
        self.live_session(chat_id)?;
        self.live.take()
    }

    pub fn filtered(&self, query: &str) -> Vec<&ChatSummary> {
        let q = query.trim().to_lowercase();
        self.chats
            .iter()
            .filter(|c| q.is_empty() || c.label.to_lowercase().contains(&q))
            .collect()
    }
}
