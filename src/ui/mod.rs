//! User interface components for Hyperion.
//!
//! Pages (`chat`, `model_manager`, `file_manager`, `settings`) are routed from
//! the crate root; the rest are presentational pieces they share.

mod box_select;    // Single-choice option list
mod chat_input;    // Message input with send button
mod chat_list;     // Sidebar chat history with rename/delete
mod message;       // One message bubble
pub mod chat;
pub mod file_manager;
pub mod model_manager;
pub mod settings;
pub mod sidebar;
