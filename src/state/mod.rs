//! Client-side state for each container.
//!
//! Every type here is plain data plus transition methods. The UI keeps them
//! inside signals and calls a `begin_*` method before awaiting the backend and
//! the matching `finish_*` method afterwards, so a render in between already
//! shows the optimistic update and the loading flag.

pub mod chat;
pub mod chats;
pub mod files;
pub mod models;
pub mod nav;

#[cfg(test)]
mod mock_backend;

pub use chat::ChatSession;
pub use chats::ChatDirectory;
pub use files::{FileLibrary, content_type_for, display_name, format_size};
pub use models::{ModelFocus, ModelRegistry};
pub use nav::{Navigation, Section};
