//! Session store layer.
//!
//! Holds the chat sessions and the active-session pointer for the lifetime of
//! the plugin. Nothing is persisted.
//!
//! # Modules
//!
//! - `sessions`: The [`SessionStore`] and its title-edit lock

pub mod sessions;

pub use sessions::{SessionStore, TitleEdit};
