//! Domain layer for the Parley plugin.
//!
//! Core domain types independent of Zellij or any rendering concern.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`session`]: Session and message models
//!
//! # Examples
//!
//! ```
//! use parley::domain::{Message, Session};
//!
//! let session = Session::new();
//! let message = Message::user("hi");
//! assert_eq!(session.title, "New Chat");
//! assert!(message.is_user());
//! ```

pub mod error;
pub mod session;

pub use error::{ParleyError, Result};
pub use session::{
    normalize_title, Message, MessageId, Session, SessionId, DEFAULT_SESSION_TITLE, MAX_TITLE_CHARS,
};
