//! Chat session and message domain models.
//!
//! A [`Session`] owns an ordered transcript of [`Message`]s. Messages are immutable
//! once created and are only ever appended. Identifiers are UUID v7 tokens, which
//! are unique and ordered by creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Title given to freshly created sessions.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 30;

/// Opaque, unique identifier of a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh creation-time-derived identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Opaque, unique identifier of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generates a fresh creation-time-derived identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A single chat message.
///
/// Fields are private so a message cannot be edited after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    text: String,
    is_user: bool,
    created_at: i64,
}

impl Message {
    /// Creates a message written by the user.
    ///
    /// # Examples
    ///
    /// ```
    /// use parley::domain::Message;
    ///
    /// let message = Message::user("Hello");
    /// assert!(message.is_user());
    /// assert_eq!(message.text(), "Hello");
    /// ```
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text.into(), true)
    }

    /// Creates a message written by the (synthetic) assistant.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text.into(), false)
    }

    fn new(text: String, is_user: bool) -> Self {
        Self {
            id: MessageId::generate(),
            text,
            is_user,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn is_user(&self) -> bool {
        self.is_user
    }

    /// Unix timestamp of creation.
    #[must_use]
    pub const fn created_at(&self) -> i64 {
        self.created_at
    }
}

/// A chat session: a titled, append-only transcript.
///
/// # Fields
///
/// - `id`: Unique identifier, stable for the session's lifetime
/// - `title`: User-editable title, trimmed and at most [`MAX_TITLE_CHARS`] characters
/// - `messages`: Transcript in chronological (insertion) order
/// - `created_at`: Unix timestamp of creation
/// - `welcomed`: Set once the first user message has been sent, so exactly one
///   welcome reply is ever produced for the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    messages: Vec<Message>,
    pub created_at: i64,
    welcomed: bool,
}

impl Session {
    /// Creates an empty session titled [`DEFAULT_SESSION_TITLE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use parley::domain::Session;
    ///
    /// let session = Session::new();
    /// assert_eq!(session.title, "New Chat");
    /// assert!(session.messages().is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SessionId::generate(),
            title: DEFAULT_SESSION_TITLE.to_string(),
            messages: Vec::new(),
            created_at: chrono::Utc::now().timestamp(),
            welcomed: false,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Marks the session as greeted and reports whether this was the first call.
    pub(crate) fn take_first_send(&mut self) -> bool {
        !std::mem::replace(&mut self.welcomed, true)
    }

    /// Whether the session has already received its first user message.
    #[must_use]
    pub const fn welcomed(&self) -> bool {
        self.welcomed
    }

    /// Unix timestamp of the latest activity (last message, or creation).
    #[must_use]
    pub fn last_activity(&self) -> i64 {
        self.messages
            .last()
            .map_or(self.created_at, Message::created_at)
    }

    /// Returns a human-readable string describing how long ago the session was active.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    #[must_use]
    pub fn time_ago(&self) -> String {
        format_age(chrono::Utc::now().timestamp() - self.last_activity())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes a candidate title: trims it and caps it at [`MAX_TITLE_CHARS`].
///
/// Returns `None` for empty or whitespace-only input.
///
/// # Examples
///
/// ```
/// use parley::domain::session::normalize_title;
///
/// assert_eq!(normalize_title(" Trip Plan "), Some("Trip Plan".to_string()));
/// assert_eq!(normalize_title("   "), None);
/// ```
#[must_use]
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let capped: String = trimmed.chars().take(MAX_TITLE_CHARS).collect();
    Some(capped.trim_end().to_string())
}

fn format_age(diff: i64) -> String {
    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Session::new();
        let b = Session::new();
        assert_ne!(a.id, b.id);
        assert_ne!(Message::user("x").id(), Message::user("x").id());
    }

    #[test]
    fn test_normalize_title_caps_length() {
        let long = "a".repeat(45);
        let title = normalize_title(&long).unwrap();
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn test_normalize_title_counts_chars_not_bytes() {
        let title = normalize_title(&"é".repeat(40)).unwrap();
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn test_take_first_send_only_once() {
        let mut session = Session::new();
        assert!(session.take_first_send());
        assert!(!session.take_first_send());
        assert!(session.welcomed());
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(5), "just now");
        assert_eq!(format_age(300), "5m ago");
        assert_eq!(format_age(3 * 3600), "3h ago");
        assert_eq!(format_age(7 * 86400), "7d ago");
    }
}
