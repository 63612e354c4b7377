//! In-memory session store.
//!
//! [`SessionStore`] holds every chat session in creation order plus the active
//! session pointer. All mutation funnels through its methods so the two
//! invariants below hold after every call:
//!
//! - the store never holds zero sessions
//! - `active_id` always resolves to a session in the store
//!
//! Operations on unknown ids are silent no-ops reported through a `bool` return.

use crate::domain::session::normalize_title;
use crate::domain::{Message, Session, SessionId};

/// An in-progress title edit.
///
/// While an edit is open, [`SessionStore::switch_active`] is refused so the
/// draft is not lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEdit {
    /// Session whose title is being edited.
    pub session_id: SessionId,
    /// Uncommitted title text.
    pub draft: String,
}

/// Process-wide chat session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Vec<Session>,
    active_id: SessionId,
    title_edit: Option<TitleEdit>,
}

impl SessionStore {
    /// Creates a store holding a single empty session, which is active.
    ///
    /// # Examples
    ///
    /// ```
    /// use parley::store::SessionStore;
    ///
    /// let store = SessionStore::new();
    /// assert_eq!(store.len(), 1);
    /// assert_eq!(store.active().title, "New Chat");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let session = Session::new();
        let active_id = session.id;
        Self {
            sessions: vec![session],
            active_id,
            title_edit: None,
        }
    }

    /// Sessions in creation order.
    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    #[must_use]
    pub const fn active_id(&self) -> SessionId {
        self.active_id
    }

    /// The active session.
    ///
    /// # Panics
    ///
    /// Never in practice: `active_id` always resolves by construction.
    #[must_use]
    pub fn active(&self) -> &Session {
        self.get(self.active_id)
            .unwrap_or_else(|| unreachable!("active session id must resolve"))
    }

    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: SessionId) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// Creates an empty session, appends it and makes it active.
    pub fn create_session(&mut self) -> &Session {
        let session = Session::new();
        let id = session.id;
        tracing::debug!(session_id = %id, "session created");
        self.sessions.push(session);
        self.active_id = id;
        self.sessions
            .last()
            .unwrap_or_else(|| unreachable!("session was just pushed"))
    }

    /// Deletes a session.
    ///
    /// Deleting the only session first creates its replacement, so the store is
    /// never empty. If the active session is removed, the earliest remaining
    /// session becomes active. Returns `false` if `id` is unknown.
    pub fn delete_session(&mut self, id: SessionId) -> bool {
        let Some(index) = self.sessions.iter().position(|s| s.id == id) else {
            tracing::debug!(session_id = %id, "delete ignored: unknown session");
            return false;
        };

        if self.title_edit.as_ref().is_some_and(|e| e.session_id == id) {
            tracing::debug!(session_id = %id, "discarding title edit of deleted session");
            self.title_edit = None;
        }

        if self.sessions.len() == 1 {
            let replacement = Session::new();
            let replacement_id = replacement.id;
            self.sessions.push(replacement);
            self.sessions.remove(index);
            self.active_id = replacement_id;
            tracing::debug!(
                deleted = %id,
                replacement = %replacement_id,
                "last session deleted, replacement created"
            );
            return true;
        }

        self.sessions.remove(index);
        if self.active_id == id {
            self.active_id = self.sessions[0].id;
            tracing::debug!(deleted = %id, active = %self.active_id, "active session reassigned");
        } else {
            tracing::debug!(deleted = %id, "session deleted");
        }
        true
    }

    /// Makes `id` the active session.
    ///
    /// No-op (returns `false`) if `id` is unknown or a title edit is open.
    pub fn switch_active(&mut self, id: SessionId) -> bool {
        if self.title_edit.is_some() {
            tracing::debug!(session_id = %id, "switch refused: title edit in progress");
            return false;
        }
        if !self.contains(id) {
            tracing::debug!(session_id = %id, "switch ignored: unknown session");
            return false;
        }
        self.active_id = id;
        true
    }

    /// Renames a session.
    ///
    /// The title is trimmed and capped at 30 characters. Empty or whitespace-only
    /// titles are rejected and leave the session unchanged.
    pub fn rename_session(&mut self, id: SessionId, new_title: &str) -> bool {
        let Some(title) = normalize_title(new_title) else {
            tracing::debug!(session_id = %id, "rename rejected: empty title");
            return false;
        };
        let Some(session) = self.get_mut(id) else {
            tracing::debug!(session_id = %id, "rename ignored: unknown session");
            return false;
        };
        tracing::debug!(session_id = %id, title = %title, "session renamed");
        session.title = title;
        true
    }

    /// Appends a message to a session's transcript.
    pub fn append_message(&mut self, id: SessionId, message: Message) -> bool {
        let Some(session) = self.get_mut(id) else {
            tracing::debug!(session_id = %id, "append ignored: unknown session");
            return false;
        };
        session.push(message);
        true
    }

    /// Appends a user message and reports whether it is the session's first send.
    ///
    /// Returns `None` if `id` is unknown.
    pub(crate) fn append_user_message(&mut self, id: SessionId, message: Message) -> Option<bool> {
        let session = self.get_mut(id)?;
        let is_first = session.take_first_send();
        session.push(message);
        Some(is_first)
    }

    /// Currently open title edit, if any.
    #[must_use]
    pub const fn title_edit(&self) -> Option<&TitleEdit> {
        self.title_edit.as_ref()
    }

    /// Opens a title edit seeded with the current title.
    ///
    /// Replaces any other open edit. Returns `false` if `id` is unknown.
    pub fn begin_title_edit(&mut self, id: SessionId) -> bool {
        let Some(session) = self.get(id) else {
            return false;
        };
        self.title_edit = Some(TitleEdit {
            session_id: id,
            draft: session.title.clone(),
        });
        true
    }

    /// Mutable access to the open edit's draft.
    pub fn title_draft_mut(&mut self) -> Option<&mut String> {
        self.title_edit.as_mut().map(|e| &mut e.draft)
    }

    /// Closes the open edit and applies its draft.
    ///
    /// Returns `true` if the title changed. An empty draft closes the edit and
    /// keeps the old title.
    pub fn commit_title_edit(&mut self) -> bool {
        let Some(edit) = self.title_edit.take() else {
            return false;
        };
        self.rename_session(edit.session_id, &edit.draft)
    }

    /// Closes the open edit without applying it.
    pub fn cancel_title_edit(&mut self) {
        self.title_edit = None;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session_becomes_active() {
        let mut store = SessionStore::new();
        let id = store.create_session().id;
        assert_eq!(store.len(), 2);
        assert_eq!(store.active_id(), id);
        assert_eq!(store.sessions()[1].id, id);
    }

    #[test]
    fn test_delete_active_reassigns_to_earliest() {
        let mut store = SessionStore::new();
        let first = store.active_id();
        let _second = store.create_session().id;
        let third = store.create_session().id;

        assert!(store.delete_session(third));
        assert_eq!(store.active_id(), first);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut store = SessionStore::new();
        let other = SessionStore::new().active_id();
        assert!(!store.delete_session(other));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_switch_refused_during_title_edit() {
        let mut store = SessionStore::new();
        let first = store.active_id();
        let second = store.create_session().id;

        assert!(store.begin_title_edit(second));
        assert!(!store.switch_active(first));
        assert_eq!(store.active_id(), second);

        store.cancel_title_edit();
        assert!(store.switch_active(first));
    }

    #[test]
    fn test_commit_title_edit() {
        let mut store = SessionStore::new();
        let id = store.active_id();
        store.begin_title_edit(id);
        let draft = store.title_draft_mut().unwrap();
        draft.clear();
        draft.push_str("  Groceries ");

        assert!(store.commit_title_edit());
        assert_eq!(store.active().title, "Groceries");
        assert!(store.title_edit().is_none());
    }

    #[test]
    fn test_commit_empty_draft_keeps_title() {
        let mut store = SessionStore::new();
        let id = store.active_id();
        store.begin_title_edit(id);
        store.title_draft_mut().unwrap().clear();

        assert!(!store.commit_title_edit());
        assert_eq!(store.active().title, "New Chat");
        assert!(store.title_edit().is_none());
    }

    #[test]
    fn test_delete_cancels_edit_of_deleted_session() {
        let mut store = SessionStore::new();
        let id = store.active_id();
        store.begin_title_edit(id);
        store.delete_session(id);
        assert!(store.title_edit().is_none());
    }

    #[test]
    fn test_append_message_unknown_session() {
        let mut store = SessionStore::new();
        let stranger = SessionStore::new().active_id();
        assert!(!store.append_message(stranger, Message::user("lost")));
        assert!(store.active().messages().is_empty());
    }
}
