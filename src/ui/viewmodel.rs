//! View model types representing renderable UI state.
//!
//! View models are immutable snapshots computed by
//! `AppState::compute_viewmodel` and consumed by the renderer and the hit-test
//! [`Layout`](crate::ui::layout::Layout). They hold display-ready data only:
//! wrapped bubble lines, truncated titles, highlight ranges, and the drawer's
//! visible width for the current progress.

use crate::domain::SessionId;

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Viewport height in rows.
    pub rows: usize,
    /// Viewport width in columns.
    pub cols: usize,
    pub header: HeaderInfo,
    pub transcript: TranscriptView,
    pub composer: ComposerInfo,
    /// Present while any part of the drawer is on screen.
    pub drawer: Option<DrawerView>,
    pub modal: Option<ModalInfo>,
    pub footer: FooterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Active session title.
    pub title: String,
    /// Active session is awaiting a reply.
    pub typing: bool,
}

/// Transcript window, bottom-anchored so the newest lines are visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranscriptView {
    pub lines: Vec<BubbleLine>,
    /// Shown when the session has no messages yet.
    pub empty_hint: Option<String>,
}

/// One wrapped row of a chat bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BubbleLine {
    pub text: String,
    /// Column where the bubble body starts.
    pub indent: usize,
    /// Bubble body width; every line of a bubble shares it.
    pub width: usize,
    pub kind: BubbleKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    User,
    Assistant,
    /// Assistant "is typing" indicator.
    Typing,
    /// Spacer between bubbles.
    Gap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerInfo {
    pub text: String,
    /// Keyboard visible.
    pub focused: bool,
    pub placeholder: String,
}

/// Session drawer as currently revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerView {
    /// Full drawer width in columns.
    pub width: usize,
    /// Columns currently on screen, from the drawer's right edge.
    pub visible: usize,
    /// Filter query when a filter is active or being typed.
    pub filter: Option<FilterInfo>,
    pub rows: Vec<DrawerRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterInfo {
    pub query: String,
    pub focused: bool,
}

/// One session entry in the drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerRow {
    pub id: SessionId,
    /// Title, truncated to fit; replaced by the draft while renaming.
    pub title: String,
    /// Message count and last activity.
    pub meta: String,
    pub is_active: bool,
    /// Under the keyboard cursor.
    pub is_selected: bool,
    pub is_editing: bool,
    /// Fuzzy match ranges over `title`, character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalInfo {
    pub title: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
