//! Application state and view model computation.
//!
//! [`AppState`] owns every piece of mutable UI state: the session store, the
//! message pipeline, the drawer controller, both gesture recognizers and the
//! text fields. The event handler is the only writer.
//!
//! # Derived State
//!
//! - **Keyboard visible**: `input_mode == Composing`.
//! - **Typing**: pending replies for the active session.
//! - **Drawer sessions**: store sessions filtered by the fuzzy filter query,
//!   in creation order.
//!
//! # View Model Computation
//!
//! `compute_viewmodel` produces everything the renderer and hit-testing need:
//! wrapped bubbles windowed to the transcript height, drawer rows with
//! highlight ranges, and the drawer's visible width for the current progress.

use super::modes::{InputMode, Overlay};
use crate::domain::{Session, SessionId};
use crate::drawer::DrawerController;
use crate::gesture::{
    DrawerRecognizer, GestureContext, PointerTracker, SurfaceRecognizer,
};
use crate::pipeline::{MessagePipeline, ResponsePool};
use crate::store::SessionStore;
use crate::ui::helpers::{truncate, wrap};
use crate::ui::layout::{delete_col, transcript_height, TITLE_COL};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BubbleKind, BubbleLine, ComposerInfo, DrawerRow, DrawerView, FilterInfo, FooterInfo,
    HeaderInfo, ModalInfo, TranscriptView, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::time::Duration;

/// Default synthetic typing window.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(1200);

const COMPOSER_PLACEHOLDER: &str = "Message";
const EMPTY_TRANSCRIPT_HINT: &str = "Say hello to start the conversation";
const TYPING_INDICATOR: &str = "● ● ●";
const VOICE_TITLE: &str = "Voice chat";
const VOICE_STATUS: &str = "Listening…";

/// Terminal size and the cell-to-unit scale used for gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
    /// Gesture units per column.
    pub cell_width: f32,
    /// Gesture units per row.
    pub cell_height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            rows: 24,
            cols: 80,
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

/// Recognizer that owns the gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureRoute {
    Surface,
    Drawer,
    /// Pointer went down while the modal was open; only taps count.
    Modal,
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    pub store: SessionStore,
    pub pipeline: MessagePipeline,
    pub drawer: DrawerController,

    pub surface_gesture: SurfaceRecognizer,
    pub drawer_gesture: DrawerRecognizer,
    pub tracker: PointerTracker,
    /// Set from pointer-down to pointer-up.
    pub gesture_route: Option<GestureRoute>,
    /// Context captured at pointer-down; the whole gesture is judged against it.
    pub gesture_start: Option<GestureContext>,

    /// Composer draft.
    pub composer: String,
    pub input_mode: InputMode,
    pub overlay: Option<Overlay>,

    /// Index into [`drawer_sessions`](Self::drawer_sessions).
    pub drawer_cursor: usize,
    pub filter_query: String,

    pub theme: Theme,
    pub viewport: Viewport,

    /// Deadline of the tick already requested from the runtime.
    pub(crate) tick_deadline: Option<Duration>,
}

impl AppState {
    #[must_use]
    pub fn new(pipeline: MessagePipeline, drawer: DrawerController, theme: Theme) -> Self {
        Self {
            store: SessionStore::new(),
            pipeline,
            drawer,
            surface_gesture: SurfaceRecognizer::default(),
            drawer_gesture: DrawerRecognizer::default(),
            tracker: PointerTracker::new(),
            gesture_route: None,
            gesture_start: None,
            composer: String::new(),
            input_mode: InputMode::Normal,
            overlay: None,
            drawer_cursor: 0,
            filter_query: String::new(),
            theme,
            viewport: Viewport::default(),
            tick_deadline: None,
        }
    }

    /// Records the terminal size from the latest render.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport.rows = rows;
        self.viewport.cols = cols;
    }

    /// Sets the gesture scale.
    pub fn set_cell_size(&mut self, cell_width: f32, cell_height: f32) {
        self.viewport.cell_width = cell_width;
        self.viewport.cell_height = cell_height;
    }

    #[must_use]
    pub const fn keyboard_visible(&self) -> bool {
        self.input_mode.keyboard_visible()
    }

    /// Whether the active session is awaiting a reply.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.pipeline.is_typing(self.store.active_id())
    }

    /// Drawer width in columns.
    #[must_use]
    pub fn drawer_cols(&self) -> usize {
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let cols = (self.viewport.cols as f32 * self.drawer.width_fraction()).round() as usize;
        cols.min(self.viewport.cols)
    }

    /// Drawer columns currently on screen.
    #[must_use]
    pub fn drawer_visible_cols(&self) -> usize {
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let visible = (self.drawer_cols() as f32 * self.drawer.progress()).round() as usize;
        visible
    }

    /// Snapshot the recognizers decide against.
    #[must_use]
    pub fn gesture_context(&self) -> GestureContext {
        #[allow(clippy::cast_precision_loss)]
        let drawer_width = self.drawer_cols() as f32 * self.viewport.cell_width;
        GestureContext {
            drawer_open: self.drawer.is_open(),
            keyboard_visible: self.keyboard_visible(),
            drawer_width,
        }
    }

    /// Sessions listed in the drawer, narrowed by the filter query.
    #[must_use]
    pub fn drawer_sessions(&self) -> Vec<&Session> {
        let query = self.filter_query.trim();
        if query.is_empty() {
            return self.store.sessions().iter().collect();
        }

        let matcher = SkimMatcherV2::default();
        self.store
            .sessions()
            .iter()
            .filter(|s| matcher.fuzzy_match(&s.title, query).is_some())
            .collect()
    }

    /// Session under the drawer cursor.
    #[must_use]
    pub fn selected_session(&self) -> Option<SessionId> {
        self.drawer_sessions().get(self.drawer_cursor).map(|s| s.id)
    }

    /// Moves the drawer cursor down, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        let len = self.drawer_sessions().len();
        if len == 0 {
            return;
        }
        self.drawer_cursor = (self.drawer_cursor + 1) % len;
    }

    /// Moves the drawer cursor up, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        let len = self.drawer_sessions().len();
        if len == 0 {
            return;
        }
        self.drawer_cursor = if self.drawer_cursor == 0 {
            len - 1
        } else {
            self.drawer_cursor - 1
        };
    }

    /// Puts the cursor on the active session, or clamps it when the active
    /// session is filtered out.
    pub fn sync_cursor(&mut self) {
        let active = self.store.active_id();
        let sessions = self.drawer_sessions();
        self.drawer_cursor = sessions
            .iter()
            .position(|s| s.id == active)
            .unwrap_or_else(|| self.drawer_cursor.min(sessions.len().saturating_sub(1)));
    }

    /// Keeps the cursor in range after the list shrank.
    pub fn clamp_cursor(&mut self) {
        let len = self.drawer_sessions().len();
        self.drawer_cursor = self.drawer_cursor.min(len.saturating_sub(1));
    }

    /// Computes the view model for the current viewport.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let Viewport { rows, cols, .. } = self.viewport;
        let active = self.store.active();

        UIViewModel {
            rows,
            cols,
            header: HeaderInfo {
                title: active.title.clone(),
                typing: self.is_typing(),
            },
            transcript: self.compute_transcript(active, cols, transcript_height(rows)),
            composer: ComposerInfo {
                text: self.composer.clone(),
                focused: self.keyboard_visible(),
                placeholder: COMPOSER_PLACEHOLDER.to_string(),
            },
            drawer: self.compute_drawer(),
            modal: self.overlay.map(|Overlay::VoiceChat| ModalInfo {
                title: VOICE_TITLE.to_string(),
                status: VOICE_STATUS.to_string(),
            }),
            footer: self.compute_footer(),
        }
    }

    /// Wraps the session's messages into bubble lines and keeps the newest
    /// `height` of them.
    fn compute_transcript(&self, session: &Session, cols: usize, height: usize) -> TranscriptView {
        let max_bubble = (cols * 3 / 4).max(8).min(cols.saturating_sub(2));
        let max_text = max_bubble.saturating_sub(2).max(1);
        let mut lines = Vec::new();

        for message in session.messages() {
            let wrapped = wrap(message.text(), max_text);
            let width = wrapped.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;
            let (kind, indent) = if message.is_user() {
                (BubbleKind::User, cols.saturating_sub(width + 1))
            } else {
                (BubbleKind::Assistant, 1)
            };

            if !lines.is_empty() {
                lines.push(gap());
            }
            lines.extend(wrapped.into_iter().map(|text| BubbleLine {
                text,
                indent,
                width,
                kind,
            }));
        }

        if self.pipeline.is_typing(session.id) {
            if !lines.is_empty() {
                lines.push(gap());
            }
            lines.push(BubbleLine {
                text: TYPING_INDICATOR.to_string(),
                indent: 1,
                width: TYPING_INDICATOR.chars().count() + 2,
                kind: BubbleKind::Typing,
            });
        }

        let start = lines.len().saturating_sub(height);
        let lines = lines.split_off(start);
        let empty_hint = lines
            .is_empty()
            .then(|| EMPTY_TRANSCRIPT_HINT.to_string());
        TranscriptView { lines, empty_hint }
    }

    fn compute_drawer(&self) -> Option<DrawerView> {
        let visible = self.drawer_visible_cols();
        if visible == 0 {
            return None;
        }

        let width = self.drawer_cols();
        let title_width = delete_col(width).saturating_sub(TITLE_COL + 1);
        let active = self.store.active_id();
        let editing = self.store.title_edit();
        let query = self.filter_query.trim();
        let matcher = (!query.is_empty()).then(SkimMatcherV2::default);

        let rows = self
            .drawer_sessions()
            .into_iter()
            .enumerate()
            .map(|(index, session)| {
                let edit = editing.filter(|e| e.session_id == session.id);
                let title = edit.map_or(session.title.as_str(), |e| e.draft.as_str());
                let title: String = if edit.is_some() {
                    // Keep the tail of a long draft visible.
                    let len = title.chars().count();
                    title.chars().skip(len.saturating_sub(title_width.saturating_sub(1))).collect()
                } else {
                    truncate(title, title_width)
                };
                let highlight_ranges = match (&matcher, edit) {
                    (Some(m), None) => highlight_ranges(m, &title, query),
                    _ => vec![],
                };

                DrawerRow {
                    id: session.id,
                    meta: session_meta(session),
                    is_active: session.id == active,
                    is_selected: index == self.drawer_cursor,
                    is_editing: edit.is_some(),
                    highlight_ranges,
                    title,
                }
            })
            .collect();

        let filter = (self.input_mode == InputMode::Filtering || !query.is_empty()).then(|| {
            FilterInfo {
                query: self.filter_query.clone(),
                focused: self.input_mode == InputMode::Filtering,
            }
        });

        Some(DrawerView {
            width,
            visible,
            filter,
            rows,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.overlay.is_some() {
            "Esc: end call"
        } else {
            match self.input_mode {
                InputMode::Composing => "Enter: send (empty: voice)  Esc: hide keyboard  Tab: chats",
                InputMode::Renaming => "Enter: save title  Esc: cancel",
                InputMode::Filtering => "Type to filter  Enter: open  ↑/↓: move  Esc: clear",
                InputMode::Normal if self.drawer.is_open() => {
                    "j/k: move  Enter: open  n: new  r: rename  d: delete  /: filter  Tab: close"
                }
                InputMode::Normal => "i: compose  Enter: send  Tab: chats  q: hide",
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            MessagePipeline::from_pool(DEFAULT_TYPING_DELAY, ResponsePool::default()),
            DrawerController::default(),
            Theme::default(),
        )
    }
}

const fn gap() -> BubbleLine {
    BubbleLine {
        text: String::new(),
        indent: 0,
        width: 0,
        kind: BubbleKind::Gap,
    }
}

fn session_meta(session: &Session) -> String {
    let count = session.messages().len();
    let noun = if count == 1 { "msg" } else { "msgs" };
    format!("{count} {noun} · {}", session.time_ago())
}

/// Coalesces fuzzy match indices into `(start, end)` runs.
fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ScriptedResponses;

    fn state() -> AppState {
        let pipeline = MessagePipeline::new(
            Duration::from_millis(1000),
            "Welcome!".to_string(),
            Box::new(ScriptedResponses::new(["Sure."])),
        );
        let mut state = AppState::new(pipeline, DrawerController::default(), Theme::default());
        state.set_viewport(24, 80);
        state
    }

    #[test]
    fn test_drawer_hidden_when_closed() {
        let vm = state().compute_viewmodel();
        assert!(vm.drawer.is_none());
        assert_eq!(vm.header.title, "New Chat");
        assert!(vm.transcript.empty_hint.is_some());
    }

    #[test]
    fn test_drawer_visible_width_follows_progress() {
        let mut s = state();
        s.drawer.drag_to(0.5);
        let vm = s.compute_viewmodel();
        let drawer = vm.drawer.unwrap();
        assert_eq!(drawer.width, 60);
        assert_eq!(drawer.visible, 30);
    }

    #[test]
    fn test_transcript_bubbles_and_typing_line() {
        let mut s = state();
        s.pipeline.submit(&mut s.store, "Hello", Duration::ZERO);
        let vm = s.compute_viewmodel();

        let kinds: Vec<BubbleKind> = vm.transcript.lines.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![BubbleKind::User, BubbleKind::Gap, BubbleKind::Typing]);
        let user = &vm.transcript.lines[0];
        assert_eq!(user.width, 7);
        assert_eq!(user.indent, 80 - 8);
        assert!(vm.header.typing);
    }

    #[test]
    fn test_transcript_keeps_newest_lines() {
        let mut s = state();
        s.set_viewport(8, 40);
        for i in 0..5 {
            s.pipeline.submit(&mut s.store, &format!("message {i}"), Duration::ZERO);
        }
        let vm = s.compute_viewmodel();
        assert_eq!(vm.transcript.lines.len(), 2);
        assert_eq!(vm.transcript.lines[1].kind, BubbleKind::Typing);
    }

    #[test]
    fn test_filter_narrows_and_highlights() {
        let mut s = state();
        let first = s.store.active_id();
        s.store.rename_session(first, "Trip Plan");
        s.store.create_session();
        s.filter_query = "trp".to_string();

        let ids: Vec<SessionId> = s.drawer_sessions().iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![first]);

        s.drawer.drag_to(1.0);
        let drawer = s.compute_viewmodel().drawer.unwrap();
        assert_eq!(drawer.rows.len(), 1);
        assert_eq!(drawer.rows[0].highlight_ranges.first(), Some(&(0, 2)));
        assert!(drawer.filter.is_some());
    }

    #[test]
    fn test_cursor_wraps() {
        let mut s = state();
        s.store.create_session();
        s.store.create_session();
        s.drawer_cursor = 2;
        s.move_cursor_down();
        assert_eq!(s.drawer_cursor, 0);
        s.move_cursor_up();
        assert_eq!(s.drawer_cursor, 2);
    }

    #[test]
    fn test_sync_cursor_follows_active() {
        let mut s = state();
        s.store.create_session();
        s.sync_cursor();
        assert_eq!(s.drawer_cursor, 1);
    }

    #[test]
    fn test_gesture_context_scales_cells() {
        let s = state();
        let ctx = s.gesture_context();
        assert!((ctx.drawer_width - 480.0).abs() < f32::EPSILON);
        assert!(!ctx.drawer_open);
        assert!(!ctx.keyboard_visible);
    }
}
