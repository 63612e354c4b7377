//! Screen geometry and tap hit-testing.
//!
//! The renderer and the tap handler share these coordinates, so a tap lands on
//! exactly what was drawn. All rows and columns are 0-indexed cells.
//!
//! ```text
//! row 0         ≡  Title                         typing…
//! row 1         ─────────────────────────────────────────
//! rows 2..r-4   transcript
//! row r-4       ─────────────────────────────────────────
//! row r-3       › composer
//! row r-2       ─────────────────────────────────────────
//! row r-1       footer hints
//! ```
//!
//! The drawer overlays the left edge. Drawer-local rows: title (0), border (1),
//! "+ New chat" (2), optional filter bar (3), then two rows per session (title
//! line with a `✕` near the right edge, then a metadata line).

use crate::domain::SessionId;
use crate::ui::viewmodel::UIViewModel;

/// Width of the `≡` menu control.
pub const MENU_WIDTH: usize = 3;
/// Drawer-local column where session titles start.
pub const TITLE_COL: usize = 3;
/// Drawer-local row of the "+ New chat" control.
pub const NEW_CHAT_ROW: usize = 2;
/// Rows per session entry.
pub const SESSION_ROWS: usize = 2;

pub const MODAL_HEIGHT: usize = 7;
const MODAL_MAX_WIDTH: usize = 40;
/// Modal row holding the controls.
pub const MODAL_CONTROLS_ROW: usize = 4;
pub const MODAL_CONTROLS: &str = "[ Mute ]   [ End ]";
const END_OFFSET: usize = 11;
const END_WIDTH: usize = 7;

/// Thing under a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Menu,
    NewChat,
    SessionTitle(SessionId),
    SessionRow(SessionId),
    DeleteSession(SessionId),
    Composer,
    ModalEnd,
    /// Chat surface next to an open drawer.
    Scrim,
    Transcript,
}

/// Row of the composer for a viewport height.
#[must_use]
pub const fn composer_row(rows: usize) -> usize {
    rows.saturating_sub(3)
}

/// Number of transcript rows for a viewport height.
#[must_use]
pub const fn transcript_height(rows: usize) -> usize {
    rows.saturating_sub(6)
}

/// Drawer-local column of the delete control.
#[must_use]
pub const fn delete_col(drawer_width: usize) -> usize {
    drawer_width.saturating_sub(3)
}

/// Drawer-local row where the session list starts.
#[must_use]
pub const fn list_top(has_filter: bool) -> usize {
    if has_filter {
        NEW_CHAT_ROW + 2
    } else {
        NEW_CHAT_ROW + 1
    }
}

/// Placement of the voice-chat modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalGeometry {
    pub top: usize,
    pub left: usize,
    pub width: usize,
    /// Screen column where the "End" control starts.
    pub end_col: usize,
}

impl ModalGeometry {
    /// Centers the modal in the viewport.
    #[must_use]
    pub fn centered(rows: usize, cols: usize) -> Self {
        let width = MODAL_MAX_WIDTH.min(cols.saturating_sub(4)).max(MODAL_CONTROLS.len() + 2);
        let top = rows.saturating_sub(MODAL_HEIGHT) / 2;
        let left = cols.saturating_sub(width) / 2;
        let inner = width - 2;
        let controls_left = left + 1 + inner.saturating_sub(MODAL_CONTROLS.len()) / 2;
        Self {
            top,
            left,
            width,
            end_col: controls_left + END_OFFSET,
        }
    }

    fn hits_end(&self, row: usize, col: usize) -> bool {
        row == self.top + MODAL_CONTROLS_ROW && (self.end_col..self.end_col + END_WIDTH).contains(&col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DrawerGeometry {
    width: usize,
    visible: usize,
    list_top: usize,
    /// Session id and title width, in display order.
    sessions: Vec<(SessionId, usize)>,
}

/// Hit-test map for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: usize,
    cols: usize,
    drawer: Option<DrawerGeometry>,
    modal: Option<ModalGeometry>,
}

impl Layout {
    #[must_use]
    pub fn new(vm: &UIViewModel) -> Self {
        let drawer = vm.drawer.as_ref().filter(|d| d.visible > 0).map(|d| DrawerGeometry {
            width: d.width,
            visible: d.visible,
            list_top: list_top(d.filter.is_some()),
            sessions: d
                .rows
                .iter()
                .map(|r| (r.id, r.title.chars().count()))
                .collect(),
        });

        Self {
            rows: vm.rows,
            cols: vm.cols,
            drawer,
            modal: vm.modal.as_ref().map(|_| ModalGeometry::centered(vm.rows, vm.cols)),
        }
    }

    /// Resolves a tap at `(row, col)`.
    ///
    /// While the modal is open only its "End" control is live.
    #[must_use]
    pub fn hit(&self, row: usize, col: usize) -> Option<HitTarget> {
        if row >= self.rows || col >= self.cols {
            return None;
        }

        if let Some(modal) = &self.modal {
            return modal.hits_end(row, col).then_some(HitTarget::ModalEnd);
        }

        if let Some(drawer) = &self.drawer {
            if col < drawer.visible {
                let local_col = col + drawer.width - drawer.visible;
                return Self::hit_drawer(drawer, row, local_col);
            }
            return Some(HitTarget::Scrim);
        }

        if row == 0 && col < MENU_WIDTH {
            return Some(HitTarget::Menu);
        }
        if row == composer_row(self.rows) {
            return Some(HitTarget::Composer);
        }
        if row >= 2 && row < 2 + transcript_height(self.rows) {
            return Some(HitTarget::Transcript);
        }
        None
    }

    fn hit_drawer(drawer: &DrawerGeometry, row: usize, col: usize) -> Option<HitTarget> {
        if row == NEW_CHAT_ROW {
            return Some(HitTarget::NewChat);
        }
        if row < drawer.list_top {
            return None;
        }

        let offset = row - drawer.list_top;
        let &(id, title_width) = drawer.sessions.get(offset / SESSION_ROWS)?;
        if offset % SESSION_ROWS == 0 {
            let delete = delete_col(drawer.width);
            if (delete.saturating_sub(1)..=delete + 1).contains(&col) {
                return Some(HitTarget::DeleteSession(id));
            }
            if (TITLE_COL..TITLE_COL + title_width).contains(&col) {
                return Some(HitTarget::SessionTitle(id));
            }
        }
        Some(HitTarget::SessionRow(id))
    }
}
