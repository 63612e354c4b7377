//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point the plugin runtime calls. It
//! mutates [`AppState`] and returns a render flag plus the [`Action`]s the
//! runtime must execute.
//!
//! # Event Types
//!
//! - **Drawer**: `ToggleDrawer`, `NewChat`, `DeleteSession`, `BeginRename`,
//!   `SelectSession`, and the keyboard cursor events
//! - **Text entry**: `Char`, `Backspace`, `Submit`, `Escape`
//! - **Pointer**: `PointerDown`, `PointerMove`, `PointerUp` in terminal cells
//! - **Time**: `Tick`, which advances the drawer animation and delivers due
//!   replies
//!
//! # Timing
//!
//! Every call receives `now`, the time since plugin start. After an event is
//! handled the handler requests a `Tick` if the drawer is animating or a reply
//! is pending and no earlier tick is already on its way.
//!
//! # Example
//!
//! ```rust
//! use parley::app::{handle_event, AppState, Event};
//! use std::time::Duration;
//!
//! let mut state = AppState::default();
//! let (render, actions) = handle_event(&mut state, &Event::ToggleDrawer, Duration::ZERO)?;
//! assert!(render);
//! assert!(!actions.is_empty());
//! # Ok::<(), parley::domain::error::ParleyError>(())
//! ```

use crate::app::modes::{InputMode, Overlay};
use crate::app::state::GestureRoute;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::SessionId;
use crate::drawer::FRAME_INTERVAL;
use crate::gesture::{GestureIntent, Release};
use crate::pipeline::Delivery;
use crate::ui::layout::{HitTarget, Layout};
use std::time::Duration;

/// Events triggered by user input or the runtime clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Opens the drawer if closed or closing, closes it otherwise.
    ToggleDrawer,
    /// Creates a session, makes it active and closes the drawer.
    NewChat,
    DeleteSession(SessionId),
    /// Opens a title edit for the session.
    BeginRename(SessionId),
    /// Switches to the session and closes the drawer.
    SelectSession(SessionId),

    /// Moves the drawer cursor down (wraps to top).
    DrawerDown,
    /// Moves the drawer cursor up (wraps to bottom).
    DrawerUp,
    /// Switches to the session under the drawer cursor.
    ActivateSelected,
    DeleteSelected,
    RenameSelected,
    /// Focuses the drawer filter query.
    StartFilter,

    /// Shows the keyboard.
    FocusComposer,
    /// Hides the keyboard.
    DismissKeyboard,

    /// Appends a character to the focused text field.
    Char(char),
    /// Removes the last character from the focused text field.
    Backspace,
    /// Sends the composer, commits a rename, or opens the filtered session,
    /// depending on the input mode.
    Submit,
    /// Backs out of the innermost mode.
    Escape,
    /// Ends the voice-chat placeholder.
    CloseModal,

    PointerDown { row: usize, col: usize },
    PointerMove { row: usize, col: usize },
    PointerUp { row: usize, col: usize },

    /// Runtime timer fired.
    Tick,

    /// Hides the plugin pane.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI must be re-rendered and the actions to run in order.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the runtime contract stable for
/// handlers that touch I/O.
pub fn handle_event(state: &mut AppState, event: &Event, now: Duration) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let (render, mut actions) = dispatch(state, *event, now);
    if let Some(tick) = schedule_tick(state, now) {
        actions.push(tick);
    }
    Ok((render, actions))
}

#[allow(clippy::too_many_lines)]
fn dispatch(state: &mut AppState, event: Event, now: Duration) -> (bool, Vec<Action>) {
    match event {
        Event::ToggleDrawer => {
            if state.drawer.is_open() {
                close_drawer(state, now);
            } else {
                open_drawer(state, now);
            }
            (true, vec![])
        }
        Event::NewChat => {
            close_drawer(state, now);
            let id = state.store.create_session().id;
            tracing::debug!(session_id = %id, "new chat");
            state.sync_cursor();
            (true, vec![])
        }
        Event::DeleteSession(id) => (delete_session(state, id), vec![]),
        Event::BeginRename(id) => (begin_rename(state, id), vec![]),
        Event::SelectSession(id) => (select_session(state, id, now), vec![]),

        Event::DrawerDown => {
            state.move_cursor_down();
            (true, vec![])
        }
        Event::DrawerUp => {
            state.move_cursor_up();
            (true, vec![])
        }
        Event::ActivateSelected => {
            let Some(id) = state.selected_session() else {
                tracing::debug!("no session under cursor");
                return (false, vec![]);
            };
            (select_session(state, id, now), vec![])
        }
        Event::DeleteSelected => state
            .selected_session()
            .map_or((false, vec![]), |id| (delete_session(state, id), vec![])),
        Event::RenameSelected => state
            .selected_session()
            .map_or((false, vec![]), |id| (begin_rename(state, id), vec![])),
        Event::StartFilter => {
            if !state.drawer.is_open() {
                return (false, vec![]);
            }
            state.input_mode = InputMode::Filtering;
            state.drawer_cursor = 0;
            (true, vec![])
        }

        Event::FocusComposer => (focus_composer(state), vec![]),
        Event::DismissKeyboard => (dismiss_keyboard(state), vec![]),

        Event::Char(c) => (edit_text(state, |text| text.push(c)), vec![]),
        Event::Backspace => (
            edit_text(state, |text| {
                text.pop();
            }),
            vec![],
        ),
        Event::Submit => (submit(state, now), vec![]),
        Event::Escape => (escape(state, now), vec![]),
        Event::CloseModal => (close_modal(state), vec![]),

        Event::PointerDown { row, col } => (pointer_down(state, row, col, now), vec![]),
        Event::PointerMove { row, col } => (pointer_move(state, row, col, now), vec![]),
        Event::PointerUp { row, col } => (pointer_up(state, row, col, now), vec![]),

        Event::Tick => (tick(state, now), vec![]),

        Event::CloseFocus => (false, vec![Action::CloseFocus]),
    }
}

/// Requests a tick when the drawer is animating or a reply is pending, unless
/// an earlier one is already scheduled.
fn schedule_tick(state: &mut AppState, now: Duration) -> Option<Action> {
    let frame = state.drawer.is_animating().then(|| now + FRAME_INTERVAL);
    let due = match (frame, state.pipeline.next_due()) {
        (Some(a), Some(b)) => a.min(b),
        (a, b) => a.or(b)?,
    };

    if state.tick_deadline.is_some_and(|scheduled| scheduled <= due) {
        return None;
    }
    state.tick_deadline = Some(due);
    Some(Action::ScheduleTick {
        after: due.saturating_sub(now),
    })
}

fn tick(state: &mut AppState, now: Duration) -> bool {
    state.tick_deadline = None;

    let animating = state.drawer.is_animating();
    state.drawer.tick(now);

    let deliveries = state.pipeline.deliver_due(&mut state.store, now);
    for delivery in &deliveries {
        if let Delivery::Dropped { session_id } = delivery {
            tracing::debug!(session_id = %session_id, "reply for deleted session discarded");
        }
    }

    animating || !deliveries.is_empty()
}

fn open_drawer(state: &mut AppState, now: Duration) {
    if state.input_mode == InputMode::Composing {
        state.input_mode = InputMode::Normal;
    }
    state.drawer.open(now);
    state.sync_cursor();
}

/// Closes the drawer and leaves any drawer-scoped mode.
fn close_drawer(state: &mut AppState, now: Duration) {
    if state.store.title_edit().is_some() {
        state.store.cancel_title_edit();
    }
    if matches!(state.input_mode, InputMode::Renaming | InputMode::Filtering) {
        state.input_mode = InputMode::Normal;
    }
    state.drawer.close(now);
}

fn delete_session(state: &mut AppState, id: SessionId) -> bool {
    if !state.store.delete_session(id) {
        return false;
    }
    if state.input_mode == InputMode::Renaming && state.store.title_edit().is_none() {
        state.input_mode = InputMode::Normal;
    }
    state.clamp_cursor();
    true
}

fn begin_rename(state: &mut AppState, id: SessionId) -> bool {
    if !state.store.begin_title_edit(id) {
        return false;
    }
    state.input_mode = InputMode::Renaming;
    true
}

fn select_session(state: &mut AppState, id: SessionId, now: Duration) -> bool {
    if !state.store.switch_active(id) {
        return false;
    }
    close_drawer(state, now);
    true
}

fn focus_composer(state: &mut AppState) -> bool {
    if state.overlay.is_some() || state.input_mode == InputMode::Composing {
        return false;
    }
    if state.input_mode == InputMode::Renaming {
        state.store.cancel_title_edit();
    }
    state.input_mode = InputMode::Composing;
    true
}

fn dismiss_keyboard(state: &mut AppState) -> bool {
    if state.input_mode != InputMode::Composing {
        return false;
    }
    state.input_mode = InputMode::Normal;
    true
}

/// Applies `edit` to the text field the input mode points at.
fn edit_text(state: &mut AppState, edit: impl FnOnce(&mut String)) -> bool {
    if state.overlay.is_some() {
        return false;
    }

    match state.input_mode {
        InputMode::Normal => false,
        InputMode::Composing => {
            edit(&mut state.composer);
            true
        }
        InputMode::Renaming => match state.store.title_draft_mut() {
            Some(draft) => {
                edit(draft);
                true
            }
            None => false,
        },
        InputMode::Filtering => {
            edit(&mut state.filter_query);
            state.drawer_cursor = 0;
            tracing::trace!(query = %state.filter_query, "filter query updated");
            true
        }
    }
}

fn submit(state: &mut AppState, now: Duration) -> bool {
    if state.overlay.is_some() {
        return false;
    }

    match state.input_mode {
        InputMode::Renaming => {
            let committed = state.store.commit_title_edit();
            tracing::debug!(committed, "title edit closed");
            state.input_mode = InputMode::Normal;
            true
        }
        InputMode::Filtering => state
            .selected_session()
            .is_some_and(|id| select_session(state, id, now)),
        InputMode::Normal | InputMode::Composing => {
            let text = std::mem::take(&mut state.composer);
            if text.trim().is_empty() {
                tracing::debug!("empty submit, opening voice chat");
                state.overlay = Some(Overlay::VoiceChat);
                return true;
            }
            state.pipeline.submit(&mut state.store, &text, now);
            true
        }
    }
}

fn escape(state: &mut AppState, now: Duration) -> bool {
    if state.overlay.is_some() {
        return close_modal(state);
    }

    match state.input_mode {
        InputMode::Renaming => {
            state.store.cancel_title_edit();
            state.input_mode = InputMode::Normal;
            true
        }
        InputMode::Filtering => {
            clear_filter(state);
            true
        }
        InputMode::Composing => dismiss_keyboard(state),
        InputMode::Normal if !state.filter_query.is_empty() => {
            clear_filter(state);
            true
        }
        InputMode::Normal if state.drawer.is_open() => {
            close_drawer(state, now);
            true
        }
        InputMode::Normal => false,
    }
}

fn clear_filter(state: &mut AppState) {
    state.filter_query.clear();
    state.input_mode = InputMode::Normal;
    state.sync_cursor();
}

fn close_modal(state: &mut AppState) -> bool {
    state.overlay.take().is_some()
}

fn pointer_units(state: &AppState, row: usize, col: usize) -> (f32, f32) {
    #[allow(clippy::cast_precision_loss)]
    let (x, y) = (col as f32, row as f32);
    (x * state.viewport.cell_width, y * state.viewport.cell_height)
}

fn pointer_down(state: &mut AppState, row: usize, col: usize, now: Duration) -> bool {
    if state.gesture_route.is_some() {
        tracing::debug!("pointer down without release, abandoning previous gesture");
        state.surface_gesture.cancel();
        state.drawer_gesture.cancel();
    }

    let (x, y) = pointer_units(state, row, col);
    state.tracker.begin(x, y, now);

    let route = if state.overlay.is_some() {
        GestureRoute::Modal
    } else if state.drawer.is_visible() && col < state.drawer_visible_cols() {
        state.drawer_gesture.press();
        GestureRoute::Drawer
    } else {
        state.surface_gesture.press();
        GestureRoute::Surface
    };
    tracing::trace!(row, col, route = ?route, "pointer down");
    state.gesture_route = Some(route);
    state.gesture_start = Some(state.gesture_context());
    false
}

fn pointer_move(state: &mut AppState, row: usize, col: usize, now: Duration) -> bool {
    let (x, y) = pointer_units(state, row, col);
    let Some(sample) = state.tracker.sample(x, y, now) else {
        return false;
    };
    let ctx = state.gesture_start.unwrap_or_else(|| state.gesture_context());

    let intents = match state.gesture_route {
        Some(GestureRoute::Surface) => state.surface_gesture.moved(sample, &ctx),
        Some(GestureRoute::Drawer) => {
            let progress = state.drawer.sample(now);
            state.drawer_gesture.moved(sample, &ctx, progress)
        }
        Some(GestureRoute::Modal) | None => vec![],
    };
    apply_intents(state, &intents, now)
}

fn pointer_up(state: &mut AppState, row: usize, col: usize, now: Duration) -> bool {
    let (x, y) = pointer_units(state, row, col);
    let Some(sample) = state.tracker.end(x, y, now) else {
        return false;
    };
    let ctx = state
        .gesture_start
        .take()
        .unwrap_or_else(|| state.gesture_context());

    let release = match state.gesture_route.take() {
        Some(GestureRoute::Surface) => state.surface_gesture.release(sample, &ctx),
        Some(GestureRoute::Drawer) => state.drawer_gesture.release(sample, &ctx),
        Some(GestureRoute::Modal) => Release::Tap,
        None => return false,
    };

    match release {
        Release::Tap => tap(state, row, col, now),
        Release::Intents(intents) => apply_intents(state, &intents, now),
    }
}

fn apply_intents(state: &mut AppState, intents: &[GestureIntent], now: Duration) -> bool {
    for intent in intents {
        tracing::trace!(intent = ?intent, "applying gesture intent");
        match *intent {
            GestureIntent::BeginDrag => {
                state.drawer.begin_drag(now);
            }
            GestureIntent::SetProgress(progress) => state.drawer.drag_to(progress),
            GestureIntent::OpenDrawer => open_drawer(state, now),
            GestureIntent::CloseDrawer => close_drawer(state, now),
            GestureIntent::SnapClosed => state.drawer.snap_back(now),
            GestureIntent::SnapOpen => state.drawer.settle_open(now),
            GestureIntent::FocusComposer => {
                focus_composer(state);
            }
            GestureIntent::DismissKeyboard => {
                dismiss_keyboard(state);
            }
        }
    }
    !intents.is_empty()
}

fn tap(state: &mut AppState, row: usize, col: usize, now: Duration) -> bool {
    let target = Layout::new(&state.compute_viewmodel()).hit(row, col);
    tracing::debug!(row, col, target = ?target, "tap");

    match target {
        Some(HitTarget::Menu) => dispatch(state, Event::ToggleDrawer, now).0,
        Some(HitTarget::NewChat) => dispatch(state, Event::NewChat, now).0,
        Some(HitTarget::SessionTitle(id)) => begin_rename(state, id),
        Some(HitTarget::SessionRow(id)) => select_session(state, id, now),
        Some(HitTarget::DeleteSession(id)) => delete_session(state, id),
        Some(HitTarget::Composer) => focus_composer(state),
        Some(HitTarget::ModalEnd) => close_modal(state),
        Some(HitTarget::Scrim) => {
            close_drawer(state, now);
            true
        }
        Some(HitTarget::Transcript) => dismiss_keyboard(state),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawer::{DrawerController, DrawerPhase};
    use crate::pipeline::{MessagePipeline, ScriptedResponses};
    use crate::ui::theme::Theme;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn state() -> AppState {
        let pipeline = MessagePipeline::new(
            ms(1000),
            "Welcome!".to_string(),
            Box::new(ScriptedResponses::new(["Sure.", "Okay."])),
        );
        let mut state = AppState::new(pipeline, DrawerController::default(), Theme::default());
        state.set_viewport(24, 80);
        state
    }

    fn send(state: &mut AppState, event: Event, now: Duration) -> (bool, Vec<Action>) {
        handle_event(state, &event, now).unwrap()
    }

    fn type_text(state: &mut AppState, text: &str, now: Duration) {
        for c in text.chars() {
            send(state, Event::Char(c), now);
        }
    }

    /// Ticks every 16ms until nothing is scheduled.
    fn settle(state: &mut AppState, mut now: Duration) -> Duration {
        for _ in 0..500 {
            if state.tick_deadline.is_none() {
                break;
            }
            now += FRAME_INTERVAL;
            send(state, Event::Tick, now);
        }
        now
    }

    #[test]
    fn test_toggle_drawer_animates_with_ticks() {
        let mut s = state();
        let (render, actions) = send(&mut s, Event::ToggleDrawer, ms(0));
        assert!(render);
        assert_eq!(actions, vec![Action::ScheduleTick { after: FRAME_INTERVAL }]);
        assert!(s.drawer.is_open());

        settle(&mut s, ms(0));
        assert!((s.drawer.progress() - 1.0).abs() < f32::EPSILON);
        assert!(s.tick_deadline.is_none());
    }

    #[test]
    fn test_tick_not_rescheduled_when_earlier_pending() {
        let mut s = state();
        send(&mut s, Event::FocusComposer, ms(0));
        type_text(&mut s, "Hi", ms(0));
        let (_, actions) = send(&mut s, Event::Submit, ms(0));
        assert_eq!(actions, vec![Action::ScheduleTick { after: ms(1000) }]);

        let (_, actions) = send(&mut s, Event::ToggleDrawer, ms(10));
        assert_eq!(actions, vec![Action::ScheduleTick { after: FRAME_INTERVAL }]);

        let (_, actions) = send(&mut s, Event::DrawerDown, ms(12));
        assert!(actions.is_empty());
    }

    #[test]
    fn test_submit_clears_composer_and_delivers_welcome() {
        let mut s = state();
        send(&mut s, Event::FocusComposer, ms(0));
        type_text(&mut s, "Hello", ms(0));
        send(&mut s, Event::Submit, ms(0));

        assert!(s.composer.is_empty());
        assert!(s.is_typing());
        assert_eq!(s.store.active().messages().len(), 1);

        let (render, _) = send(&mut s, Event::Tick, ms(1000));
        assert!(render);
        assert!(!s.is_typing());
        let messages = s.store.active().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text(), "Welcome!");
    }

    #[test]
    fn test_empty_submit_opens_voice_chat() {
        let mut s = state();
        send(&mut s, Event::Submit, ms(0));
        assert_eq!(s.overlay, Some(Overlay::VoiceChat));
        assert!(s.store.active().messages().is_empty());

        // Text keys are swallowed while the modal is up.
        send(&mut s, Event::FocusComposer, ms(0));
        assert_eq!(s.input_mode, InputMode::Normal);

        send(&mut s, Event::Escape, ms(0));
        assert_eq!(s.overlay, None);
    }

    #[test]
    fn test_reply_for_deleted_session_is_dropped() {
        let mut s = state();
        let first = s.store.active_id();
        s.store.create_session();
        s.store.switch_active(first);

        send(&mut s, Event::FocusComposer, ms(0));
        type_text(&mut s, "Hello", ms(0));
        send(&mut s, Event::Submit, ms(0));
        send(&mut s, Event::DeleteSession(first), ms(10));

        send(&mut s, Event::Tick, ms(1000));
        assert_eq!(s.store.len(), 1);
        assert!(s.store.active().messages().is_empty());
        assert!(s.pipeline.is_idle());
    }

    #[test]
    fn test_rename_flow_commits_trimmed_title() {
        let mut s = state();
        let id = s.store.active_id();
        send(&mut s, Event::ToggleDrawer, ms(0));
        send(&mut s, Event::BeginRename(id), ms(0));
        assert_eq!(s.input_mode, InputMode::Renaming);

        for _ in 0.."New Chat".len() {
            send(&mut s, Event::Backspace, ms(0));
        }
        type_text(&mut s, " Trip Plan ", ms(0));
        send(&mut s, Event::Submit, ms(0));

        assert_eq!(s.input_mode, InputMode::Normal);
        assert_eq!(s.store.active().title, "Trip Plan");
    }

    #[test]
    fn test_rename_escape_keeps_title() {
        let mut s = state();
        let id = s.store.active_id();
        send(&mut s, Event::BeginRename(id), ms(0));
        type_text(&mut s, "xyz", ms(0));
        send(&mut s, Event::Escape, ms(0));
        assert_eq!(s.store.active().title, "New Chat");
        assert!(s.store.title_edit().is_none());
    }

    #[test]
    fn test_filter_then_activate() {
        let mut s = state();
        let first = s.store.active_id();
        s.store.rename_session(first, "Trip Plan");
        s.store.create_session();

        send(&mut s, Event::ToggleDrawer, ms(0));
        send(&mut s, Event::StartFilter, ms(0));
        type_text(&mut s, "trip", ms(0));
        assert_eq!(s.selected_session(), Some(first));

        send(&mut s, Event::Submit, ms(0));
        assert_eq!(s.store.active_id(), first);
        assert_eq!(s.input_mode, InputMode::Normal);
        assert!(!s.drawer.is_open());
    }

    #[test]
    fn test_escape_steps_back() {
        let mut s = state();
        send(&mut s, Event::FocusComposer, ms(0));
        assert!(s.keyboard_visible());
        send(&mut s, Event::Escape, ms(0));
        assert!(!s.keyboard_visible());

        send(&mut s, Event::ToggleDrawer, ms(0));
        send(&mut s, Event::Escape, ms(0));
        assert!(!s.drawer.is_open());
    }

    #[test]
    fn test_menu_tap_opens_drawer() {
        let mut s = state();
        send(&mut s, Event::PointerDown { row: 0, col: 1 }, ms(0));
        let (render, _) = send(&mut s, Event::PointerUp { row: 0, col: 1 }, ms(50));
        assert!(render);
        assert!(s.drawer.is_open());
    }

    #[test]
    fn test_swipe_right_opens_drawer() {
        let mut s = state();
        send(&mut s, Event::PointerDown { row: 10, col: 5 }, ms(0));
        send(&mut s, Event::PointerMove { row: 10, col: 8 }, ms(20));
        assert!(s.surface_gesture.is_dragging());
        assert!(s.drawer.progress() > 0.0);

        send(&mut s, Event::PointerMove { row: 10, col: 14 }, ms(40));
        send(&mut s, Event::PointerUp { row: 10, col: 14 }, ms(60));
        assert!(s.drawer.is_open());
        assert!(s.drawer.is_animating());
    }

    /// Presses at `from`, moves to `to` at `moved_at`, releases there at
    /// `released_at`, then runs the drawer animation out.
    fn drag(
        state: &mut AppState,
        from: (usize, usize),
        to: (usize, usize),
        start: Duration,
        moved_at: Duration,
        released_at: Duration,
    ) {
        send(state, Event::PointerDown { row: from.0, col: from.1 }, start);
        send(state, Event::PointerMove { row: to.0, col: to.1 }, moved_at);
        send(state, Event::PointerUp { row: to.0, col: to.1 }, released_at);
        settle(state, released_at);
    }

    #[test]
    fn test_swipe_past_threshold_opens_drawer() {
        let mut s = state();
        // 8 columns of 8 units: dx = 64, released after the pointer rested.
        drag(&mut s, (10, 5), (10, 13), ms(0), ms(200), ms(400));

        assert_eq!(s.drawer.phase(), DrawerPhase::Open);
        assert!((s.drawer.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_long_drag_past_half_width_settles_open() {
        let mut s = state();
        send(&mut s, Event::PointerDown { row: 10, col: 2 }, ms(0));
        send(&mut s, Event::PointerMove { row: 10, col: 20 }, ms(50));
        send(&mut s, Event::PointerMove { row: 10, col: 40 }, ms(100));
        assert!(s.drawer.progress() > 0.5);

        let (render, actions) = send(&mut s, Event::PointerUp { row: 10, col: 40 }, ms(150));
        assert!(render);
        assert!(!actions.is_empty());
        assert!(s.drawer.is_animating());

        settle(&mut s, ms(150));
        assert_eq!(s.drawer.phase(), DrawerPhase::Open);
        assert!(s.tick_deadline.is_none());
    }

    #[test]
    fn test_swipe_left_from_scrim_closes_open_drawer() {
        let mut s = state();
        send(&mut s, Event::ToggleDrawer, ms(0));
        let now = settle(&mut s, ms(0));
        assert_eq!(s.drawer.phase(), DrawerPhase::Open);

        drag(&mut s, (10, 70), (10, 62), now, now + ms(100), now + ms(300));

        assert_eq!(s.drawer.phase(), DrawerPhase::Closed);
        assert!(s.drawer.progress().abs() < f32::EPSILON);
    }

    #[test]
    fn test_slow_short_swipe_snaps_back() {
        let mut s = state();
        // dx = 32 over 320ms: vx = 0.1, below the flick velocity.
        drag(&mut s, (10, 5), (10, 9), ms(0), ms(320), ms(330));

        assert_eq!(s.drawer.phase(), DrawerPhase::Closed);
        assert!(s.drawer.progress().abs() < f32::EPSILON);
    }

    #[test]
    fn test_gesture_judged_against_press_context() {
        let mut s = state();
        send(&mut s, Event::PointerDown { row: 10, col: 2 }, ms(0));
        let pressed = s.gesture_start;
        assert_eq!(pressed.map(|ctx| ctx.drawer_open), Some(false));

        send(&mut s, Event::PointerMove { row: 10, col: 40 }, ms(50));
        assert!(s.drawer.is_open());
        assert_eq!(s.gesture_start, pressed);

        send(&mut s, Event::PointerUp { row: 10, col: 40 }, ms(100));
        assert!(s.gesture_start.is_none());
    }

    #[test]
    fn test_scrim_tap_closes_drawer() {
        let mut s = state();
        send(&mut s, Event::ToggleDrawer, ms(0));
        let now = settle(&mut s, ms(0));

        send(&mut s, Event::PointerDown { row: 10, col: 70 }, now);
        send(&mut s, Event::PointerUp { row: 10, col: 70 }, now + ms(30));
        assert!(!s.drawer.is_open());
    }

    #[test]
    fn test_drawer_taps_create_and_switch() {
        let mut s = state();
        let first = s.store.active_id();
        send(&mut s, Event::ToggleDrawer, ms(0));
        let now = settle(&mut s, ms(0));

        // "+ New chat" row.
        send(&mut s, Event::PointerDown { row: 2, col: 4 }, now);
        send(&mut s, Event::PointerUp { row: 2, col: 4 }, now);
        assert_eq!(s.store.len(), 2);
        assert_ne!(s.store.active_id(), first);

        send(&mut s, Event::ToggleDrawer, now);
        let now = settle(&mut s, now);
        // Metadata line of the first session.
        send(&mut s, Event::PointerDown { row: 4, col: 4 }, now);
        send(&mut s, Event::PointerUp { row: 4, col: 4 }, now);
        assert_eq!(s.store.active_id(), first);
    }

    #[test]
    fn test_close_focus_action() {
        let mut s = state();
        let (render, actions) = send(&mut s, Event::CloseFocus, ms(0));
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
