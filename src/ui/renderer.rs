//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the view model from state, then composite
//! the components into a frame string with absolute cursor positioning. The
//! frame is returned rather than printed so the plugin shim owns stdout.
//!
//! # Example
//!
//! ```rust
//! use parley::app::AppState;
//! use parley::ui::render;
//!
//! let mut state = AppState::default();
//! state.set_viewport(24, 80);
//! let frame = render(&state);
//! assert!(frame.contains("New Chat"));
//! ```

use crate::app::AppState;
use crate::ui::components::compose_screen;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the current state at the last known viewport size.
#[must_use]
pub fn render(state: &AppState) -> String {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, &state.theme)
}

/// Renders a pre-computed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme) -> String {
    let mut out = String::with_capacity(vm.rows * vm.cols * 4);
    for (row, line) in compose_screen(vm, theme).iter().enumerate() {
        position_cursor(&mut out, row + 1, 1);
        line.write_to(&mut out);
    }
    out
}
