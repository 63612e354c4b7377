//! Composable UI component renderers.
//!
//! Each component turns one part of the view model into [`Line`]s; this module
//! stacks and composites them into a full screen.
//!
//! # Components
//!
//! - [`header`]: menu control, title, typing hint
//! - [`transcript`]: chat bubbles and typing indicator
//! - [`composer`]: draft input row
//! - [`footer`]: keybinding hints
//! - [`drawer`]: session list panel
//! - [`modal`]: voice-chat placeholder
//!
//! # Compositing
//!
//! ```text
//! surface (header, transcript, composer, footer)
//!   └─ drawer: rightmost `visible` columns over the left edge, surface dimmed
//!        └─ modal: centered box over everything
//! ```

mod composer;
mod drawer;
mod footer;
mod header;
mod modal;
mod transcript;

use crate::ui::helpers::Line;
use crate::ui::layout::{composer_row, transcript_height, ModalGeometry};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use composer::composer_line;
use drawer::drawer_lines;
use footer::footer_line;
use header::header_line;
use modal::modal_lines;
use transcript::transcript_lines;

fn border_line(theme: &Theme, cols: usize) -> Line {
    let mut line = Line::new();
    line.push("─".repeat(cols), Theme::fg(&theme.colors.border));
    line
}

/// Builds the chat surface without overlays.
fn surface_lines(vm: &UIViewModel, theme: &Theme) -> Vec<Line> {
    let (rows, cols) = (vm.rows, vm.cols);
    let mut lines = Vec::with_capacity(rows);

    lines.push(header_line(&vm.header, theme, cols));
    lines.push(border_line(theme, cols));
    lines.extend(transcript_lines(&vm.transcript, theme, cols, transcript_height(rows)));
    lines.push(border_line(theme, cols));
    debug_assert!(rows < 6 || lines.len() == composer_row(rows));
    lines.push(composer_line(&vm.composer, theme, cols));
    lines.push(border_line(theme, cols));
    lines.push(footer_line(&vm.footer, theme, cols));

    // Viewports too short for the chrome keep the top rows.
    lines.truncate(rows);
    lines
}

/// Composites every layer into exactly `vm.rows` lines of `vm.cols` columns.
#[must_use]
pub fn compose_screen(vm: &UIViewModel, theme: &Theme) -> Vec<Line> {
    let cols = vm.cols;
    let mut screen = surface_lines(vm, theme);

    if let Some(drawer) = vm.drawer.as_ref().filter(|d| d.visible > 0) {
        let visible = drawer.visible.min(cols);
        let panel = drawer_lines(drawer, theme, vm.rows);
        screen = screen
            .iter()
            .zip(panel)
            .map(|(surface, panel)| {
                let mut line = panel.slice(drawer.width.saturating_sub(visible), visible);
                line.append(surface.slice(visible, cols - visible).dimmed());
                line
            })
            .collect();
    }

    if let Some(modal) = &vm.modal {
        let geometry = ModalGeometry::centered(vm.rows, cols);
        for (offset, boxed) in modal_lines(modal, theme, &geometry).into_iter().enumerate() {
            let Some(line) = screen.get_mut(geometry.top + offset) else {
                break;
            };
            let mut composed = line.slice(0, geometry.left);
            composed.append(boxed);
            composed.append(line.slice(geometry.left + geometry.width, cols));
            *line = composed;
        }
    }

    for line in &mut screen {
        line.fit(cols, "");
    }
    screen
}
