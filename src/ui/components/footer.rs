//! Footer help bar with centered keybinding hints.

use crate::ui::helpers::{truncate, Line};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Builds the footer row, truncating hints that exceed the width.
pub fn footer_line(footer: &FooterInfo, theme: &Theme, cols: usize) -> Line {
    let style = Theme::fg(&theme.colors.text_dim);
    let help_text = truncate(&footer.keybindings, cols);
    let padding = cols.saturating_sub(help_text.chars().count()) / 2;

    let mut line = Line::new();
    line.push(" ".repeat(padding), "");
    line.push(help_text, style);
    line.fit(cols, "");
    line
}
