//! Header bar: menu control, centered session title, typing hint.

use crate::ui::helpers::{truncate, Line};
use crate::ui::layout::MENU_WIDTH;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

const TYPING_HINT: &str = "typing… ";

/// Builds the header row.
///
/// ```text
///  ≡            Trip Plan            typing…
/// ```
pub fn header_line(header: &HeaderInfo, theme: &Theme, cols: usize) -> Line {
    let c = &theme.colors;
    let base = c.header_bg.as_ref().map_or_else(
        || Theme::fg(&c.header_fg),
        |bg| Theme::fg_bg(&c.header_fg, bg),
    );
    let bold = format!("{base}{}", Theme::bold());

    let hint = if header.typing { TYPING_HINT } else { "" };
    let hint_len = hint.chars().count();
    let title = truncate(&header.title, cols.saturating_sub(2 * (MENU_WIDTH + hint_len)));
    let title_len = title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    let mut line = Line::new();
    line.push(" ≡ ", bold.clone());
    line.push(" ".repeat(padding.saturating_sub(MENU_WIDTH)), base.clone());
    line.push(title, bold);

    let used = line.width();
    line.push(" ".repeat(cols.saturating_sub(used + hint_len)), base.clone());
    if header.typing {
        let typing_style = c
            .header_bg
            .as_ref()
            .map_or_else(|| Theme::fg(&c.typing_fg), |bg| Theme::fg_bg(&c.typing_fg, bg));
        line.push(hint, typing_style);
    }
    line.fit(cols, &base);
    line
}
