//! Composer row.
//!
//! Shows the draft (or a placeholder) after a prompt glyph. While focused the
//! prompt takes the focus color and a cursor follows the text; long drafts
//! scroll so the tail stays visible.

use crate::ui::helpers::Line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ComposerInfo;

const PROMPT: &str = " › ";
const CURSOR: &str = "▏";

pub fn composer_line(composer: &ComposerInfo, theme: &Theme, cols: usize) -> Line {
    let c = &theme.colors;
    let prompt_style = if composer.focused {
        format!("{}{}", Theme::fg(&c.composer_focus), Theme::bold())
    } else {
        Theme::fg(&c.text_dim)
    };

    let mut line = Line::new();
    line.push(PROMPT, prompt_style);

    let room = cols.saturating_sub(PROMPT.chars().count() + 1);
    if composer.text.is_empty() {
        if composer.focused {
            line.push(CURSOR, Theme::fg(&c.composer_focus));
        }
        line.push(composer.placeholder.clone(), Theme::fg(&c.text_dim));
    } else {
        let len = composer.text.chars().count();
        let visible: String = composer.text.chars().skip(len.saturating_sub(room)).collect();
        line.push(visible, Theme::fg(&c.composer_fg));
        if composer.focused {
            line.push(CURSOR, Theme::fg(&c.composer_focus));
        }
    }

    line.fit(cols, "");
    line
}
