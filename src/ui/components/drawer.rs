//! Session drawer panel.
//!
//! Rendered at full width; the compositor shows only its rightmost
//! `visible` columns so the panel appears to slide in from the left.

use crate::ui::helpers::{highlighted_text, Line};
use crate::ui::layout::{delete_col, NEW_CHAT_ROW, TITLE_COL};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DrawerRow, DrawerView};

const CURSOR: &str = "▏";

/// Builds `rows` drawer lines, each `drawer.width` columns wide.
pub fn drawer_lines(drawer: &DrawerView, theme: &Theme, rows: usize) -> Vec<Line> {
    let c = &theme.colors;
    let base = Theme::fg_bg(&c.drawer_fg, &c.drawer_bg);
    let inner = drawer.width.saturating_sub(1);
    let mut lines = Vec::with_capacity(rows);

    let mut title = Line::new();
    title.push(" Chats", format!("{base}{}", Theme::bold()));
    title.push(format!(" ({})", drawer.rows.len()), format!("{base}{}", Theme::dim()));
    lines.push(title);

    lines.push({
        let mut border = Line::new();
        border.push("─".repeat(inner), Theme::fg_bg(&c.border, &c.drawer_bg));
        border
    });

    debug_assert_eq!(lines.len(), NEW_CHAT_ROW);
    let mut new_chat = Line::new();
    new_chat.push(
        " + New chat",
        format!("{}{}", Theme::fg_bg(&c.composer_focus, &c.drawer_bg), Theme::bold()),
    );
    lines.push(new_chat);

    if let Some(filter) = &drawer.filter {
        let mut line = Line::new();
        line.push(" / ", Theme::fg_bg(&c.text_dim, &c.drawer_bg));
        line.push(filter.query.clone(), base.clone());
        if filter.focused {
            line.push(CURSOR, Theme::fg_bg(&c.composer_focus, &c.drawer_bg));
        }
        lines.push(line);
    }

    for row in &drawer.rows {
        let (title_line, meta_line) = session_lines(row, theme, drawer.width);
        lines.push(title_line);
        lines.push(meta_line);
    }

    lines.truncate(rows);
    lines.resize(rows, Line::new());

    let edge = Theme::fg_bg(&c.border, &c.drawer_bg);
    lines
        .into_iter()
        .map(|mut line| {
            line.fit(inner, &base);
            line.push("│", edge.clone());
            line
        })
        .collect()
}

fn session_lines(row: &DrawerRow, theme: &Theme, width: usize) -> (Line, Line) {
    let c = &theme.colors;
    let bg = if row.is_selected { &c.selection_bg } else { &c.drawer_bg };
    let fg = if row.is_selected { &c.selection_fg } else { &c.drawer_fg };
    let base = Theme::fg_bg(fg, bg);

    let mut title = Line::new();
    if row.is_active {
        title.push(" ▸ ", Theme::fg_bg(&c.active_session_fg, bg));
    } else {
        title.push(" ".repeat(TITLE_COL), base.clone());
    }

    if row.is_editing {
        title.push(row.title.clone(), format!("{base}{}", Theme::bold()));
        title.push(CURSOR, Theme::fg_bg(&c.composer_focus, bg));
    } else {
        let highlight = Theme::fg_bg(&c.match_highlight_fg, &c.match_highlight_bg);
        title.append(highlighted_text(&row.title, &row.highlight_ranges, &base, &highlight));
    }

    title.fit(delete_col(width), &base);
    title.push("✕", Theme::fg_bg(&c.danger_fg, bg));

    let mut meta = Line::new();
    meta.push(" ".repeat(TITLE_COL), base.clone());
    meta.push(row.meta.clone(), format!("{base}{}", Theme::dim()));

    let inner = width.saturating_sub(1);
    title.fit(inner, &base);
    meta.fit(inner, &base);
    (title, meta)
}
