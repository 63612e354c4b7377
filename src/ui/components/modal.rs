//! Voice-chat placeholder modal: a framed box with static controls.

use crate::ui::helpers::{truncate, Line};
use crate::ui::layout::{ModalGeometry, MODAL_CONTROLS, MODAL_CONTROLS_ROW, MODAL_HEIGHT};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ModalInfo;

/// Builds the modal's rows, each `geometry.width` columns wide.
pub fn modal_lines(modal: &ModalInfo, theme: &Theme, geometry: &ModalGeometry) -> Vec<Line> {
    let c = &theme.colors;
    let frame = Theme::fg_bg(&c.modal_border, &c.drawer_bg);
    let body = Theme::fg_bg(&c.modal_fg, &c.drawer_bg);
    let inner = geometry.width.saturating_sub(2);

    let framed = |content: Line| {
        let mut line = Line::new();
        line.push("│", frame.clone());
        let mut content = content;
        content.fit(inner, &body);
        line.append(content);
        line.push("│", frame.clone());
        line
    };
    let centered = |text: &str, style: &str| {
        let text = truncate(text, inner);
        let mut line = Line::new();
        line.push(" ".repeat(inner.saturating_sub(text.chars().count()) / 2), body.clone());
        line.push(text, style.to_string());
        line
    };

    let title = truncate(&format!(" {} ", modal.title), inner.saturating_sub(1));
    let mut top = Line::new();
    top.push("╭─", frame.clone());
    top.push(title, format!("{body}{}", Theme::bold()));
    let rule = geometry.width.saturating_sub(1 + top.width());
    top.push("─".repeat(rule), frame.clone());
    top.push("╮", frame.clone());

    let mut lines = vec![top, framed(Line::new())];
    lines.push(framed(centered(&format!("● {}", modal.status), &Theme::fg_bg(&c.typing_fg, &c.drawer_bg))));
    lines.push(framed(Line::new()));

    debug_assert_eq!(lines.len(), MODAL_CONTROLS_ROW);
    let mut controls = Line::new();
    controls.push(" ".repeat(inner.saturating_sub(MODAL_CONTROLS.len()) / 2), body.clone());
    controls.push("[ Mute ]", body.clone());
    controls.push("   ", body.clone());
    controls.push("[ End ]", format!("{}{}", Theme::fg_bg(&c.danger_fg, &c.drawer_bg), Theme::bold()));
    debug_assert_eq!(controls.plain().trim(), MODAL_CONTROLS);
    lines.push(framed(controls));

    lines.push(framed(Line::new()));
    let mut bottom = Line::new();
    bottom.push("╰", frame.clone());
    bottom.push("─".repeat(inner), frame.clone());
    bottom.push("╯", frame);
    lines.push(bottom);

    debug_assert_eq!(lines.len(), MODAL_HEIGHT);
    lines
}
