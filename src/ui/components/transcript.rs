//! Transcript rows: chat bubbles and the typing indicator.
//!
//! Bubble lines arrive wrapped and positioned in the view model; this module
//! only paints them. User bubbles sit on the right, assistant bubbles on the
//! left.

use crate::ui::helpers::Line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BubbleKind, BubbleLine, TranscriptView};

/// Builds exactly `height` rows, bottom-anchored.
pub fn transcript_lines(
    transcript: &TranscriptView,
    theme: &Theme,
    cols: usize,
    height: usize,
) -> Vec<Line> {
    let mut lines: Vec<Line> = transcript
        .lines
        .iter()
        .map(|bubble| bubble_line(bubble, theme, cols))
        .collect();

    if lines.is_empty() {
        if let Some(hint) = &transcript.empty_hint {
            let mut line = Line::new();
            let padding = cols.saturating_sub(hint.chars().count()) / 2;
            line.push(" ".repeat(padding), "");
            line.push(hint.clone(), Theme::fg(&theme.colors.text_dim));
            line.fit(cols, "");
            lines.push(line);
            // Center the hint vertically.
            let above = height.saturating_sub(1) / 2;
            let mut centered = vec![Line::blank(cols, ""); above];
            centered.append(&mut lines);
            lines = centered;
            lines.resize(height, Line::blank(cols, ""));
            return lines;
        }
    }

    let start = lines.len().saturating_sub(height);
    let mut window: Vec<Line> = lines.split_off(start);
    let mut padded = vec![Line::blank(cols, ""); height.saturating_sub(window.len())];
    padded.append(&mut window);
    padded
}

fn bubble_line(bubble: &BubbleLine, theme: &Theme, cols: usize) -> Line {
    let c = &theme.colors;
    let style = match bubble.kind {
        BubbleKind::User => Theme::fg_bg(&c.user_bubble_fg, &c.user_bubble_bg),
        BubbleKind::Assistant => Theme::fg_bg(&c.assistant_bubble_fg, &c.assistant_bubble_bg),
        BubbleKind::Typing => format!(
            "{}{}",
            Theme::fg_bg(&c.typing_fg, &c.assistant_bubble_bg),
            Theme::bold()
        ),
        BubbleKind::Gap => return Line::blank(cols, ""),
    };

    let mut body = Line::new();
    body.push(" ", style.clone());
    body.push(bubble.text.clone(), style.clone());
    body.fit(bubble.width, &style);

    let mut line = Line::new();
    line.push(" ".repeat(bubble.indent), "");
    line.append(body);
    line.fit(cols, "");
    line
}
