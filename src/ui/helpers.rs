//! Shared rendering utilities.
//!
//! Screen rows are built as [`Line`]s: sequences of styled spans measured in
//! character columns. Lines can be sliced by column, which is how the drawer is
//! composited over the chat surface and the modal over both, without
//! re-parsing ANSI sequences.
//!
//! # Example
//!
//! ```rust
//! use parley::ui::helpers::Line;
//!
//! let mut line = Line::new();
//! line.push("hello ", "").push("world", "\u{1b}[1m");
//! assert_eq!(line.width(), 11);
//! assert_eq!(line.slice(3, 5).plain(), "lo wo");
//! ```

use crate::ui::theme::Theme;
use std::fmt::Write as _;

/// Run of text sharing one ANSI style prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: String,
}

/// One screen row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Line of `width` spaces in `style`.
    #[must_use]
    pub fn blank(width: usize, style: &str) -> Self {
        let mut line = Self::new();
        line.push(" ".repeat(width), style);
        line
    }

    /// Appends a span; empty text is dropped.
    pub fn push(&mut self, text: impl Into<String>, style: impl Into<String>) -> &mut Self {
        let text = text.into();
        if !text.is_empty() {
            self.spans.push(Span {
                text,
                style: style.into(),
            });
        }
        self
    }

    /// Appends every span of `other`.
    pub fn append(&mut self, other: Self) -> &mut Self {
        self.spans.extend(other.spans);
        self
    }

    /// Width in columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.chars().count()).sum()
    }

    /// Pads with spaces in `style`, or truncates, to exactly `width` columns.
    pub fn fit(&mut self, width: usize, style: &str) -> &mut Self {
        let current = self.width();
        if current > width {
            *self = self.slice(0, width);
        } else if current < width {
            self.push(" ".repeat(width - current), style);
        }
        self
    }

    /// Columns `start..start + len`, keeping styles.
    #[must_use]
    pub fn slice(&self, start: usize, len: usize) -> Self {
        let end = start.saturating_add(len);
        let mut out = Self::new();
        let mut col = 0;

        for span in &self.spans {
            let span_len = span.text.chars().count();
            let span_end = col + span_len;
            if span_end > start && col < end {
                let from = start.saturating_sub(col);
                let to = (end - col).min(span_len);
                let text: String = span.text.chars().skip(from).take(to - from).collect();
                out.push(text, span.style.clone());
            }
            col = span_end;
            if col >= end {
                break;
            }
        }

        out
    }

    /// Same text with the dim attribute added to every span.
    #[must_use]
    pub fn dimmed(&self) -> Self {
        Self {
            spans: self
                .spans
                .iter()
                .map(|s| Span {
                    text: s.text.clone(),
                    style: format!("{}{}", s.style, Theme::dim()),
                })
                .collect(),
        }
    }

    /// Text without styling.
    #[must_use]
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Writes styled text, resetting after each styled span.
    pub fn write_to(&self, out: &mut String) {
        for span in &self.spans {
            if span.style.is_empty() {
                out.push_str(&span.text);
            } else {
                out.push_str(&span.style);
                out.push_str(&span.text);
                out.push_str(Theme::reset());
            }
        }
    }
}

/// Moves the cursor to a 1-indexed `(row, col)`.
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Splits `text` into spans with `ranges` (character indices, exclusive end)
/// in `highlight` style and the rest in `base` style.
#[must_use]
pub fn highlighted_text(text: &str, ranges: &[(usize, usize)], base: &str, highlight: &str) -> Line {
    let mut line = Line::new();
    if ranges.is_empty() {
        line.push(text, base);
        return line;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            line.push(chars[current_pos..start].iter().collect::<String>(), base);
        }
        if end > start.max(current_pos) {
            line.push(
                chars[start.max(current_pos)..end].iter().collect::<String>(),
                highlight,
            );
        }
        current_pos = current_pos.max(end);
    }

    if current_pos < chars.len() {
        line.push(chars[current_pos..].iter().collect::<String>(), base);
    }

    line
}

/// Shortens `text` to at most `max` columns, ending in `…` when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Greedy word wrap to `width` columns; words longer than a line are split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                lines.push(word.drain(..width).collect());
            }

            let sep = usize::from(current_len > 0);
            if current_len + sep + word.len() > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            } else if sep == 1 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }

        if current_len > 0 || lines.is_empty() {
            lines.push(current);
        }
    }

    lines
}
