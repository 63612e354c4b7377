//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML color palettes. Two are built in (`midnight`, the default,
//! and `daylight`); custom palettes load from a file with the same shape.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e0e6f0"
//! text_normal = "#d3d9e4"
//! text_dim = "#6b7385"
//! border = "#2c3344"
//! user_bubble_fg = "#0f131b"
//! user_bubble_bg = "#7aa2f7"
//! assistant_bubble_fg = "#d3d9e4"
//! assistant_bubble_bg = "#232a38"
//! typing_fg = "#9ece6a"
//! composer_fg = "#e0e6f0"
//! composer_focus = "#7aa2f7"
//! drawer_fg = "#c0c8d6"
//! drawer_bg = "#11151d"
//! selection_fg = "#0f131b"
//! selection_bg = "#bb9af7"
//! active_session_fg = "#e0af68"
//! match_highlight_fg = "#0f131b"
//! match_highlight_bg = "#e0af68"
//! danger_fg = "#f7768e"
//! modal_fg = "#e0e6f0"
//! modal_border = "#bb9af7"
//! ```
//!
//! `header_bg` is optional.
//!
//! # Example
//!
//! ```rust
//! use parley::ui::theme::Theme;
//!
//! let theme = Theme::from_name("midnight").unwrap();
//! let styled = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(styled.starts_with("\u{1b}[1m"));
//! assert_eq!(theme.name, "midnight");
//! ```

use crate::domain::error::{ParleyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "midnight";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Footer, metadata and placeholder text.
    pub text_dim: String,
    pub border: String,

    pub user_bubble_fg: String,
    pub user_bubble_bg: String,
    pub assistant_bubble_fg: String,
    pub assistant_bubble_bg: String,
    pub typing_fg: String,

    pub composer_fg: String,
    /// Composer prompt color while the keyboard is visible.
    pub composer_focus: String,

    pub drawer_fg: String,
    pub drawer_bg: String,
    /// Drawer cursor row.
    pub selection_fg: String,
    pub selection_bg: String,
    /// Marker for the active session.
    pub active_session_fg: String,
    /// Fuzzy filter match highlight.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,
    /// Delete control.
    pub danger_fg: String,

    pub modal_fg: String,
    pub modal_border: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "midnight" => include_str!("../../themes/midnight.toml"),
            "daylight" => include_str!("../../themes/daylight.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ParleyError::Theme`] if the file cannot be read or is not a
    /// complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ParleyError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ParleyError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses a hex color, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Foreground and background together.
    #[must_use]
    pub fn fg_bg(fg: &str, bg: &str) -> String {
        format!("{}{}", Self::fg(fg), Self::bg(bg))
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Palette used if the embedded default cannot be parsed.
    fn fallback() -> Self {
        let c = |s: &str| s.to_string();
        Self {
            name: c(DEFAULT_THEME),
            colors: ThemeColors {
                header_fg: c("#ffffff"),
                header_bg: None,
                text_normal: c("#d0d0d0"),
                text_dim: c("#808080"),
                border: c("#404040"),
                user_bubble_fg: c("#000000"),
                user_bubble_bg: c("#5f87ff"),
                assistant_bubble_fg: c("#d0d0d0"),
                assistant_bubble_bg: c("#303030"),
                typing_fg: c("#87d787"),
                composer_fg: c("#ffffff"),
                composer_focus: c("#5f87ff"),
                drawer_fg: c("#d0d0d0"),
                drawer_bg: c("#1c1c1c"),
                selection_fg: c("#000000"),
                selection_bg: c("#af87ff"),
                active_session_fg: c("#ffaf00"),
                match_highlight_fg: c("#000000"),
                match_highlight_bg: c("#ffaf00"),
                danger_fg: c("#ff5f5f"),
                modal_fg: c("#ffffff"),
                modal_border: c("#af87ff"),
            },
        }
    }
}

impl Default for Theme {
    /// Returns the `midnight` theme.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_themes_parse() {
        for name in ["midnight", "daylight"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn test_default_is_midnight() {
        assert_eq!(Theme::default().name, "midnight");
    }

    #[test]
    fn test_fg_escape() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("nonsense"), "\u{1b}[48;2;255;255;255m");
    }

    #[test]
    fn test_from_file_roundtrips_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(include_str!("../../themes/daylight.toml").as_bytes())
            .unwrap();
        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme, Theme::from_name("daylight").unwrap());
    }

    #[test]
    fn test_from_file_rejects_incomplete_theme() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"broken\"").unwrap();
        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ParleyError::Theme(_)));
    }
}
