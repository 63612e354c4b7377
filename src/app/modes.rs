//! Input mode and overlay state types.
//!
//! The input mode decides how keys are interpreted and whether the on-screen
//! keyboard is considered visible:
//!
//! - **Normal**: chat surface has focus; single-key commands are active.
//! - **Composing**: composer has focus ("keyboard visible"); keys type text.
//! - **Renaming**: a session title edit is open in the drawer.
//! - **Filtering**: the drawer filter query has focus.
//!
//! Overlays sit above every mode and swallow input until dismissed.
//!
//! # Example
//!
//! ```rust
//! use parley::app::modes::{InputMode, Overlay};
//!
//! let mode = InputMode::Composing;
//! assert!(mode.keyboard_visible());
//! assert_ne!(Some(Overlay::VoiceChat), None);
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Surface focus.
    ///
    /// Keybindings: Tab (drawer), i (compose), q (hide), and j/k/n/d/r/Enter/`/`
    /// while the drawer is open.
    #[default]
    Normal,

    /// Composer focus; printable keys append to the draft.
    Composing,

    /// Title edit in progress; printable keys edit the draft title.
    Renaming,

    /// Drawer filter focus; printable keys edit the filter query.
    Filtering,
}

impl InputMode {
    /// Whether the composer holds focus, i.e. the keyboard is up.
    #[must_use]
    pub const fn keyboard_visible(self) -> bool {
        matches!(self, Self::Composing)
    }
}

/// Modal layer shown above the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Voice-chat placeholder with static controls.
    VoiceChat,
}
