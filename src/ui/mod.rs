//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//!                                     │
//!                                     └→ Layout → tap hit-testing
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: view model types representing renderable UI state
//! - [`layout`]: screen geometry shared by rendering and hit-testing
//! - [`renderer`]: top-level rendering coordinator
//! - [`components`]: composable UI component renderers
//! - [`helpers`]: styled lines, wrapping, highlighting
//! - [`theme`]: color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use layout::{HitTarget, Layout};
pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    BubbleKind, BubbleLine, ComposerInfo, DrawerRow, DrawerView, FilterInfo, FooterInfo,
    HeaderInfo, ModalInfo, TranscriptView, UIViewModel,
};
