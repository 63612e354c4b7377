//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (main.rs) and the core
//! components (store, pipeline, gesture recognizers, drawer controller).
//!
//! # Architecture
//!
//! ```text
//! Key/Mouse/Timer → Event → handle_event → state mutations → Actions → runtime
//!                                 ↓
//!                        compute_viewmodel → ui::render
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode and overlay types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Overlay};
pub use state::{AppState, GestureRoute, Viewport};
