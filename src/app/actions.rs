//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` alongside its render flag. The
//! core never talks to Zellij directly; the plugin shim translates these into
//! host calls.
//!
//! # Example
//!
//! ```rust
//! use parley::app::Action;
//! use std::time::Duration;
//!
//! let actions = vec![Action::ScheduleTick { after: Duration::from_millis(16) }];
//! assert_eq!(actions.len(), 1);
//! ```

use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to leave (pressing 'q').
    CloseFocus,

    /// Requests a `Tick` event after the given delay.
    ///
    /// Drives drawer animation frames and pending reply delivery. The runtime
    /// may coalesce requests; the handler re-schedules on every tick that
    /// still has work.
    ScheduleTick {
        /// Delay before the tick.
        after: Duration,
    },
}
