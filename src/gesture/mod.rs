//! Gesture recognition: pointer samples in, discrete intents out.
//!
//! Two recognizers consume the same [`PointerSample`] stream:
//!
//! - [`SurfaceRecognizer`] handles drags on the chat surface while the drawer is
//!   closed: live drawer reveal, swipe open/close, composer focus and keyboard
//!   dismissal.
//! - [`DrawerRecognizer`] takes over while the drawer is open or moving, making
//!   drags relative to the progress captured when the gesture started.
//!
//! Both are explicit state machines with no UI dependency. The app routes raw
//! pointer events through a [`PointerTracker`] and applies the returned
//! [`GestureIntent`]s to the drawer controller and input mode.
//!
//! # Units
//!
//! Distances are abstract units (the plugin scales terminal cells by the
//! configured cell size). Velocities are units per millisecond.

pub mod drawer;
pub mod surface;
pub mod tracker;

pub use drawer::DrawerRecognizer;
pub use surface::SurfaceRecognizer;
pub use tracker::PointerTracker;

/// One pointer sample within a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    /// Cumulative horizontal displacement from the gesture start.
    pub dx: f32,
    /// Cumulative vertical displacement from the gesture start.
    pub dy: f32,
    /// Instantaneous horizontal velocity.
    pub vx: f32,
    /// Instantaneous vertical velocity.
    pub vy: f32,
}

impl PointerSample {
    #[must_use]
    pub const fn new(dx: f32, dy: f32, vx: f32, vy: f32) -> Self {
        Self { dx, dy, vx, vy }
    }
}

/// Environment the recognizers need to decide, snapshotted per event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    /// Drawer fully or partially open (not settled closed).
    pub drawer_open: bool,
    /// Composer focused, i.e. the on-screen keyboard is up.
    pub keyboard_visible: bool,
    /// Drawer width in units, the distance mapping to progress 1.
    pub drawer_width: f32,
}

/// Discrete outcome of a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureIntent {
    /// The gesture started driving the drawer interactively; stop any animation.
    BeginDrag,
    /// Live drawer progress in `[0, 1]`.
    SetProgress(f32),
    /// Animate the drawer open.
    OpenDrawer,
    /// Animate the drawer closed.
    CloseDrawer,
    /// Abandoned opening drag: animate back to closed.
    SnapClosed,
    /// Abandoned closing drag: animate back to open.
    SnapOpen,
    /// Focus the composer (show the keyboard).
    FocusComposer,
    /// Dismiss the keyboard.
    DismissKeyboard,
}

/// Result of a pointer release.
#[derive(Debug, Clone, PartialEq)]
pub enum Release {
    /// The gesture was never claimed: treat it as a tap at the release point.
    Tap,
    /// Claimed gesture; apply the intents in order, last applied wins.
    Intents(Vec<GestureIntent>),
}

/// Distance and velocity thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    /// Vertical claim distance while the keyboard is visible.
    pub keyboard_claim: f32,
    /// Claim distance on either axis otherwise.
    pub claim: f32,
    /// Minimum horizontal distance for the dominance claim.
    pub dominance_claim: f32,
    /// Ratio by which horizontal motion must dominate vertical motion.
    pub dominance_ratio: f32,
    /// Horizontal distance before a surface drag reveals the drawer.
    pub drag_activation: f32,
    /// Swipe distance that opens or closes the drawer outright.
    pub swipe: f32,
    /// Release velocity that turns a short swipe into a flick.
    pub flick_velocity: f32,
    /// Upward distance that focuses the composer.
    pub focus: f32,
    /// Downward distance that dismisses the keyboard.
    pub dismiss: f32,
    /// Horizontal claim distance of the drawer recognizer.
    pub drawer_claim: f32,
    /// Fraction of the drawer width a closing drag must cover to close.
    pub drawer_close_fraction: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            keyboard_claim: 5.0,
            claim: 10.0,
            dominance_claim: 5.0,
            dominance_ratio: 2.0,
            drag_activation: 20.0,
            swipe: 50.0,
            flick_velocity: 0.3,
            focus: 50.0,
            dismiss: 20.0,
            drawer_claim: 8.0,
            drawer_close_fraction: 0.4,
        }
    }
}

/// Maps a drag distance to drawer progress.
pub(crate) fn progress_for(distance: f32, drawer_width: f32) -> f32 {
    if drawer_width <= 0.0 {
        return 0.0;
    }
    (distance / drawer_width).clamp(0.0, 1.0)
}
