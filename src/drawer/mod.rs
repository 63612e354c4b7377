//! Drawer animation controller.
//!
//! A single progress value in `[0, 1]` (0 closed, 1 open) driven either by a
//! commanded animation or directly by a drag:
//!
//! ```text
//!            open/close/toggle/snap            tick reaches end
//!   Closed ─────────────────────────▶ Animating ───────────────▶ Open / Closed
//!     ▲  │                              │   ▲
//!     │  │ begin_drag                   │   │ open/close (preempts)
//!     │  ▼                 begin_drag   ▼   │
//!     └─ Dragging ◀─────────────────────┘───┘
//! ```
//!
//! Commands never queue: a new command or drag samples the in-flight
//! animation at `now` and continues from that value.

pub mod easing;

pub use easing::Curve;

use std::time::Duration;

/// Default duration of the spring opening animation.
pub const DEFAULT_OPEN_DURATION: Duration = Duration::from_millis(300);

/// Default duration of the ease-out closing animation.
pub const DEFAULT_CLOSE_DURATION: Duration = Duration::from_millis(250);

/// Interval between animation frames requested from the runtime.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Phase of the drawer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawerPhase {
    Closed,
    Open,
    /// Progress follows a live drag.
    Dragging,
    /// Commanded transition in flight.
    Animating {
        from: f32,
        to: f32,
        started_at: Duration,
        duration: Duration,
        curve: Curve,
    },
}

/// Owner of the drawer progress value.
#[derive(Debug, Clone)]
pub struct DrawerController {
    progress: f32,
    phase: DrawerPhase,
    open_duration: Duration,
    close_duration: Duration,
    width_fraction: f32,
}

impl DrawerController {
    /// Creates a closed drawer.
    ///
    /// `width_fraction` is the drawer width relative to the viewport and scales
    /// the rendering offset.
    #[must_use]
    pub fn new(open_duration: Duration, close_duration: Duration, width_fraction: f32) -> Self {
        Self {
            progress: 0.0,
            phase: DrawerPhase::Closed,
            open_duration,
            close_duration,
            width_fraction: width_fraction.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    #[must_use]
    pub const fn phase(&self) -> DrawerPhase {
        self.phase
    }

    #[must_use]
    pub const fn width_fraction(&self) -> f32 {
        self.width_fraction
    }

    /// Horizontal rendering offset: `-width_fraction · (1 - progress)`.
    #[must_use]
    pub fn offset(&self) -> f32 {
        -self.width_fraction * (1.0 - self.progress)
    }

    /// Whether the drawer is open or heading open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        match self.phase {
            DrawerPhase::Open => true,
            DrawerPhase::Closed => false,
            DrawerPhase::Dragging => self.progress >= 0.5,
            DrawerPhase::Animating { to, .. } => to >= 0.5,
        }
    }

    /// Whether any part of the drawer is on screen.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.progress > 0.0
    }

    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(self.phase, DrawerPhase::Animating { .. })
    }

    /// Progress at `now` without mutating state.
    #[must_use]
    pub fn sample(&self, now: Duration) -> f32 {
        match self.phase {
            DrawerPhase::Animating {
                from,
                to,
                started_at,
                duration,
                curve,
            } => {
                let t = normalized(now.saturating_sub(started_at), duration);
                (from + (to - from) * curve.at(t)).clamp(0.0, 1.0)
            }
            _ => self.progress,
        }
    }

    /// Animates open with the spring curve.
    pub fn open(&mut self, now: Duration) {
        self.animate_to(1.0, now);
    }

    /// Animates closed with the ease-out curve.
    pub fn close(&mut self, now: Duration) {
        self.animate_to(0.0, now);
    }

    /// Opens if closed or closing, closes otherwise.
    pub fn toggle(&mut self, now: Duration) {
        if self.is_open() {
            self.close(now);
        } else {
            self.open(now);
        }
    }

    /// Returns an abandoned opening drag to closed.
    pub fn snap_back(&mut self, now: Duration) {
        self.close(now);
    }

    /// Returns an abandoned closing drag to open.
    pub fn settle_open(&mut self, now: Duration) {
        self.open(now);
    }

    /// Stops any animation and hands progress to a drag.
    ///
    /// Returns the captured progress, which becomes the drag baseline.
    pub fn begin_drag(&mut self, now: Duration) -> f32 {
        self.progress = self.sample(now);
        self.phase = DrawerPhase::Dragging;
        tracing::trace!(baseline = self.progress, "drawer drag started");
        self.progress
    }

    /// Assigns progress directly during a drag.
    pub fn drag_to(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
        self.phase = DrawerPhase::Dragging;
    }

    /// Advances the animation to `now`.
    ///
    /// Returns `true` while more frames are needed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let DrawerPhase::Animating {
            to,
            started_at,
            duration,
            ..
        } = self.phase
        else {
            return false;
        };

        if now.saturating_sub(started_at) >= duration {
            self.progress = to;
            self.phase = settled(to);
            tracing::debug!(progress = to, "drawer animation finished");
            return false;
        }

        self.progress = self.sample(now);
        true
    }

    fn animate_to(&mut self, target: f32, now: Duration) {
        let from = self.sample(now);
        let opening = target > from;
        let (duration, curve) = if opening {
            (self.open_duration, Curve::Spring)
        } else {
            (self.close_duration, Curve::EaseOut)
        };

        self.progress = from;
        if (target - from).abs() <= f32::EPSILON || duration.is_zero() {
            self.progress = target;
            self.phase = settled(target);
            return;
        }

        tracing::debug!(from, to = target, curve = ?curve, "drawer animation started");
        self.phase = DrawerPhase::Animating {
            from,
            to: target,
            started_at: now,
            duration,
            curve,
        };
    }
}

impl Default for DrawerController {
    fn default() -> Self {
        Self::new(DEFAULT_OPEN_DURATION, DEFAULT_CLOSE_DURATION, 0.75)
    }
}

fn settled(target: f32) -> DrawerPhase {
    if target >= 0.5 {
        DrawerPhase::Open
    } else {
        DrawerPhase::Closed
    }
}

fn normalized(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_open_animation_completes() {
        let mut drawer = DrawerController::default();
        drawer.open(ms(0));
        assert!(drawer.is_animating());
        assert!(drawer.is_open());

        assert!(drawer.tick(ms(100)));
        assert!(drawer.progress() > 0.0);
        assert!(!drawer.tick(ms(300)));
        assert_eq!(drawer.phase(), DrawerPhase::Open);
        assert!((drawer.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_close_uses_ease_out() {
        let mut drawer = DrawerController::default();
        drawer.open(ms(0));
        drawer.tick(ms(300));
        drawer.close(ms(1000));

        assert!(matches!(
            drawer.phase(),
            DrawerPhase::Animating { curve: Curve::EaseOut, .. }
        ));
        drawer.tick(ms(1250));
        assert_eq!(drawer.phase(), DrawerPhase::Closed);
        assert!(drawer.progress().abs() < f32::EPSILON);
    }

    #[test]
    fn test_begin_drag_captures_in_flight_value() {
        let mut drawer = DrawerController::default();
        drawer.open(ms(0));
        let expected = drawer.sample(ms(120));
        let baseline = drawer.begin_drag(ms(120));

        assert!((baseline - expected).abs() < f32::EPSILON);
        assert_eq!(drawer.phase(), DrawerPhase::Dragging);
        assert!(!drawer.tick(ms(500)));
        assert!((drawer.progress() - baseline).abs() < f32::EPSILON);
    }

    #[test]
    fn test_latest_command_preempts() {
        let mut drawer = DrawerController::default();
        drawer.open(ms(0));
        let mid = drawer.sample(ms(50));
        drawer.close(ms(50));

        match drawer.phase() {
            DrawerPhase::Animating { from, to, .. } => {
                assert!((from - mid).abs() < f32::EPSILON);
                assert!(to.abs() < f32::EPSILON);
            }
            other => panic!("expected closing animation, got {other:?}"),
        }
    }

    #[test]
    fn test_toggle() {
        let mut drawer = DrawerController::default();
        drawer.toggle(ms(0));
        assert!(drawer.is_open());
        drawer.toggle(ms(10));
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_drag_to_clamps() {
        let mut drawer = DrawerController::default();
        drawer.drag_to(1.7);
        assert!((drawer.progress() - 1.0).abs() < f32::EPSILON);
        drawer.drag_to(-0.2);
        assert!(drawer.progress().abs() < f32::EPSILON);
    }

    #[test]
    fn test_offset() {
        let mut drawer = DrawerController::new(ms(300), ms(250), 0.8);
        assert!((drawer.offset() + 0.8).abs() < 1e-6);
        drawer.drag_to(0.5);
        assert!((drawer.offset() + 0.4).abs() < 1e-6);
        drawer.drag_to(1.0);
        assert!(drawer.offset().abs() < 1e-6);
    }

    #[test]
    fn test_snap_back_from_drag() {
        let mut drawer = DrawerController::default();
        drawer.begin_drag(ms(0));
        drawer.drag_to(0.1);
        drawer.snap_back(ms(10));
        assert!(drawer.is_animating());
        drawer.tick(ms(260));
        assert_eq!(drawer.phase(), DrawerPhase::Closed);
    }

    #[test]
    fn test_command_at_target_settles_immediately() {
        let mut drawer = DrawerController::default();
        drawer.close(ms(0));
        assert_eq!(drawer.phase(), DrawerPhase::Closed);
        assert!(!drawer.is_animating());
    }
}
