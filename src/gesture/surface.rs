//! Chat-surface gesture recognizer.
//!
//! State machine: `Idle → Pending → Claimed → Dragging`.
//!
//! - `Pending`: pointer is down but the gesture may still be a tap.
//! - `Claimed`: movement crossed a claim threshold; the gesture belongs to the
//!   drawer/keyboard handling and will not produce a tap.
//! - `Dragging`: a rightward horizontal drag with the drawer closed is revealing
//!   the drawer live.
//!
//! Release rules, evaluated in order (all that match are returned):
//!
//! 1. `dx > swipe`, drawer closed: open
//! 2. `activation < dx ≤ swipe`, `vx > flick`, drawer closed: open (flick)
//! 3. `activation < dx ≤ swipe`, `vx ≤ flick`, drawer closed: snap closed; a live
//!    drag released at `dx ≤ activation` snaps closed too
//! 4. `dx < -swipe`, drawer open: close
//! 5. `dy < -focus`, keyboard hidden: focus composer
//! 6. `dy > dismiss`, keyboard visible: dismiss keyboard

use super::{progress_for, GestureContext, GestureIntent, GestureThresholds, PointerSample, Release};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Pending,
    Claimed,
    Dragging,
}

/// Recognizer for drags on the chat surface.
#[derive(Debug, Clone)]
pub struct SurfaceRecognizer {
    thresholds: GestureThresholds,
    phase: Phase,
}

impl SurfaceRecognizer {
    #[must_use]
    pub const fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            phase: Phase::Idle,
        }
    }

    /// Pointer went down: start a new gesture.
    pub fn press(&mut self) {
        self.phase = Phase::Pending;
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Whether the current gesture is revealing the drawer live.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// Abandons the current gesture without producing intents.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Feeds a move sample; returns live intents (drag start and progress).
    pub fn moved(&mut self, sample: PointerSample, ctx: &GestureContext) -> Vec<GestureIntent> {
        if self.phase == Phase::Pending && self.should_claim(sample, ctx) {
            tracing::trace!(dx = sample.dx, dy = sample.dy, "surface gesture claimed");
            self.phase = Phase::Claimed;
        }

        match self.phase {
            Phase::Claimed if self.starts_drag(sample, ctx) => {
                tracing::trace!(dx = sample.dx, "surface drag revealing drawer");
                self.phase = Phase::Dragging;
                vec![
                    GestureIntent::BeginDrag,
                    GestureIntent::SetProgress(progress_for(sample.dx, ctx.drawer_width)),
                ]
            }
            Phase::Dragging => vec![GestureIntent::SetProgress(progress_for(
                sample.dx,
                ctx.drawer_width,
            ))],
            _ => vec![],
        }
    }

    /// Pointer went up: classify the gesture.
    pub fn release(&mut self, sample: PointerSample, ctx: &GestureContext) -> Release {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);

        match phase {
            Phase::Idle => Release::Intents(vec![]),
            Phase::Pending if !self.should_claim(sample, ctx) => Release::Tap,
            Phase::Pending | Phase::Claimed => {
                Release::Intents(self.release_intents(sample, ctx, false))
            }
            Phase::Dragging => Release::Intents(self.release_intents(sample, ctx, true)),
        }
    }

    fn should_claim(&self, sample: PointerSample, ctx: &GestureContext) -> bool {
        let t = &self.thresholds;
        let ax = sample.dx.abs();
        let ay = sample.dy.abs();

        (ctx.keyboard_visible && ay > t.keyboard_claim)
            || ax > t.claim
            || ay > t.claim
            || (ax > t.dominance_claim && ax >= t.dominance_ratio * ay)
    }

    fn starts_drag(&self, sample: PointerSample, ctx: &GestureContext) -> bool {
        let t = &self.thresholds;
        !ctx.drawer_open
            && sample.dx > t.drag_activation
            && sample.dx.abs() >= t.dominance_ratio * sample.dy.abs()
    }

    fn release_intents(
        &self,
        sample: PointerSample,
        ctx: &GestureContext,
        was_dragging: bool,
    ) -> Vec<GestureIntent> {
        let t = &self.thresholds;
        let closed = !ctx.drawer_open;
        let mut intents = Vec::new();

        if closed && sample.dx > t.swipe {
            intents.push(GestureIntent::OpenDrawer);
        }
        if closed && sample.dx > t.drag_activation && sample.dx <= t.swipe {
            if sample.vx > t.flick_velocity {
                intents.push(GestureIntent::OpenDrawer);
            } else {
                intents.push(GestureIntent::SnapClosed);
            }
        } else if closed && was_dragging && sample.dx <= t.drag_activation {
            intents.push(GestureIntent::SnapClosed);
        }
        if ctx.drawer_open && sample.dx < -t.swipe {
            intents.push(GestureIntent::CloseDrawer);
        }
        if !ctx.keyboard_visible && sample.dy < -t.focus {
            intents.push(GestureIntent::FocusComposer);
        }
        if ctx.keyboard_visible && sample.dy > t.dismiss {
            intents.push(GestureIntent::DismissKeyboard);
        }

        tracing::debug!(
            dx = sample.dx,
            dy = sample.dy,
            vx = sample.vx,
            intents = ?intents,
            "surface gesture released"
        );
        intents
    }
}

impl Default for SurfaceRecognizer {
    fn default() -> Self {
        Self::new(GestureThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOSED: GestureContext = GestureContext {
        drawer_open: false,
        keyboard_visible: false,
        drawer_width: 300.0,
    };

    fn drag(recognizer: &mut SurfaceRecognizer, ctx: &GestureContext, samples: &[PointerSample]) -> Vec<GestureIntent> {
        recognizer.press();
        samples
            .iter()
            .flat_map(|s| recognizer.moved(*s, ctx))
            .collect()
    }

    #[test]
    fn test_small_motion_is_tap() {
        let mut r = SurfaceRecognizer::default();
        r.press();
        assert!(r.moved(PointerSample::new(2.0, 3.0, 0.0, 0.0), &CLOSED).is_empty());
        assert_eq!(r.release(PointerSample::new(2.0, 3.0, 0.0, 0.0), &CLOSED), Release::Tap);
        assert!(!r.is_active());
    }

    #[test]
    fn test_keyboard_visible_lowers_vertical_claim() {
        let ctx = GestureContext {
            keyboard_visible: true,
            ..CLOSED
        };
        let mut r = SurfaceRecognizer::default();
        r.press();
        let release = r.release(PointerSample::new(0.0, 7.0, 0.0, 0.0), &ctx);
        assert_eq!(release, Release::Intents(vec![]));
    }

    #[test]
    fn test_live_drag_reports_progress() {
        let mut r = SurfaceRecognizer::default();
        let intents = drag(
            &mut r,
            &CLOSED,
            &[
                PointerSample::new(12.0, 1.0, 0.1, 0.0),
                PointerSample::new(30.0, 2.0, 0.2, 0.0),
                PointerSample::new(150.0, 4.0, 0.5, 0.0),
            ],
        );
        assert_eq!(
            intents,
            vec![
                GestureIntent::BeginDrag,
                GestureIntent::SetProgress(0.1),
                GestureIntent::SetProgress(0.5),
            ]
        );
        assert!(r.is_dragging());
    }

    #[test]
    fn test_vertical_motion_does_not_drag() {
        let mut r = SurfaceRecognizer::default();
        let intents = drag(&mut r, &CLOSED, &[PointerSample::new(25.0, 40.0, 0.0, 0.0)]);
        assert!(intents.is_empty());
        assert!(!r.is_dragging());
    }

    #[test]
    fn test_release_long_swipe_opens() {
        let mut r = SurfaceRecognizer::default();
        drag(&mut r, &CLOSED, &[PointerSample::new(60.0, 0.0, 0.0, 0.0)]);
        let release = r.release(PointerSample::new(60.0, 0.0, 0.0, 0.0), &CLOSED);
        assert_eq!(release, Release::Intents(vec![GestureIntent::OpenDrawer]));
    }

    #[test]
    fn test_release_flick_opens() {
        let mut r = SurfaceRecognizer::default();
        drag(&mut r, &CLOSED, &[PointerSample::new(30.0, 0.0, 0.5, 0.0)]);
        let release = r.release(PointerSample::new(30.0, 0.0, 0.5, 0.0), &CLOSED);
        assert_eq!(release, Release::Intents(vec![GestureIntent::OpenDrawer]));
    }

    #[test]
    fn test_release_slow_short_swipe_snaps_closed() {
        let mut r = SurfaceRecognizer::default();
        drag(&mut r, &CLOSED, &[PointerSample::new(30.0, 0.0, 0.1, 0.0)]);
        let release = r.release(PointerSample::new(30.0, 0.0, 0.1, 0.0), &CLOSED);
        assert_eq!(release, Release::Intents(vec![GestureIntent::SnapClosed]));
    }

    #[test]
    fn test_drag_pulled_back_snaps_closed() {
        let mut r = SurfaceRecognizer::default();
        drag(
            &mut r,
            &CLOSED,
            &[
                PointerSample::new(40.0, 0.0, 0.2, 0.0),
                PointerSample::new(10.0, 0.0, -0.2, 0.0),
            ],
        );
        let release = r.release(PointerSample::new(10.0, 0.0, -0.2, 0.0), &CLOSED);
        assert_eq!(release, Release::Intents(vec![GestureIntent::SnapClosed]));
    }

    #[test]
    fn test_release_left_swipe_closes_open_drawer() {
        let ctx = GestureContext {
            drawer_open: true,
            ..CLOSED
        };
        let mut r = SurfaceRecognizer::default();
        drag(&mut r, &ctx, &[PointerSample::new(-60.0, 0.0, -0.4, 0.0)]);
        let release = r.release(PointerSample::new(-60.0, 0.0, -0.4, 0.0), &ctx);
        assert_eq!(release, Release::Intents(vec![GestureIntent::CloseDrawer]));
    }

    #[test]
    fn test_swipe_up_focuses_composer() {
        let mut r = SurfaceRecognizer::default();
        drag(&mut r, &CLOSED, &[PointerSample::new(0.0, -60.0, 0.0, -0.5)]);
        let release = r.release(PointerSample::new(0.0, -60.0, 0.0, -0.5), &CLOSED);
        assert_eq!(release, Release::Intents(vec![GestureIntent::FocusComposer]));
    }

    #[test]
    fn test_swipe_down_dismisses_keyboard() {
        let ctx = GestureContext {
            keyboard_visible: true,
            ..CLOSED
        };
        let mut r = SurfaceRecognizer::default();
        drag(&mut r, &ctx, &[PointerSample::new(0.0, 25.0, 0.0, 0.3)]);
        let release = r.release(PointerSample::new(0.0, 25.0, 0.0, 0.3), &ctx);
        assert_eq!(release, Release::Intents(vec![GestureIntent::DismissKeyboard]));
    }

    #[test]
    fn test_release_without_press_is_empty() {
        let mut r = SurfaceRecognizer::default();
        let release = r.release(PointerSample::new(100.0, 0.0, 0.0, 0.0), &CLOSED);
        assert_eq!(release, Release::Intents(vec![]));
    }
}
