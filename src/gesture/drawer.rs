//! Drawer-scoped gesture recognizer.
//!
//! Active while the drawer is open, animating or being dragged, for gestures
//! starting inside the drawer. Once a horizontal drag is claimed, progress is
//! driven relative to the value captured at claim time, so grabbing a drawer
//! mid-animation continues from where it visually is.
//!
//! On release a closing swipe only closes when it travelled at least
//! `drawer_close_fraction` of the drawer width or was fast; otherwise the
//! drawer settles back open. An opening swipe always opens.

use super::{progress_for, GestureContext, GestureIntent, GestureThresholds, PointerSample, Release};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pending,
    Dragging { baseline: f32 },
}

/// Recognizer for drags that start on the drawer itself.
#[derive(Debug, Clone)]
pub struct DrawerRecognizer {
    thresholds: GestureThresholds,
    phase: Phase,
}

impl DrawerRecognizer {
    #[must_use]
    pub const fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            phase: Phase::Idle,
        }
    }

    pub fn press(&mut self) {
        self.phase = Phase::Pending;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Feeds a move sample.
    ///
    /// `current_progress` is the drawer progress at this instant; it becomes the
    /// drag baseline when the gesture is claimed.
    pub fn moved(
        &mut self,
        sample: PointerSample,
        ctx: &GestureContext,
        current_progress: f32,
    ) -> Vec<GestureIntent> {
        match self.phase {
            Phase::Idle => vec![],
            Phase::Pending => {
                if sample.dx.abs() <= self.thresholds.drawer_claim {
                    return vec![];
                }
                let baseline = current_progress.clamp(0.0, 1.0);
                tracing::trace!(baseline, dx = sample.dx, "drawer drag claimed");
                self.phase = Phase::Dragging { baseline };
                vec![
                    GestureIntent::BeginDrag,
                    GestureIntent::SetProgress(Self::dragged(baseline, sample, ctx)),
                ]
            }
            Phase::Dragging { baseline } => {
                vec![GestureIntent::SetProgress(Self::dragged(baseline, sample, ctx))]
            }
        }
    }

    /// Pointer went up: settle the drawer or report a tap.
    pub fn release(&mut self, sample: PointerSample, ctx: &GestureContext) -> Release {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let baseline = match phase {
            Phase::Idle => return Release::Intents(vec![]),
            Phase::Pending => return Release::Tap,
            Phase::Dragging { baseline } => baseline,
        };

        let t = &self.thresholds;
        let intent = if sample.dx < 0.0 {
            let short = sample.dx.abs() < t.drawer_close_fraction * ctx.drawer_width;
            let slow = sample.vx.abs() < t.flick_velocity;
            if short && slow {
                GestureIntent::SnapOpen
            } else {
                GestureIntent::CloseDrawer
            }
        } else if sample.dx > 0.0 {
            GestureIntent::OpenDrawer
        } else if Self::dragged(baseline, sample, ctx) >= 0.5 {
            GestureIntent::SnapOpen
        } else {
            GestureIntent::CloseDrawer
        };

        tracing::debug!(dx = sample.dx, vx = sample.vx, intent = ?intent, "drawer gesture released");
        Release::Intents(vec![intent])
    }

    fn dragged(baseline: f32, sample: PointerSample, ctx: &GestureContext) -> f32 {
        if sample.dx >= 0.0 {
            (baseline + progress_for(sample.dx, ctx.drawer_width)).clamp(0.0, 1.0)
        } else {
            (baseline - progress_for(-sample.dx, ctx.drawer_width)).clamp(0.0, 1.0)
        }
    }
}

impl Default for DrawerRecognizer {
    fn default() -> Self {
        Self::new(GestureThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: GestureContext = GestureContext {
        drawer_open: true,
        keyboard_visible: false,
        drawer_width: 200.0,
    };

    fn grab(r: &mut DrawerRecognizer, dx: f32, vx: f32, baseline: f32) -> Vec<GestureIntent> {
        r.press();
        r.moved(PointerSample::new(dx, 0.0, vx, 0.0), &OPEN, baseline)
    }

    #[test]
    fn test_tap_inside_drawer() {
        let mut r = DrawerRecognizer::default();
        r.press();
        assert!(r.moved(PointerSample::new(3.0, 2.0, 0.0, 0.0), &OPEN, 1.0).is_empty());
        assert_eq!(r.release(PointerSample::new(3.0, 2.0, 0.0, 0.0), &OPEN), Release::Tap);
    }

    #[test]
    fn test_drag_is_relative_to_baseline() {
        let mut r = DrawerRecognizer::default();
        let intents = grab(&mut r, -50.0, -0.1, 1.0);
        assert_eq!(
            intents,
            vec![GestureIntent::BeginDrag, GestureIntent::SetProgress(0.75)]
        );

        let mut r = DrawerRecognizer::default();
        let intents = grab(&mut r, 50.0, 0.1, 0.25);
        assert_eq!(intents[1], GestureIntent::SetProgress(0.5));
    }

    #[test]
    fn test_short_slow_close_stays_open() {
        let mut r = DrawerRecognizer::default();
        grab(&mut r, -60.0, -0.1, 1.0);
        let release = r.release(PointerSample::new(-60.0, 0.0, -0.1, 0.0), &OPEN);
        assert_eq!(release, Release::Intents(vec![GestureIntent::SnapOpen]));
    }

    #[test]
    fn test_long_close_closes() {
        let mut r = DrawerRecognizer::default();
        grab(&mut r, -90.0, -0.1, 1.0);
        let release = r.release(PointerSample::new(-90.0, 0.0, -0.1, 0.0), &OPEN);
        assert_eq!(release, Release::Intents(vec![GestureIntent::CloseDrawer]));
    }

    #[test]
    fn test_fast_short_close_closes() {
        let mut r = DrawerRecognizer::default();
        grab(&mut r, -20.0, -0.8, 1.0);
        let release = r.release(PointerSample::new(-20.0, 0.0, -0.8, 0.0), &OPEN);
        assert_eq!(release, Release::Intents(vec![GestureIntent::CloseDrawer]));
    }

    #[test]
    fn test_opening_swipe_opens() {
        let mut r = DrawerRecognizer::default();
        grab(&mut r, 12.0, 0.0, 0.3);
        let release = r.release(PointerSample::new(12.0, 0.0, 0.0, 0.0), &OPEN);
        assert_eq!(release, Release::Intents(vec![GestureIntent::OpenDrawer]));
    }

    #[test]
    fn test_progress_clamped() {
        let mut r = DrawerRecognizer::default();
        let intents = grab(&mut r, -500.0, 0.0, 1.0);
        assert_eq!(intents[1], GestureIntent::SetProgress(0.0));
    }
}
