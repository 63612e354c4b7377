//! Converts absolute pointer positions into gesture samples.
//!
//! Terminal mouse events report absolute cell positions without velocity. The
//! tracker remembers the gesture origin and the previous sample to derive the
//! cumulative displacement and an instantaneous velocity in units per
//! millisecond.

use super::PointerSample;
use std::time::Duration;

/// How long a stationary pointer keeps its last velocity.
///
/// Terminal releases often repeat the last hold position; without this a
/// flick would always be released at zero velocity.
const VELOCITY_HOLD: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f32,
    y: f32,
    at: Duration,
}

/// Tracks a single pointer from press to release.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    origin: Option<Point>,
    last: Option<Point>,
    vx: f32,
    vy: f32,
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking at `(x, y)`.
    pub fn begin(&mut self, x: f32, y: f32, now: Duration) {
        let point = Point { x, y, at: now };
        self.origin = Some(point);
        self.last = Some(point);
        self.vx = 0.0;
        self.vy = 0.0;
    }

    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    /// Records a position and returns the sample relative to the origin.
    ///
    /// Returns `None` when no gesture is being tracked.
    pub fn sample(&mut self, x: f32, y: f32, now: Duration) -> Option<PointerSample> {
        let origin = self.origin?;
        let last = self.last.unwrap_or(origin);
        let elapsed = now.saturating_sub(last.at);
        #[allow(clippy::cast_precision_loss)]
        let dt_ms = elapsed.as_micros() as f32 / 1000.0;

        let moved = (x - last.x).abs() > f32::EPSILON || (y - last.y).abs() > f32::EPSILON;
        if moved && dt_ms > 0.0 {
            self.vx = (x - last.x) / dt_ms;
            self.vy = (y - last.y) / dt_ms;
        } else if !moved && elapsed > VELOCITY_HOLD {
            self.vx = 0.0;
            self.vy = 0.0;
        }

        if moved || elapsed > VELOCITY_HOLD {
            self.last = Some(Point { x, y, at: now });
        }

        Some(PointerSample {
            dx: x - origin.x,
            dy: y - origin.y,
            vx: self.vx,
            vy: self.vy,
        })
    }

    /// Records the final position and stops tracking.
    pub fn end(&mut self, x: f32, y: f32, now: Duration) -> Option<PointerSample> {
        let sample = self.sample(x, y, now);
        self.origin = None;
        self.last = None;
        sample
    }
}
