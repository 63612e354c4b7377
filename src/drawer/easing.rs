//! Animation curves for drawer transitions.
//!
//! Curves map normalized time `t ∈ [0, 1]` to normalized progress. Both start
//! at 0 and end exactly at 1.

/// Damping ratio of the opening spring (underdamped, so it overshoots slightly).
const SPRING_DAMPING: f32 = 0.7;

/// Natural frequency of the opening spring, in radians per unit time.
const SPRING_FREQUENCY: f32 = 12.0;

/// Curve used by a commanded drawer transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    /// Underdamped spring, used when opening.
    Spring,
    /// Cubic ease-out (decelerating), used when closing.
    EaseOut,
}

impl Curve {
    /// Evaluates the curve at normalized time `t`.
    ///
    /// The spring may exceed 1 before settling; callers clamp the resulting
    /// progress.
    #[must_use]
    pub fn at(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Spring => spring(t),
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

fn spring(t: f32) -> f32 {
    let zeta = SPRING_DAMPING;
    let omega = SPRING_FREQUENCY;
    let damped = omega * (1.0 - zeta * zeta).sqrt();
    let envelope = (-zeta * omega * t).exp();
    1.0 - envelope * ((damped * t).cos() + (zeta * omega / damped) * (damped * t).sin())
}
