//! Easing curves for fixed-duration transitions

use crate::spring::SpringCurve;

/// Timing curve mapping linear progress `t ∈ [0, 1]` to eased progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    /// Spring-shaped curve (may overshoot 1.0 before settling)
    Spring(SpringCurve),
}

impl Easing {
    /// Spring curve with the given damping ratio and initial velocity
    pub fn spring(damping_ratio: f32, initial_velocity: f32) -> Self {
        Easing::Spring(SpringCurve::new(damping_ratio, initial_velocity))
    }

    /// Apply easing to linear progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Spring(curve) => curve.value_at(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::spring(0.9, 0.7),
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let easing = Easing::EaseInOut;
        assert_eq!(easing.apply(0.5), 0.5);
        assert!((easing.apply(0.25) + easing.apply(0.75) - 1.0).abs() < 1e-6);
    }
}
