// extensions/easing.rs
//
// Easing curves for shape tweens. Pure math, no scene access.

use std::f32::consts::PI;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    /// Gentle start, used for quick fades.
    SineIn,
    SineOut,
    /// Overshoots and settles like a spring. Used for dots dropping in.
    ElasticOut,
}

impl Easing {
    /// Map normalized time `t` in [0, 1] to eased progress. Elastic curves
    /// leave [0, 1] in the middle but always end at exactly 1.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::ElasticOut => elastic_out(t),
        }
    }
}

#[inline]
fn elastic_out(t: f32) -> f32 {
    const C4: f32 = (2.0 * PI) / 3.0;
    if t == 0.0 || t == 1.0 {
        t
    } else {
        2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_curves_hit_endpoints() {
        for e in [
            Easing::Linear,
            Easing::QuadIn,
            Easing::QuadOut,
            Easing::SineIn,
            Easing::SineOut,
            Easing::ElasticOut,
        ] {
            assert!(e.apply(0.0).abs() < 1e-6, "{:?} at 0", e);
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", e);
        }
    }

    #[test]
    fn elastic_overshoots() {
        let peak = (1..20)
            .map(|i| Easing::ElasticOut.apply(i as f32 / 20.0))
            .fold(0.0_f32, f32::max);
        assert!(peak > 1.0, "ElasticOut peak was {}", peak);
    }

    #[test]
    fn out_of_range_time_is_clamped() {
        assert_eq!(Easing::QuadOut.apply(2.0), 1.0);
        assert_eq!(Easing::QuadOut.apply(-1.0), 0.0);
    }

    #[test]
    fn ease_interpolates() {
        assert!((ease(100.0, 200.0, 0.5, Easing::Linear) - 150.0).abs() < 0.001);
        assert!((ease(10.0, 30.0, 1.0, Easing::QuadIn) - 30.0).abs() < 0.001);
    }
}
