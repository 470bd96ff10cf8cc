//! Easing functions for smooth animations

use std::f32::consts::PI;

const BACK_C1: f32 = 1.70158;
const BACK_C3: f32 = BACK_C1 + 1.0;

/// Easing function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation
    #[default]
    Linear,
    /// Quadratic ease-in
    EaseIn,
    /// Quadratic ease-out
    EaseOut,
    /// Quadratic ease-in-out
    EaseInOut,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    /// Pulls back below 0 before leaving
    EaseInBack,
    /// Overshoots above 1 before settling
    EaseOutBack,
    EaseInOutSine,
    EaseOutCirc,
    EaseInOutExpo,
}

impl Easing {
    pub const ALL: [Easing; 12] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInBack,
        Easing::EaseOutBack,
        Easing::EaseInOutSine,
        Easing::EaseOutCirc,
        Easing::EaseInOutExpo,
    ];

    /// Whether the curve leaves [0, 1] on the way
    pub fn overshoots(&self) -> bool {
        matches!(self, Easing::EaseInBack | Easing::EaseOutBack)
    }
}

/// Apply easing function to a value t in range [0, 1]
pub fn ease(t: f32, easing: Easing) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    // Exact endpoints; the back curves otherwise land a rounding error away
    if t == 0.0 || t == 1.0 {
        return t;
    }

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t).powi(2),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Easing::EaseInCubic => t * t * t,
        Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        Easing::EaseInOutCubic => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }
        Easing::EaseInBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
        Easing::EaseOutBack => 1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2),
        Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
        Easing::EaseOutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
        Easing::EaseInOutExpo => {
            if t < 0.5 {
                2f32.powf(20.0 * t - 10.0) / 2.0
            } else {
                (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
            }
        }
    }
}

/// Squared-sine pulse: 0 at both ends, 1 in the middle.
/// Drives the tile color cycle so it breathes instead of snapping back.
pub fn sine_pulse(t: f32) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    (PI * t).sin().powi(2)
}

/// Clamped progress of `frame` through the window starting at `delay`
pub fn progress(frame: f32, delay: f32, duration: f32) -> f32 {
    if duration <= 0.0 || !duration.is_finite() {
        return if frame >= delay { 1.0 } else { 0.0 };
    }
    ((frame - delay) / duration).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        for easing in Easing::ALL {
            assert!(ease(0.0, easing).abs() < 1e-5, "Easing {:?} should start at 0", easing);
            assert!((ease(1.0, easing) - 1.0).abs() < 1e-5, "Easing {:?} should end at 1", easing);
        }
    }

    #[test]
    fn test_ease_monotonic() {
        for easing in Easing::ALL.into_iter().filter(|e| !e.overshoots()) {
            let mut prev = 0.0;
            for i in 0..=100 {
                let t = i as f32 / 100.0;
                let v = ease(t, easing);
                assert!(v >= prev - 0.001, "Easing {:?} should be monotonic", easing);
                prev = v;
            }
        }
    }

    #[test]
    fn test_back_easing_overshoots() {
        let peak = (0..=100)
            .map(|i| ease(i as f32 / 100.0, Easing::EaseOutBack))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.05);

        let dip = (0..=100)
            .map(|i| ease(i as f32 / 100.0, Easing::EaseInBack))
            .fold(f32::MAX, f32::min);
        assert!(dip < -0.05);
    }

    #[test]
    fn test_ease_in_out_symmetric() {
        for easing in [Easing::EaseInOut, Easing::EaseInOutCubic, Easing::EaseInOutSine, Easing::EaseInOutExpo] {
            let v1 = ease(0.25, easing);
            let v2 = ease(0.75, easing);
            assert!((v1 + v2 - 1.0).abs() < 0.01, "{:?} should be symmetric", easing);
        }
    }

    #[test]
    fn test_ease_clamps_input() {
        assert_eq!(ease(-0.5, Easing::Linear), 0.0);
        assert_eq!(ease(1.5, Easing::Linear), 1.0);
        assert_eq!(ease(1.5, Easing::EaseOutBack), 1.0);
        assert_eq!(ease(f32::NAN, Easing::EaseOutCirc), 0.0);
    }

    #[test]
    fn test_sine_pulse() {
        assert!(sine_pulse(0.0).abs() < 1e-6);
        assert!((sine_pulse(0.5) - 1.0).abs() < 1e-6);
        assert!(sine_pulse(1.0).abs() < 1e-6);
        assert!((sine_pulse(0.25) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_progress_clamps() {
        assert_eq!(progress(5.0, 10.0, 40.0), 0.0);
        assert_eq!(progress(30.0, 10.0, 40.0), 0.5);
        assert_eq!(progress(50.0, 10.0, 40.0), 1.0);
        assert_eq!(progress(500.0, 10.0, 40.0), 1.0);
        assert_eq!(progress(9.0, 10.0, 0.0), 0.0);
        assert_eq!(progress(10.0, 10.0, 0.0), 1.0);
    }
}
