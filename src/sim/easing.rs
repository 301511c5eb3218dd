//! Easing curves and keyframe sampling for the decorative animations
//!
//! Every animation in the story is a function of elapsed seconds since its
//! layer mounted, so the same layout always draws the same frame.

/// Timing curve applied to each keyframe segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseInOut,
    EaseOut,
    /// Overshoots slightly past the target before settling
    BackOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                let u = t - 1.0;
                1.0 + C3 * u * u * u + C1 * u * u
            }
        }
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sample evenly spaced keyframes at progress `t` in [0, 1]
pub fn keyframes(values: &[f32], t: f32, easing: Easing) -> f32 {
    match values.len() {
        0 => 0.0,
        1 => values[0],
        n => {
            let segments = (n - 1) as f32;
            let scaled = t.clamp(0.0, 1.0) * segments;
            let i = (scaled.floor() as usize).min(n - 2);
            let local = easing.apply(scaled - i as f32);
            lerp(values[i], values[i + 1], local)
        }
    }
}

/// Progress through one pass of a single-shot animation
pub fn once_progress(elapsed: f32, duration: f32, delay: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    ((elapsed - delay) / duration).clamp(0.0, 1.0)
}

/// Progress through the current cycle of a looping animation.
/// Before `delay` the animation holds its first frame.
pub fn loop_progress(elapsed: f32, duration: f32, delay: f32) -> f32 {
    if elapsed < delay || duration <= 0.0 {
        return 0.0;
    }
    ((elapsed - delay) / duration).fract()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut, Easing::EaseOut, Easing::BackOut] {
            assert_eq!(easing.apply(0.0), 0.0, "{:?}", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?}", easing);
            assert!((easing.apply(0.999) - 1.0).abs() < 0.01, "{:?}", easing);
        }
    }

    #[test]
    fn test_back_out_overshoots() {
        assert!(Easing::BackOut.apply(0.7) > 1.0);
    }

    #[test]
    fn test_keyframes_hit_each_value() {
        let values = [0.0, 0.8, 0.0];
        assert_eq!(keyframes(&values, 0.0, Easing::Linear), 0.0);
        assert!((keyframes(&values, 0.5, Easing::Linear) - 0.8).abs() < 1e-5);
        assert!(keyframes(&values, 1.0, Easing::Linear).abs() < 1e-5);
        assert!((keyframes(&values, 0.25, Easing::Linear) - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_loop_progress_holds_before_delay_then_wraps() {
        assert_eq!(loop_progress(0.5, 2.0, 1.0), 0.0);
        assert!((loop_progress(2.0, 2.0, 1.0) - 0.5).abs() < 1e-5);
        assert!((loop_progress(3.5, 2.0, 1.0) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_once_progress_clamps() {
        assert_eq!(once_progress(-1.0, 1.8, 0.0), 0.0);
        assert_eq!(once_progress(5.0, 1.8, 0.0), 1.0);
        assert!((once_progress(0.9, 1.8, 0.0) - 0.5).abs() < 1e-5);
    }
}
