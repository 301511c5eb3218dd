//! Seeded particle layouts for the decorative layers
//!
//! Layouts are generated once when a layer mounts and never change after
//! that. All randomness comes from the caller's RNG so a seed reproduces the
//! exact same field.

use glam::Vec2;
use rand::Rng;
use rand::distr::{Distribution, Uniform};
use serde::Serialize;

use super::easing::{Easing, keyframes, loop_progress, once_progress};
use crate::consts::{BURST_FLIGHT_SECS, BURST_PARTICLES};
use crate::hex_rgb;

/// Colors the burst particles are drawn from
pub const BURST_PALETTE: [[f32; 4]; 5] = [
    hex_rgb(0xff7eb3),
    hex_rgb(0xff758c),
    hex_rgb(0xff9a9e),
    hex_rgb(0xfad0c4),
    hex_rgb(0xffd1ff),
];

/// A looping twinkle point (sparkle layers)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmbientParticle {
    pub id: u32,
    /// Horizontal position, percent of viewport width
    pub x: f32,
    /// Vertical position, percent of viewport height
    pub y: f32,
    pub size: f32,
    /// Seconds per cycle
    pub duration: f32,
    /// Seconds before the first cycle starts
    pub delay: f32,
}

/// Animated values for one particle at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub offset: Vec2,
    pub opacity: f32,
    pub scale: f32,
    /// Radians
    pub rotation: f32,
}

impl AmbientParticle {
    pub fn frame(&self, elapsed: f32) -> ParticleFrame {
        let t = loop_progress(elapsed, self.duration, self.delay);
        ParticleFrame {
            offset: Vec2::new(0.0, keyframes(&[0.0, -20.0, 0.0], t, Easing::EaseInOut)),
            opacity: keyframes(&[0.0, 0.8, 0.0], t, Easing::EaseInOut),
            scale: keyframes(&[0.5, 1.2, 0.5], t, Easing::EaseInOut),
            rotation: 0.0,
        }
    }
}

/// Draw from `[low, high)`
///
/// `random_range` on floats can round up onto `high`; `Uniform` shrinks its
/// scale until the largest draw stays below it.
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    match Uniform::new(low, high) {
        Ok(dist) => dist.sample(rng),
        Err(_) => low,
    }
}

/// Generate `count` independent twinkle points
pub fn ambient_field<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<AmbientParticle> {
    (0..count)
        .map(|i| AmbientParticle {
            id: i as u32,
            x: uniform(rng, 0.0, 100.0),
            y: uniform(rng, 0.0, 100.0),
            size: uniform(rng, 2.0, 6.0),
            duration: uniform(rng, 2.0, 5.0),
            delay: uniform(rng, 0.0, 2.0),
        })
        .collect()
}

/// A faint background star for the closing night sky
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub duration: f32,
    pub delay: f32,
}

impl Star {
    pub fn opacity(&self, elapsed: f32) -> f32 {
        let t = loop_progress(elapsed, self.duration, self.delay);
        keyframes(&[0.2, 1.0, 0.2], t, Easing::EaseInOut)
    }
}

pub fn starfield<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            x: uniform(rng, 0.0, 100.0),
            y: uniform(rng, 0.0, 100.0),
            size: uniform(rng, 0.0, 3.0),
            duration: uniform(rng, 2.0, 5.0),
            delay: uniform(rng, 0.0, 5.0),
        })
        .collect()
}

/// One radially thrown particle of the explosion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurstParticle {
    pub id: u32,
    /// Direction of travel, radians
    pub angle: f32,
    pub velocity: f32,
    /// Where the particle lands relative to the burst origin
    pub end: Vec2,
    pub color: [f32; 4],
    pub size: f32,
}

impl BurstParticle {
    /// Flies out, fades, shrinks and spins once over the flight time
    pub fn frame(&self, elapsed: f32) -> ParticleFrame {
        let t = Easing::BackOut.apply(once_progress(elapsed, BURST_FLIGHT_SECS, 0.0));
        ParticleFrame {
            offset: self.end * t,
            opacity: (1.0 - t).clamp(0.0, 1.0),
            scale: (1.0 - t).max(0.0),
            rotation: std::f32::consts::TAU * t,
        }
    }
}

/// Evenly spaced burst: particle `i` travels at angle `2π·i/50`
pub fn burst_particles<R: Rng + ?Sized>(rng: &mut R) -> Vec<BurstParticle> {
    (0..BURST_PARTICLES)
        .map(|i| {
            let angle = i as f32 / BURST_PARTICLES as f32 * std::f32::consts::TAU;
            let velocity = uniform(rng, 100.0, 400.0);
            let color = BURST_PALETTE[rng.random_range(0..BURST_PALETTE.len())];
            BurstParticle {
                id: i as u32,
                angle,
                velocity,
                end: crate::polar_to_cartesian(velocity, angle),
                color,
                size: uniform(rng, 4.0, 12.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    /// Every draw is the largest value the generator can produce
    struct SaturatedRng;

    impl RngCore for SaturatedRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }
        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0xff);
        }
    }

    #[test]
    fn test_uniform_never_reaches_upper_bound() {
        for (low, high) in [(0.0, 100.0), (2.0, 6.0), (15.0, 25.0), (40.0, 80.0), (100.0, 400.0)] {
            let v = uniform(&mut SaturatedRng, low, high);
            assert!(v >= low && v < high, "{} not in [{}, {})", v, low, high);
        }
    }

    #[test]
    fn test_saturated_draws_stay_in_range() {
        for p in ambient_field(&mut SaturatedRng, 5) {
            assert!(p.x < 100.0 && p.y < 100.0);
            assert!(p.size < 6.0);
            assert!(p.duration < 5.0);
            assert!(p.delay < 2.0);
        }
        for s in starfield(&mut SaturatedRng, 5) {
            assert!(s.size < 3.0);
            assert!(s.delay < 5.0);
        }
    }

    #[test]
    fn test_empty_range_falls_back_to_low() {
        assert_eq!(uniform(&mut Pcg32::seed_from_u64(1), 3.0, 3.0), 3.0);
    }

    #[test]
    fn test_ambient_field_is_reproducible() {
        let a = ambient_field(&mut Pcg32::seed_from_u64(7), 30);
        let b = ambient_field(&mut Pcg32::seed_from_u64(7), 30);
        let c = ambient_field(&mut Pcg32::seed_from_u64(8), 30);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_ambient_cycles_are_independent() {
        let field = ambient_field(&mut Pcg32::seed_from_u64(3), 20);
        let opacities: Vec<f32> = field.iter().map(|p| p.frame(3.0).opacity).collect();
        assert!(opacities.windows(2).any(|w| (w[0] - w[1]).abs() > 1e-3));
    }

    #[test]
    fn test_ambient_frame_holds_first_keyframe_before_delay() {
        let p = AmbientParticle {
            id: 0,
            x: 10.0,
            y: 10.0,
            size: 3.0,
            duration: 2.0,
            delay: 1.5,
        };
        let f = p.frame(1.0);
        assert_eq!(f.opacity, 0.0);
        assert_eq!(f.scale, 0.5);
        // Peak halfway through the first cycle
        let peak = p.frame(2.5);
        assert!((peak.opacity - 0.8).abs() < 1e-4);
        assert!((peak.offset.y + 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_burst_angles_evenly_spaced() {
        let burst = burst_particles(&mut Pcg32::seed_from_u64(42));
        assert_eq!(burst.len(), 50);
        for (i, p) in burst.iter().enumerate() {
            let expected = std::f32::consts::TAU * i as f32 / 50.0;
            assert!((p.angle - expected).abs() < 1e-5);
            let dir = p.end.normalize();
            assert!((dir.x - expected.cos()).abs() < 1e-4);
            assert!((dir.y - expected.sin()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_burst_particle_lands_and_vanishes() {
        let burst = burst_particles(&mut Pcg32::seed_from_u64(1));
        let p = &burst[10];
        let start = p.frame(0.0);
        assert_eq!(start.offset, Vec2::ZERO);
        assert_eq!(start.opacity, 1.0);

        let end = p.frame(BURST_FLIGHT_SECS + 0.5);
        assert!((end.offset - p.end).length() < 1e-3);
        assert!(end.opacity.abs() < 1e-5);
        assert!(end.scale.abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_ambient_ranges(seed in any::<u64>(), count in 0usize..200) {
            let field = ambient_field(&mut Pcg32::seed_from_u64(seed), count);
            prop_assert_eq!(field.len(), count);
            for p in &field {
                prop_assert!((0.0..100.0).contains(&p.x));
                prop_assert!((0.0..100.0).contains(&p.y));
                prop_assert!((2.0..6.0).contains(&p.size));
                prop_assert!((2.0..5.0).contains(&p.duration));
                prop_assert!((0.0..2.0).contains(&p.delay));
            }
        }

        #[test]
        fn prop_burst_ranges(seed in any::<u64>()) {
            let burst = burst_particles(&mut Pcg32::seed_from_u64(seed));
            prop_assert_eq!(burst.len(), BURST_PARTICLES);
            for p in &burst {
                prop_assert!((100.0..400.0).contains(&p.velocity));
                prop_assert!((4.0..12.0).contains(&p.size));
                prop_assert!(BURST_PALETTE.contains(&p.color));
                prop_assert!((p.end.length() - p.velocity).abs() < 1e-2);
            }
        }

        #[test]
        fn prop_star_ranges(seed in any::<u64>()) {
            let stars = starfield(&mut Pcg32::seed_from_u64(seed), 50);
            prop_assert_eq!(stars.len(), 50);
            for s in &stars {
                prop_assert!((0.0..3.0).contains(&s.size));
                prop_assert!((0.0..5.0).contains(&s.delay));
            }
        }
    }
}
