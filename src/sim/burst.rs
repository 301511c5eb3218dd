//! The explosion view: burst particles, light rays, a glow wave, and the
//! fixed-duration completion signal that moves the story on.

use rand::Rng;

use super::easing::{Easing, lerp, once_progress};
use super::particles::{BurstParticle, burst_particles};
use super::timer::StageTimer;
use crate::consts::*;

/// Animated values for one light ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayFrame {
    /// Radians
    pub angle: f32,
    /// Current length in pixels
    pub length: f32,
    pub opacity: f32,
}

/// Animated values for the expanding glow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowFrame {
    pub radius: f32,
    pub opacity: f32,
}

/// Everything the explosion stage draws, plus its completion timer
#[derive(Debug, Clone)]
pub struct BurstView {
    pub particles: Vec<BurstParticle>,
    /// Released when the stage starts leaving
    completion: Option<StageTimer>,
}

impl BurstView {
    pub fn mount<R: Rng + ?Sized>(rng: &mut R) -> Self {
        log::debug!("Burst mounted, finishing in {} ticks", BURST_DWELL_TICKS);
        Self {
            particles: burst_particles(rng),
            completion: Some(StageTimer::new(BURST_DWELL_TICKS)),
        }
    }

    /// Step the completion timer. True exactly once, on the tick the fixed
    /// dwell runs out. Particle animation progress plays no part.
    pub fn tick(&mut self) -> bool {
        let finished = self.completion.as_mut().is_some_and(StageTimer::tick);
        if finished {
            self.completion = None;
            log::debug!("Burst finished");
        }
        finished
    }

    /// Drop the completion timer without firing it
    pub fn release(&mut self) {
        self.completion = None;
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.completion.is_some()
    }

    /// Eight rays, 45° apart, stretching out and fading
    pub fn rays(&self, elapsed: f32) -> [RayFrame; BURST_RAYS] {
        let t = Easing::EaseOut.apply(once_progress(elapsed, BURST_RAY_SECS, 0.0));
        std::array::from_fn(|i| RayFrame {
            angle: (i as f32 * 45.0).to_radians(),
            length: BURST_RAY_LENGTH * lerp(0.0, 2.0, t),
            opacity: 1.0 - t,
        })
    }

    pub fn glow(&self, elapsed: f32) -> GlowFrame {
        let t = Easing::EaseOut.apply(once_progress(elapsed, BURST_GLOW_SECS, 0.0));
        GlowFrame {
            radius: BURST_GLOW_RADIUS * lerp(0.0, BURST_GLOW_MAX_SCALE, t),
            opacity: 1.0 - t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_finishes_at_fixed_dwell() {
        let mut view = BurstView::mount(&mut Pcg32::seed_from_u64(5));
        assert_eq!(view.particles.len(), BURST_PARTICLES);

        for _ in 0..BURST_DWELL_TICKS - 1 {
            assert!(!view.tick());
        }
        assert!(view.tick());
        assert!(!view.is_pending());
        // Never fires twice
        for _ in 0..BURST_DWELL_TICKS {
            assert!(!view.tick());
        }
    }

    #[test]
    fn test_finish_is_independent_of_particle_flight() {
        // Particles have landed well before the dwell runs out
        assert!(BURST_FLIGHT_SECS < BURST_DWELL_TICKS as f32 * SIM_DT);
        let view = BurstView::mount(&mut Pcg32::seed_from_u64(5));
        let settled = BURST_FLIGHT_SECS + 0.1;
        assert!(view.particles.iter().all(|p| p.frame(settled).opacity == 0.0));
        assert!(view.is_pending());
    }

    #[test]
    fn test_release_prevents_completion() {
        let mut view = BurstView::mount(&mut Pcg32::seed_from_u64(5));
        for _ in 0..10 {
            view.tick();
        }
        view.release();
        for _ in 0..BURST_DWELL_TICKS * 2 {
            assert!(!view.tick());
        }
    }

    #[test]
    fn test_rays_spaced_45_degrees_and_fade() {
        let view = BurstView::mount(&mut Pcg32::seed_from_u64(5));
        let rays = view.rays(0.0);
        for (i, ray) in rays.iter().enumerate() {
            assert!((ray.angle - (i as f32) * std::f32::consts::FRAC_PI_4).abs() < 1e-5);
            assert_eq!(ray.length, 0.0);
            assert_eq!(ray.opacity, 1.0);
        }
        let done = view.rays(BURST_RAY_SECS);
        assert!(done.iter().all(|r| r.opacity == 0.0));
        assert!((done[0].length - BURST_RAY_LENGTH * 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_glow_expands_then_fades() {
        let view = BurstView::mount(&mut Pcg32::seed_from_u64(5));
        assert_eq!(view.glow(0.0).radius, 0.0);
        let mid = view.glow(BURST_GLOW_SECS / 2.0);
        assert!(mid.radius > 0.0 && mid.opacity > 0.0 && mid.opacity < 1.0);
        let end = view.glow(BURST_GLOW_SECS);
        assert!((end.radius - BURST_GLOW_RADIUS * BURST_GLOW_MAX_SCALE).abs() < 1e-2);
        assert_eq!(end.opacity, 0.0);
    }
}
