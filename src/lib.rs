//! Birthday Reveal - a tap-through animated birthday greeting
//!
//! Core modules:
//! - `sim`: Deterministic story simulation (stage sequencer, timers, particle layouts)
//! - `compose`: Which backdrop, layers and text each stage shows
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser DOM overlay for text
//! - `settings`: Quality / motion preferences

pub mod compose;
pub mod greeting;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Story configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Ticks per simulated second
    pub const TICKS_PER_SECOND: u32 = 120;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// How long the name reveal shakes after entry (2000 ms)
    pub const SHAKE_DURATION_TICKS: u32 = 2 * TICKS_PER_SECOND;
    /// Fixed dwell before the explosion hands over to the love message (2500 ms)
    pub const BURST_DWELL_TICKS: u32 = 5 * TICKS_PER_SECOND / 2;

    /// Stage enter/exit transition length
    pub const STAGE_TRANSITION_SECS: f32 = 0.8;
    /// Backdrop cross-fade length
    pub const BACKDROP_FADE_SECS: f32 = 0.6;

    /// Burst particle count and flight time
    pub const BURST_PARTICLES: usize = 50;
    pub const BURST_FLIGHT_SECS: f32 = 1.8;
    /// Light rays around the burst
    pub const BURST_RAYS: usize = 8;
    pub const BURST_RAY_SECS: f32 = 1.2;
    pub const BURST_RAY_LENGTH: f32 = 200.0;
    /// Expanding glow circle
    pub const BURST_GLOW_SECS: f32 = 1.5;
    pub const BURST_GLOW_RADIUS: f32 = 20.0;
    pub const BURST_GLOW_MAX_SCALE: f32 = 30.0;

    /// Floating icon layer size
    pub const FLOATING_ICONS: usize = 6;
}

/// Convert a `0xRRGGBB` literal into RGBA channels in 0..=1
///
/// The channels stay sRGB-encoded, like CSS colours. The renderer draws to a
/// non-sRGB surface so they reach the screen unchanged and match the overlay.
pub const fn hex_rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Same color with a different alpha
#[inline]
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Whole ticks covered by a duration in seconds
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs * consts::TICKS_PER_SECOND as f32).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rgb() {
        let c = hex_rgb(0xff8000);
        assert_eq!(c[0], 1.0);
        assert!((c[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 0.0);
        assert_eq!(c[3], 1.0);
    }

    #[test]
    fn test_timing_constants() {
        assert_eq!(consts::SHAKE_DURATION_TICKS, 240);
        assert_eq!(consts::BURST_DWELL_TICKS, 300);
        assert_eq!(secs_to_ticks(2.5), consts::BURST_DWELL_TICKS);
    }
}
