//! Decorative layers instantiated for a mounted stage

use rand::Rng;

use super::burst::BurstView;
use super::easing::{Easing, keyframes, lerp, loop_progress, once_progress};
use super::icons::{CardHeart, FloatingIcon, RisingHeart, card_hearts, floating_icons, rising_hearts};
use super::particles::{AmbientParticle, Star, ambient_field, starfield};

/// Declarative description of a layer, before any randomness is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerSpec {
    Sparkles { count: usize, color: [f32; 4] },
    FloatingIcons,
    RisingHearts,
    GiftBox,
    Burst,
    MessageCard,
    Starfield { count: usize },
}

/// A layer with its layout generated
#[derive(Debug, Clone)]
pub enum Layer {
    Sparkles {
        color: [f32; 4],
        particles: Vec<AmbientParticle>,
    },
    FloatingIcons(Vec<FloatingIcon>),
    RisingHearts(Vec<RisingHeart>),
    GiftBox,
    Burst(BurstView),
    MessageCard { hearts: Vec<CardHeart> },
    Starfield(Vec<Star>),
}

impl Layer {
    pub fn mount<R: Rng + ?Sized>(spec: &LayerSpec, rng: &mut R) -> Self {
        match *spec {
            LayerSpec::Sparkles { count, color } => Layer::Sparkles {
                color,
                particles: ambient_field(rng, count),
            },
            LayerSpec::FloatingIcons => Layer::FloatingIcons(floating_icons(rng)),
            LayerSpec::RisingHearts => Layer::RisingHearts(rising_hearts()),
            LayerSpec::GiftBox => Layer::GiftBox,
            LayerSpec::Burst => Layer::Burst(BurstView::mount(rng)),
            LayerSpec::MessageCard => Layer::MessageCard {
                hearts: card_hearts(rng),
            },
            LayerSpec::Starfield { count } => Layer::Starfield(starfield(rng, count)),
        }
    }
}

/// Every layer of one mounted stage, in draw order
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn mount<R: Rng + ?Sized>(specs: &[LayerSpec], rng: &mut R) -> Self {
        Self {
            layers: specs.iter().map(|spec| Layer::mount(spec, rng)).collect(),
        }
    }

    /// Step layer timers. True when a layer asks the story to move on.
    pub fn tick(&mut self) -> bool {
        let mut finished = false;
        for layer in &mut self.layers {
            if let Layer::Burst(view) = layer {
                finished |= view.tick();
            }
        }
        finished
    }

    /// Drop every pending layer timer
    pub fn release(&mut self) {
        for layer in &mut self.layers {
            if let Layer::Burst(view) = layer {
                view.release();
            }
        }
    }

    #[cfg(test)]
    fn has_pending_timers(&self) -> bool {
        self.layers
            .iter()
            .any(|layer| matches!(layer, Layer::Burst(view) if view.is_pending()))
    }
}

/// Gift box wobble and halo pulse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GiftFrame {
    /// Radians
    pub rotation: f32,
    pub lift: f32,
    pub halo_opacity: f32,
}

const GIFT_WOBBLE_SECS: f32 = 0.5;
const GIFT_HALO_SECS: f32 = 2.0;

pub fn gift_frame(elapsed: f32) -> GiftFrame {
    let t = loop_progress(elapsed, GIFT_WOBBLE_SECS, 0.0);
    let pulse = loop_progress(elapsed, GIFT_HALO_SECS, 0.0);
    GiftFrame {
        rotation: keyframes(&[-2.0, 2.0, -2.0], t, Easing::EaseInOut).to_radians(),
        lift: keyframes(&[0.0, -10.0, 0.0], t, Easing::EaseInOut),
        halo_opacity: keyframes(&[0.1, 0.25, 0.1], pulse, Easing::EaseInOut),
    }
}

/// Message card slide-in and the glow behind the recipient's name
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFrame {
    pub offset_y: f32,
    pub opacity: f32,
    pub name_glow: f32,
}

pub fn card_frame(elapsed: f32) -> CardFrame {
    let t = Easing::EaseInOut.apply(once_progress(elapsed, 1.0, 0.0));
    CardFrame {
        offset_y: lerp(50.0, 0.0, t),
        opacity: t,
        name_glow: keyframes(
            &[0.3, 0.7, 0.3],
            loop_progress(elapsed, 2.0, 0.0),
            Easing::EaseInOut,
        ),
    }
}
