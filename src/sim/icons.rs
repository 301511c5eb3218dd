//! Drifting icon layers: teddy bears, rising hearts and card hearts

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::easing::{Easing, keyframes, lerp, loop_progress};
use super::particles::uniform;
use crate::consts::FLOATING_ICONS;

/// Animated values for one icon at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconFrame {
    /// Position in viewport pixels (top-left origin)
    pub pos: Vec2,
    pub opacity: f32,
    pub scale: f32,
    /// Radians
    pub rotation: f32,
}

/// A teddy bear drifting up the whole viewport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatingIcon {
    pub id: u32,
    /// Horizontal start, percent of viewport width
    pub x: f32,
    pub size: f32,
    /// Seconds per climb
    pub duration: f32,
    /// Staggered launch, seconds
    pub delay: f32,
}

impl FloatingIcon {
    /// Climb from 110% of the viewport height to -20%, swaying as it goes
    pub fn frame(&self, elapsed: f32, viewport: Vec2) -> IconFrame {
        let t = loop_progress(elapsed, self.duration, self.delay);
        let sway = keyframes(&[0.0, 20.0, -20.0, 0.0], t, Easing::Linear);
        let y = lerp(1.1, -0.2, t) * viewport.y;
        IconFrame {
            pos: Vec2::new(self.x / 100.0 * viewport.x + sway, y),
            opacity: keyframes(&[0.0, 1.0, 1.0, 0.0], t, Easing::Linear),
            scale: 1.0,
            rotation: keyframes(&[0.0, 15.0, -15.0, 0.0], t, Easing::Linear).to_radians(),
        }
    }
}

/// Six bears with random lanes, sizes and speeds, launched 0.5 s apart
pub fn floating_icons<R: Rng + ?Sized>(rng: &mut R) -> Vec<FloatingIcon> {
    (0..FLOATING_ICONS)
        .map(|i| FloatingIcon {
            id: i as u32,
            x: uniform(rng, 0.0, 90.0),
            size: uniform(rng, 40.0, 80.0),
            duration: uniform(rng, 15.0, 25.0),
            delay: i as f32 * 0.5,
        })
        .collect()
}

/// Hearts rising behind the revealed name
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RisingHeart {
    pub index: u32,
}

pub const RISING_HEARTS: u32 = 10;
const RISING_HEART_SECS: f32 = 4.0;

impl RisingHeart {
    /// Position is relative to the centre of the name block
    pub fn frame(&self, elapsed: f32) -> IconFrame {
        let i = self.index as f32;
        let t = loop_progress(elapsed, RISING_HEART_SECS, i * 0.3);
        let eased = Easing::EaseInOut.apply(t);
        let start_x = (i - 5.0) * 40.0;
        let end_x = (i - 5.0) * 45.0 + i.sin() * 30.0;
        IconFrame {
            pos: Vec2::new(lerp(start_x, end_x, eased), lerp(200.0, -400.0, eased)),
            opacity: keyframes(&[0.0, 1.0, 0.0], t, Easing::EaseInOut),
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

pub fn rising_hearts() -> Vec<RisingHeart> {
    (0..RISING_HEARTS).map(|index| RisingHeart { index }).collect()
}

/// A small heart pinned somewhere on the message card, pulsing in place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardHeart {
    pub index: u32,
    /// Percent of card width / height
    pub x: f32,
    pub y: f32,
}

pub const CARD_HEARTS: u32 = 6;
const CARD_HEART_SECS: f32 = 3.0;

impl CardHeart {
    /// Position is in card percent; the renderer maps it onto the card
    pub fn frame(&self, elapsed: f32) -> IconFrame {
        let t = loop_progress(elapsed, CARD_HEART_SECS, self.index as f32 * 0.5);
        IconFrame {
            pos: Vec2::new(self.x, self.y),
            opacity: 1.0,
            scale: keyframes(&[0.8, 1.2, 0.8], t, Easing::EaseInOut),
            rotation: keyframes(&[0.0, 20.0, -20.0, 0.0], t, Easing::EaseInOut).to_radians(),
        }
    }
}

pub fn card_hearts<R: Rng + ?Sized>(rng: &mut R) -> Vec<CardHeart> {
    (0..CARD_HEARTS)
        .map(|index| CardHeart {
            index,
            x: uniform(rng, 0.0, 100.0),
            y: uniform(rng, 0.0, 100.0),
        })
        .collect()
}
