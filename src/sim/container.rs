//! Stage container: mounts a stage's scene with an enter transition,
//! unmounts it with an exit transition, and forwards taps.

use super::easing::{Easing, lerp};
use super::scene::Scene;
use super::stage::Stage;
use crate::consts::STAGE_TRANSITION_SECS;

/// What a tap on a mounted stage asks the story to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    Advance,
}

/// Where the container is in its lifetime
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence {
    /// Fading in, progress 0..1
    Entering(f32),
    Shown,
    /// Fading out, progress 0..1
    Exiting(f32),
    /// Exit finished, ready to drop
    Gone,
}

/// Whole-stage transform for the current instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    pub opacity: f32,
    pub scale: f32,
}

/// One mounted stage
#[derive(Debug, Clone)]
pub struct StageContainer {
    pub stage: Stage,
    pub scene: Scene,
    pub presence: Presence,
    /// Seconds since mount, drives every animation in the scene
    pub elapsed: f32,
    on_tap: Option<TapAction>,
}

impl StageContainer {
    pub fn mount(stage: Stage, scene: Scene, on_tap: Option<TapAction>) -> Self {
        Self {
            stage,
            scene,
            presence: Presence::Entering(0.0),
            elapsed: 0.0,
            on_tap,
        }
    }

    /// Forward a tap. Exiting containers ignore input.
    pub fn tap(&self) -> Option<TapAction> {
        match self.presence {
            Presence::Entering(_) | Presence::Shown => self.on_tap,
            Presence::Exiting(_) | Presence::Gone => None,
        }
    }

    /// Start the exit transition and release the scene's timers
    pub fn unmount(&mut self) {
        let from = match self.presence {
            // Leave from wherever the fade-in got to
            Presence::Entering(p) => 1.0 - p,
            Presence::Exiting(p) => p,
            Presence::Shown => 0.0,
            Presence::Gone => return,
        };
        self.scene.release();
        self.presence = Presence::Exiting(from);
        log::debug!("Unmounting {}", self.stage.as_str());
    }

    pub fn is_gone(&self) -> bool {
        self.presence == Presence::Gone
    }

    pub fn is_exiting(&self) -> bool {
        matches!(self.presence, Presence::Exiting(_) | Presence::Gone)
    }

    /// Advance transition progress and the animation clock
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        let step = dt / STAGE_TRANSITION_SECS;
        self.presence = match self.presence {
            Presence::Entering(p) if p + step >= 1.0 => Presence::Shown,
            Presence::Entering(p) => Presence::Entering(p + step),
            Presence::Exiting(p) if p + step >= 1.0 => Presence::Gone,
            Presence::Exiting(p) => Presence::Exiting(p + step),
            other => other,
        };
    }

    /// Opacity 0 -> 1 and scale 0.95 -> 1 on the way in,
    /// opacity 1 -> 0 and scale 1 -> 1.05 on the way out
    pub fn transition(&self) -> TransitionFrame {
        match self.presence {
            Presence::Entering(p) => {
                let t = Easing::EaseInOut.apply(p);
                TransitionFrame {
                    opacity: t,
                    scale: lerp(0.95, 1.0, t),
                }
            }
            Presence::Shown => TransitionFrame {
                opacity: 1.0,
                scale: 1.0,
            },
            Presence::Exiting(p) => {
                let t = Easing::EaseInOut.apply(p);
                TransitionFrame {
                    opacity: 1.0 - t,
                    scale: lerp(1.0, 1.05, t),
                }
            }
            Presence::Gone => TransitionFrame {
                opacity: 0.0,
                scale: 1.05,
            },
        }
    }
}
