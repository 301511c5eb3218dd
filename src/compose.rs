//! Root composition: the backdrop, decorative layers, text and tap
//! behaviour of every stage, in story order.

use crate::greeting::*;
use crate::hex_rgb;
use crate::sim::container::TapAction;
use crate::sim::easing::{Easing, keyframes, lerp, loop_progress, once_progress};
use crate::sim::scene::LayerSpec;
use crate::sim::stage::Stage;

/// Full-screen background treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    /// Near-black, before the reveal
    Night,
    /// Light pink to purple diagonal, through the middle of the story
    Blush,
    /// Radial slate-to-black night sky for the ending
    Dreamy,
}

impl Backdrop {
    pub fn for_stage(stage: Stage) -> Self {
        match stage {
            Stage::Opening => Backdrop::Night,
            Stage::DreamyEnding => Backdrop::Dreamy,
            _ => Backdrop::Blush,
        }
    }

    /// CSS class on overlay sections drawn over this backdrop
    pub fn class(&self) -> &'static str {
        match self {
            Backdrop::Night => "backdrop-night",
            Backdrop::Blush => "backdrop-blush",
            Backdrop::Dreamy => "backdrop-dreamy",
        }
    }
}

/// How a text line is styled in the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyRole {
    Teaser,
    Prompt,
    Title,
    Body,
    Name,
    CardName,
    Message,
    Caption,
    Dedication,
    Finale,
    Restart,
}

impl CopyRole {
    /// CSS class applied to the overlay element
    pub fn class(&self) -> &'static str {
        match self {
            CopyRole::Teaser => "copy-teaser",
            CopyRole::Prompt => "copy-prompt",
            CopyRole::Title => "copy-title",
            CopyRole::Body => "copy-body",
            CopyRole::Name => "copy-name",
            CopyRole::CardName => "copy-card-name",
            CopyRole::Message => "copy-message",
            CopyRole::Caption => "copy-caption",
            CopyRole::Dedication => "copy-dedication",
            CopyRole::Finale => "copy-finale",
            CopyRole::Restart => "copy-restart",
        }
    }
}

/// How a line moves once revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMotion {
    /// Fades (and rises) in once, then holds
    Reveal,
    /// Breathes opacity and scale forever
    Pulse,
}

/// One line of overlay text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopyLine {
    pub text: &'static str,
    pub role: CopyRole,
    pub motion: CopyMotion,
    /// Seconds after mount before the line starts appearing
    pub delay: f32,
    /// Seconds the fade-in takes
    pub fade: f32,
    /// Pixels the line rises while fading in (negative slides from the left)
    pub rise: f32,
}

/// Overlay transform for one line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopyFrame {
    pub opacity: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
}

impl CopyLine {
    const fn reveal(text: &'static str, role: CopyRole, delay: f32, fade: f32, rise: f32) -> Self {
        Self {
            text,
            role,
            motion: CopyMotion::Reveal,
            delay,
            fade,
            rise,
        }
    }

    const fn pulse(text: &'static str, role: CopyRole) -> Self {
        Self {
            text,
            role,
            motion: CopyMotion::Pulse,
            delay: 0.0,
            fade: 2.0,
            rise: 0.0,
        }
    }

    pub fn frame(&self, elapsed: f32) -> CopyFrame {
        match self.motion {
            CopyMotion::Reveal => {
                let t = Easing::EaseInOut.apply(once_progress(elapsed, self.fade, self.delay));
                let travel = lerp(self.rise, 0.0, t);
                // Negative rise means a slide in from the left
                let (offset_x, offset_y) = if self.rise < 0.0 { (travel, 0.0) } else { (0.0, travel) };
                CopyFrame {
                    opacity: t,
                    offset_x,
                    offset_y,
                    scale: 1.0,
                }
            }
            CopyMotion::Pulse => {
                let t = loop_progress(elapsed, self.fade, self.delay);
                CopyFrame {
                    opacity: keyframes(&[0.5, 1.0, 0.5], t, Easing::EaseInOut),
                    offset_x: 0.0,
                    offset_y: 0.0,
                    scale: keyframes(&[1.0, 1.1, 1.0], t, Easing::EaseInOut),
                }
            }
        }
    }
}

/// Everything a stage mounts
#[derive(Debug, Clone, Copy)]
pub struct StageLayout {
    pub layers: &'static [LayerSpec],
    pub copy: &'static [CopyLine],
    pub on_tap: Option<TapAction>,
}

const OPENING_LAYERS: &[LayerSpec] = &[LayerSpec::Sparkles {
    count: 30,
    color: hex_rgb(0xffb7c5),
}];
const OPENING_COPY: &[CopyLine] = &[
    CopyLine::reveal(OPENING_TEASER, CopyRole::Teaser, 0.0, 2.0, 20.0),
    CopyLine::pulse(OPENING_PROMPT, CopyRole::Prompt),
];

const BUILD_UP_LAYERS: &[LayerSpec] = &[
    LayerSpec::FloatingIcons,
    LayerSpec::Sparkles {
        count: 15,
        color: hex_rgb(0xf472b6),
    },
];
const BUILD_UP_COPY: &[CopyLine] = &[
    CopyLine::reveal(BUILD_UP_TITLE, CopyRole::Title, 0.5, 1.5, 0.0),
    CopyLine::reveal(BUILD_UP_LINE, CopyRole::Body, 2.5, 3.0, 0.0),
];

const NAME_REVEAL_LAYERS: &[LayerSpec] = &[LayerSpec::RisingHearts];
const NAME_REVEAL_COPY: &[CopyLine] = &[
    CopyLine::reveal(NAME_REVEAL_TITLE, CopyRole::Title, 0.0, 0.6, 0.0),
    CopyLine::reveal(RECIPIENT, CopyRole::Name, 0.0, 0.6, 0.0),
    CopyLine::reveal(NAME_REVEAL_PROMPT, CopyRole::Caption, 1.0, 0.3, 0.0),
];

const GIFT_LAYERS: &[LayerSpec] = &[LayerSpec::GiftBox];
const GIFT_COPY: &[CopyLine] = &[
    CopyLine::reveal(GIFT_LINE, CopyRole::Title, 0.0, 0.3, 0.0),
    CopyLine::pulse(GIFT_PROMPT, CopyRole::Prompt),
];

const EXPLOSION_LAYERS: &[LayerSpec] = &[LayerSpec::Burst];

const MESSAGE_LAYERS: &[LayerSpec] = &[LayerSpec::MessageCard];
const MESSAGE_COPY: &[CopyLine] = &[
    CopyLine::reveal(RECIPIENT_SHORT, CopyRole::CardName, 0.5, 0.3, 0.0),
    CopyLine::reveal(MESSAGE_LINES[0], CopyRole::Message, 1.5, 1.0, -10.0),
    CopyLine::reveal(MESSAGE_LINES[1], CopyRole::Message, 3.0, 1.0, -10.0),
    CopyLine::reveal(MESSAGE_LINES[2], CopyRole::Message, 4.5, 1.0, -10.0),
    CopyLine::reveal(MESSAGE_LINES[3], CopyRole::Message, 6.0, 1.0, -10.0),
];

const ENDING_LAYERS: &[LayerSpec] = &[
    LayerSpec::Starfield { count: 50 },
    LayerSpec::Sparkles {
        count: 40,
        color: hex_rgb(0xffd700),
    },
];
const ENDING_COPY: &[CopyLine] = &[
    CopyLine::reveal(RECIPIENT, CopyRole::Caption, 0.0, 2.0, 30.0),
    CopyLine::reveal(ENDING_LINES[0], CopyRole::Dedication, 0.0, 2.0, 30.0),
    CopyLine::reveal(ENDING_LINES[1], CopyRole::Dedication, 0.0, 2.0, 30.0),
    CopyLine::reveal(ENDING_LINES[2], CopyRole::Dedication, 0.0, 2.0, 30.0),
    CopyLine::reveal(ENDING_LINES[3], CopyRole::Dedication, 0.0, 2.0, 30.0),
    CopyLine::reveal(ENDING_TITLE, CopyRole::Finale, 3.0, 2.0, 0.0),
    CopyLine::reveal(RECIPIENT, CopyRole::Name, 3.0, 2.0, 0.0),
    CopyLine::reveal(RESTART_LABEL, CopyRole::Restart, 6.0, 0.3, 0.0),
];

/// The composition table, one entry per stage
pub fn stage_layout(stage: Stage) -> StageLayout {
    let tap = Some(TapAction::Advance);
    match stage {
        Stage::Opening => StageLayout {
            layers: OPENING_LAYERS,
            copy: OPENING_COPY,
            on_tap: tap,
        },
        Stage::BuildUp => StageLayout {
            layers: BUILD_UP_LAYERS,
            copy: BUILD_UP_COPY,
            on_tap: tap,
        },
        Stage::NameReveal => StageLayout {
            layers: NAME_REVEAL_LAYERS,
            copy: NAME_REVEAL_COPY,
            on_tap: tap,
        },
        Stage::GiftSuspense => StageLayout {
            layers: GIFT_LAYERS,
            copy: GIFT_COPY,
            on_tap: tap,
        },
        // Advances on its own when the burst finishes
        Stage::MagicalExplosion => StageLayout {
            layers: EXPLOSION_LAYERS,
            copy: &[],
            on_tap: None,
        },
        Stage::LoveMessage => StageLayout {
            layers: MESSAGE_LAYERS,
            copy: MESSAGE_COPY,
            on_tap: tap,
        },
        // Only the restart control responds here
        Stage::DreamyEnding => StageLayout {
            layers: ENDING_LAYERS,
            copy: ENDING_COPY,
            on_tap: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backdrop_variants() {
        assert_eq!(Backdrop::for_stage(Stage::Opening), Backdrop::Night);
        for stage in &Stage::ALL[1..6] {
            assert_eq!(Backdrop::for_stage(*stage), Backdrop::Blush);
        }
        assert_eq!(Backdrop::for_stage(Stage::DreamyEnding), Backdrop::Dreamy);
    }

    #[test]
    fn test_tap_wiring_matches_stage_rules() {
        for stage in Stage::ALL {
            let layout = stage_layout(stage);
            assert_eq!(layout.on_tap.is_some(), stage.accepts_tap(), "{:?}", stage);
        }
    }

    #[test]
    fn test_only_explosion_mounts_burst() {
        for stage in Stage::ALL {
            let has_burst = stage_layout(stage).layers.contains(&LayerSpec::Burst);
            assert_eq!(has_burst, stage == Stage::MagicalExplosion);
        }
    }

    #[test]
    fn test_restart_control_only_on_ending() {
        for stage in Stage::ALL {
            let has_restart = stage_layout(stage)
                .copy
                .iter()
                .any(|line| line.role == CopyRole::Restart);
            assert_eq!(has_restart, stage == Stage::DreamyEnding);
        }
    }

    #[test]
    fn test_message_lines_stagger() {
        let lines: Vec<_> = stage_layout(Stage::LoveMessage)
            .copy
            .iter()
            .filter(|l| l.role == CopyRole::Message)
            .collect();
        assert_eq!(lines.len(), 4);
        for (i, line) in lines.iter().enumerate() {
            assert!((line.delay - (1.5 + 1.5 * i as f32)).abs() < 1e-6);
            assert_eq!(line.frame(line.delay - 0.1).opacity, 0.0);
            assert_eq!(line.frame(line.delay + line.fade).opacity, 1.0);
        }
    }

    #[test]
    fn test_pulse_breathes() {
        let prompt = OPENING_COPY[1];
        assert_eq!(prompt.frame(0.0).opacity, 0.5);
        assert!((prompt.frame(1.0).scale - 1.1).abs() < 1e-4);
    }
}
