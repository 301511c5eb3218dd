//! The fixed, ordered set of story stages

use serde::{Deserialize, Serialize};

/// One full-screen phase of the story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stage {
    /// Dark teaser, "something special was created"
    #[default]
    Opening,
    /// Build-up copy with drifting teddy bears
    BuildUp,
    /// Name reveal with a short shake
    NameReveal,
    /// Wobbling gift box
    GiftSuspense,
    /// Radial burst, advances on its own
    MagicalExplosion,
    /// Personal message card
    LoveMessage,
    /// Closing dedication with the restart control
    DreamyEnding,
}

impl Stage {
    /// Display order, which is also the advance order
    pub const ALL: [Stage; 7] = [
        Stage::Opening,
        Stage::BuildUp,
        Stage::NameReveal,
        Stage::GiftSuspense,
        Stage::MagicalExplosion,
        Stage::LoveMessage,
        Stage::DreamyEnding,
    ];

    pub const FIRST: Stage = Stage::Opening;

    /// Position in [`Stage::ALL`]
    pub fn index(self) -> usize {
        match self {
            Stage::Opening => 0,
            Stage::BuildUp => 1,
            Stage::NameReveal => 2,
            Stage::GiftSuspense => 3,
            Stage::MagicalExplosion => 4,
            Stage::LoveMessage => 5,
            Stage::DreamyEnding => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Stage> {
        Self::ALL.get(index).copied()
    }

    /// Next stage in order, `None` on the last one
    pub fn next(self) -> Option<Stage> {
        Self::from_index(self.index() + 1)
    }

    /// Whether a tap on this stage moves the story along
    pub fn accepts_tap(self) -> bool {
        !matches!(self, Stage::MagicalExplosion | Stage::DreamyEnding)
    }

    /// Stable identifier used for DOM ids and log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Opening => "opening",
            Stage::BuildUp => "build-up",
            Stage::NameReveal => "name-reveal",
            Stage::GiftSuspense => "gift-suspense",
            Stage::MagicalExplosion => "magical-explosion",
            Stage::LoveMessage => "love-message",
            Stage::DreamyEnding => "dreamy-ending",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_order() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i);
            assert_eq!(Stage::from_index(i), Some(*stage));
        }
        assert_eq!(Stage::from_index(Stage::ALL.len()), None);
    }

    #[test]
    fn test_next_walks_in_order() {
        assert_eq!(Stage::Opening.next(), Some(Stage::BuildUp));
        assert_eq!(Stage::GiftSuspense.next(), Some(Stage::MagicalExplosion));
        assert_eq!(Stage::LoveMessage.next(), Some(Stage::DreamyEnding));
        assert_eq!(Stage::DreamyEnding.next(), None);
    }

    #[test]
    fn test_tap_acceptance() {
        assert!(Stage::Opening.accepts_tap());
        assert!(Stage::GiftSuspense.accepts_tap());
        assert!(!Stage::MagicalExplosion.accepts_tap());
        assert!(!Stage::DreamyEnding.accepts_tap());
    }
}
