//! Stage sequencer: owns the current stage and the name-reveal shake

use super::stage::Stage;
use super::timer::StageTimer;
use crate::consts::SHAKE_DURATION_TICKS;

/// Current-stage state machine
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    current: Stage,
    /// Alive only while the name reveal is shaking
    shake: Option<StageTimer>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Stage {
        self.current
    }

    /// The transition flag driving the name-reveal shake
    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Move to the next stage. No-op on the last stage.
    pub fn advance(&mut self) -> Option<Stage> {
        let next = self.current.next()?;
        self.enter(next);
        Some(next)
    }

    /// Back to the opening, whatever the current stage
    pub fn restart(&mut self) {
        self.enter(Stage::FIRST);
    }

    /// Step stage-local timers by one fixed tick. Returns true when the
    /// shake ends on this tick.
    pub fn tick(&mut self) -> bool {
        let expired = self.shake.as_mut().is_some_and(StageTimer::tick);
        if expired {
            self.shake = None;
            log::debug!("Shake ended on {}", self.current.as_str());
        }
        expired
    }

    fn enter(&mut self, stage: Stage) {
        // Leaving a stage drops its timer, so it can never fire late
        self.shake = None;
        self.current = stage;
        log::info!("Entered stage {}", stage.as_str());

        if stage == Stage::NameReveal {
            self.shake = Some(StageTimer::new(SHAKE_DURATION_TICKS));
            log::debug!("Shake started ({} ticks)", SHAKE_DURATION_TICKS);
        }
    }
}
