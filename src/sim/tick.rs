//! Fixed timestep story tick
//!
//! Advances timers, applies input, and keeps the mounted stage in sync
//! with the sequencer.

use super::container::TapAction;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use super::state::{StoryEvent, StoryState};
use super::stage::Stage;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer activation anywhere on the stage
    pub tap: bool,
    /// Restart control on the closing stage
    pub restart: bool,
}

/// Advance the story by one fixed timestep
pub fn tick(state: &mut StoryState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;

    // Timers started before this tick run first, so a timer armed by this
    // tick's input does not lose a step
    if state.sequencer.tick() {
        state.events.push(StoryEvent::ShakeEnded);
    }
    if state.active.scene.tick() {
        state.events.push(StoryEvent::BurstFinished);
        state.sequencer.advance();
    }

    if input.restart {
        // The control only exists on the closing stage
        if state.stage() == Stage::DreamyEnding {
            log::info!("Restarting story");
            state.sequencer.restart();
            state.events.push(StoryEvent::Restarted);
        }
    } else if input.tap {
        match state.active.tap() {
            Some(TapAction::Advance) => {
                state.sequencer.advance();
            }
            None => log::trace!("Tap ignored on {}", state.stage().as_str()),
        }
    }

    state.sync_mounts();

    state.active.update(dt);
    for container in &mut state.leaving {
        container.update(dt);
    }
    state.leaving.retain(|c| !c.is_gone());
    state.backdrop.update(dt);
}

/// Turns variable frame times into a count of fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    /// Bank `dt` seconds and return how many ticks to run now.
    ///
    /// At most `MAX_SUBSTEPS` ticks run per frame. Time left over past the
    /// cap is dropped, so a slow device runs the story slower instead of
    /// building a backlog that grows every frame.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn tap() -> TickInput {
        TickInput {
            tap: true,
            ..Default::default()
        }
    }

    fn idle(state: &mut StoryState, ticks: u32) {
        let input = TickInput::default();
        for _ in 0..ticks {
            tick(state, &input, SIM_DT);
        }
    }

    #[test]
    fn test_clock_keeps_pace_at_sixty_fps() {
        let mut clock = FrameClock::default();
        let ticks: u32 = (0..60).map(|_| clock.advance(1.0 / 60.0)).sum();
        assert!((119..=121).contains(&ticks), "{} ticks", ticks);
    }

    #[test]
    fn test_slow_frames_do_not_build_backlog() {
        let mut clock = FrameClock::default();
        for _ in 0..100 {
            assert_eq!(clock.advance(0.1), MAX_SUBSTEPS);
            assert!(clock.accumulator <= SIM_DT);
        }
        // Once frames are fast again the catch-up is at most one extra tick
        assert!(clock.advance(1.0 / 120.0) <= 2);
    }

    #[test]
    fn test_four_taps_reach_explosion() {
        let mut state = StoryState::new(12345);
        let expected = [
            Stage::BuildUp,
            Stage::NameReveal,
            Stage::GiftSuspense,
            Stage::MagicalExplosion,
        ];
        for stage in expected {
            tick(&mut state, &tap(), SIM_DT);
            assert_eq!(state.stage(), stage);
            assert_eq!(state.active.stage, stage);
            assert!(state.events.contains(&StoryEvent::StageEntered(stage)));
        }
    }

    #[test]
    fn test_explosion_ignores_taps() {
        let mut state = StoryState::new(1);
        for _ in 0..4 {
            tick(&mut state, &tap(), SIM_DT);
        }
        assert_eq!(state.stage(), Stage::MagicalExplosion);
        tick(&mut state, &tap(), SIM_DT);
        assert_eq!(state.stage(), Stage::MagicalExplosion);
    }

    #[test]
    fn test_explosion_auto_advances_after_dwell() {
        let mut state = StoryState::new(1);
        for _ in 0..4 {
            tick(&mut state, &tap(), SIM_DT);
        }
        assert_eq!(state.stage(), Stage::MagicalExplosion);

        idle(&mut state, BURST_DWELL_TICKS - 1);
        assert_eq!(state.stage(), Stage::MagicalExplosion);

        idle(&mut state, 1);
        assert_eq!(state.stage(), Stage::LoveMessage);
        assert!(state.events.contains(&StoryEvent::BurstFinished));
        assert!(state.events.contains(&StoryEvent::StageEntered(Stage::LoveMessage)));

        // Exactly one auto-advance
        idle(&mut state, BURST_DWELL_TICKS * 2);
        assert_eq!(state.stage(), Stage::LoveMessage);
    }

    #[test]
    fn test_shake_on_name_reveal() {
        let mut state = StoryState::new(1);
        tick(&mut state, &tap(), SIM_DT);
        tick(&mut state, &tap(), SIM_DT);
        assert_eq!(state.stage(), Stage::NameReveal);
        assert!(state.is_shaking());

        idle(&mut state, SHAKE_DURATION_TICKS - 1);
        assert!(state.is_shaking());
        idle(&mut state, 1);
        assert!(!state.is_shaking());
        assert!(state.events.contains(&StoryEvent::ShakeEnded));
    }

    #[test]
    fn test_leaving_name_reveal_early_clears_shake() {
        let mut state = StoryState::new(1);
        tick(&mut state, &tap(), SIM_DT);
        tick(&mut state, &tap(), SIM_DT);
        idle(&mut state, 60);
        tick(&mut state, &tap(), SIM_DT);
        assert_eq!(state.stage(), Stage::GiftSuspense);
        assert!(!state.is_shaking());

        // Past the original 2000 ms mark nothing changes
        idle(&mut state, SHAKE_DURATION_TICKS);
        assert!(!state.is_shaking());
        assert_eq!(state.stage(), Stage::GiftSuspense);
    }

    #[test]
    fn test_full_walkthrough_and_restart() {
        let mut state = StoryState::new(2024);
        for _ in 0..4 {
            tick(&mut state, &tap(), SIM_DT);
        }
        idle(&mut state, BURST_DWELL_TICKS);
        assert_eq!(state.stage(), Stage::LoveMessage);
        tick(&mut state, &tap(), SIM_DT);
        assert_eq!(state.stage(), Stage::DreamyEnding);

        // Taps on the last stage do nothing
        tick(&mut state, &tap(), SIM_DT);
        assert_eq!(state.stage(), Stage::DreamyEnding);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.stage(), Stage::Opening);
        assert!(!state.is_shaking());
        assert!(state.events.contains(&StoryEvent::Restarted));
    }

    #[test]
    fn test_exit_transitions_drain() {
        let mut state = StoryState::new(3);
        idle(&mut state, TICKS_PER_SECOND);
        tick(&mut state, &tap(), SIM_DT);
        assert_eq!(state.leaving.len(), 1);
        assert_eq!(state.leaving[0].stage, Stage::Opening);
        idle(&mut state, crate::secs_to_ticks(STAGE_TRANSITION_SECS) + 2);
        assert!(state.leaving.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Same seed and inputs produce identical layouts and stages
        let mut state1 = StoryState::new(99999);
        let mut state2 = StoryState::new(99999);

        let inputs = [tap(), TickInput::default(), tap(), tap(), tap()];
        for input in &inputs {
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.stage(), state2.stage());
        assert_eq!(
            format!("{:?}", state1.active.scene),
            format!("{:?}", state2.active.scene)
        );
    }
}
