//! Story state and the mount/unmount bookkeeping around the sequencer

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::container::StageContainer;
use super::scene::Scene;
use super::sequencer::Sequencer;
use super::stage::Stage;
use crate::compose::{Backdrop, stage_layout};
use crate::consts::BACKDROP_FADE_SECS;

/// Something that happened during a tick, for logging and the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StoryEvent {
    StageEntered(Stage),
    ShakeEnded,
    BurstFinished,
    Restarted,
}

/// Cross-fade between two backdrops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropFade {
    pub current: Backdrop,
    /// The backdrop fading out, if any
    pub previous: Option<Backdrop>,
    /// 0..1 progress of `current` fading in
    pub progress: f32,
}

impl BackdropFade {
    pub fn new(backdrop: Backdrop) -> Self {
        Self {
            current: backdrop,
            previous: None,
            progress: 0.0,
        }
    }

    pub fn set(&mut self, backdrop: Backdrop) {
        if backdrop == self.current {
            return;
        }
        self.previous = Some(self.current);
        self.current = backdrop;
        self.progress = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        self.progress = (self.progress + dt / BACKDROP_FADE_SECS).min(1.0);
        if self.progress >= 1.0 {
            self.previous = None;
        }
    }
}

/// Complete story state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct StoryState {
    /// Layout seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub sequencer: Sequencer,
    /// The mounted stage
    pub active: StageContainer,
    /// Stages playing their exit transition
    pub leaving: Vec<StageContainer>,
    pub backdrop: BackdropFade,
    /// Events raised by the latest tick
    pub events: Vec<StoryEvent>,
}

impl StoryState {
    /// Create a fresh story at the opening with the given layout seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let sequencer = Sequencer::new();
        let active = mount_stage(sequencer.current(), &mut rng);
        Self {
            seed,
            rng,
            time_ticks: 0,
            backdrop: BackdropFade::new(Backdrop::for_stage(sequencer.current())),
            sequencer,
            active,
            leaving: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.sequencer.current()
    }

    pub fn is_shaking(&self) -> bool {
        self.sequencer.is_shaking()
    }

    /// Bring the mounted container in line with the sequencer.
    /// Call after anything that may have changed the current stage.
    pub fn sync_mounts(&mut self) {
        let stage = self.sequencer.current();
        if self.active.stage == stage {
            return;
        }

        // One instance per stage: a stage still fading out is dropped
        // before its replacement mounts
        self.leaving.retain(|c| c.stage != stage);

        let fresh = mount_stage(stage, &mut self.rng);
        let mut old = std::mem::replace(&mut self.active, fresh);
        old.unmount();
        self.leaving.push(old);

        self.backdrop.set(Backdrop::for_stage(stage));
        self.events.push(StoryEvent::StageEntered(stage));
    }

    /// Stage containers in draw order (exiting first, active on top)
    pub fn containers(&self) -> impl Iterator<Item = &StageContainer> {
        self.leaving.iter().chain(std::iter::once(&self.active))
    }
}

fn mount_stage(stage: Stage, rng: &mut Pcg32) -> StageContainer {
    let layout = stage_layout(stage);
    log::debug!("Mounting {} ({} layers)", stage.as_str(), layout.layers.len());
    StageContainer::mount(stage, Scene::mount(layout.layers, rng), layout.on_tap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_story_starts_at_opening() {
        let state = StoryState::new(1);
        assert_eq!(state.stage(), Stage::Opening);
        assert_eq!(state.active.stage, Stage::Opening);
        assert!(state.leaving.is_empty());
        assert_eq!(state.backdrop.current, Backdrop::Night);
    }

    #[test]
    fn test_sync_swaps_active_and_fades_backdrop() {
        let mut state = StoryState::new(1);
        state.sequencer.advance();
        state.sync_mounts();
        assert_eq!(state.active.stage, Stage::BuildUp);
        assert_eq!(state.leaving.len(), 1);
        assert!(state.leaving[0].is_exiting());
        assert_eq!(state.backdrop.current, Backdrop::Blush);
        assert_eq!(state.backdrop.previous, Some(Backdrop::Night));
        assert_eq!(state.events, vec![StoryEvent::StageEntered(Stage::BuildUp)]);
    }

    #[test]
    fn test_at_most_one_instance_per_stage() {
        let mut state = StoryState::new(1);
        state.sequencer.advance();
        state.sync_mounts();
        // Back to the opening while it is still fading out
        state.sequencer.restart();
        state.sync_mounts();
        let openings = state.containers().filter(|c| c.stage == Stage::Opening).count();
        assert_eq!(openings, 1);
        assert_eq!(state.active.stage, Stage::Opening);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = StoryState::new(77);
        let b = StoryState::new(77);
        assert_eq!(format!("{:?}", a.active.scene), format!("{:?}", b.active.scene));
    }

    #[test]
    fn test_backdrop_fade_completes() {
        let mut fade = BackdropFade::new(Backdrop::Blush);
        fade.set(Backdrop::Dreamy);
        fade.update(BACKDROP_FADE_SECS);
        assert_eq!(fade.progress, 1.0);
        assert_eq!(fade.previous, None);
    }
}
