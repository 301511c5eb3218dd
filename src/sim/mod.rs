//! Deterministic story simulation
//!
//! All story logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timers counted in ticks and owned by the stage that armed them
//! - No rendering or platform dependencies

pub mod burst;
pub mod container;
pub mod easing;
pub mod icons;
pub mod particles;
pub mod scene;
pub mod sequencer;
pub mod stage;
pub mod state;
pub mod tick;
pub mod timer;

pub use burst::BurstView;
pub use container::{Presence, StageContainer, TapAction};
pub use scene::{Layer, LayerSpec, Scene};
pub use sequencer::Sequencer;
pub use stage::Stage;
pub use state::{StoryEvent, StoryState};
pub use tick::{FrameClock, TickInput, tick};
pub use timer::StageTimer;
