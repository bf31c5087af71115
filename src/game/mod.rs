//! Game simulation modules

pub mod camera;
pub mod combat;
pub mod events;
pub mod level;
pub mod physics;
pub mod platform;
pub mod player;
pub mod session;
pub mod simulation;
pub mod snapshot;

pub use events::GameEvent;
pub use level::Level;
pub use session::{GameSession, SessionOutcome, SessionSummary};
pub use simulation::{FrameReport, Simulation, SimulationState};

/// Key state sampled for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub parry: bool,
    pub sword: bool,
}
