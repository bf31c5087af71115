//! Headless session loop driving the simulation

use serde::Serialize;
use tracing::{debug, info};

use crate::config::Tuning;
use crate::input::InputScript;
use crate::util::time::FrameClock;

use super::events::GameEvent;
use super::level::Level;
use super::simulation::Simulation;
use super::snapshot::{FrameSnapshot, SnapshotBuilder};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Every enemy was defeated
    Cleared,
    /// The frame limit was reached first
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub outcome: SessionOutcome,
    pub frames: u64,
    pub time_ms: f64,
    pub deaths: u32,
    pub parries: u32,
    pub jumps: u32,
    pub enemies_remaining: usize,
}

/// Owns a simulation plus its clock and input, and runs it to completion
pub struct GameSession {
    simulation: Simulation,
    clock: FrameClock,
    input: InputScript,
    snapshot_builder: SnapshotBuilder,
    snapshots: Vec<FrameSnapshot>,
}

impl GameSession {
    pub fn new(
        level: Level,
        tuning: Tuning,
        input: InputScript,
        frame_rate: u32,
        snapshot_every: u32,
    ) -> Self {
        Self {
            simulation: Simulation::new(level, tuning),
            clock: FrameClock::new(frame_rate),
            input,
            snapshot_builder: SnapshotBuilder::new(snapshot_every),
            snapshots: Vec::new(),
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Snapshots emitted so far, oldest first
    pub fn snapshots(&self) -> &[FrameSnapshot] {
        &self.snapshots
    }

    /// Run until the level is cleared or `max_frames` have elapsed
    pub fn run(&mut self, max_frames: u64) -> SessionSummary {
        info!(
            enemies = self.simulation.state().alive_enemies(),
            max_frames, "Session started"
        );

        let outcome = loop {
            if self.simulation.state().alive_enemies() == 0 {
                break SessionOutcome::Cleared;
            }
            if self.clock.frame() >= max_frames {
                break SessionOutcome::TimedOut;
            }

            self.run_frame();
        };

        let summary = self.summary(outcome);
        info!(
            outcome = ?summary.outcome,
            frames = summary.frames,
            deaths = summary.deaths,
            parries = summary.parries,
            enemies_remaining = summary.enemies_remaining,
            "Session ended"
        );
        summary
    }

    /// Step a single frame with the scripted input for its timestamp
    pub fn run_frame(&mut self) {
        let now = self.clock.tick();
        let input = self.input.sample(now);
        let report = self.simulation.step(now, &input);

        for event in &report.events {
            self.log_event(event, now);
            if matches!(event, GameEvent::EnemyDefeated { .. }) {
                self.snapshot_builder.force_next();
            }
        }

        if self.snapshot_builder.should_send() {
            let snapshot = self
                .snapshot_builder
                .build(self.simulation.state(), now, &report.status);
            debug!(
                frame = snapshot.frame,
                x = snapshot.player.x,
                y = snapshot.player.y,
                camera_x = snapshot.camera_x,
                projectiles = snapshot.projectiles,
                "{}",
                snapshot.status
            );
            self.snapshots.push(snapshot);
        }
    }

    fn log_event(&self, event: &GameEvent, now: f64) {
        let frame = self.simulation.state().frame;
        if event.is_notable() {
            info!(frame, time_ms = now, event = ?event, "Game event");
        } else {
            debug!(frame, time_ms = now, event = ?event, "Game event");
        }
    }

    fn summary(&self, outcome: SessionOutcome) -> SessionSummary {
        let state = self.simulation.state();
        SessionSummary {
            outcome,
            frames: self.clock.frame(),
            time_ms: self.clock.now(),
            deaths: state.player.deaths,
            parries: state.player.parries,
            jumps: state.player.jumps,
            enemies_remaining: state.alive_enemies(),
        }
    }
}
