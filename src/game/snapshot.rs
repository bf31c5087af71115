//! Status line and periodic frame snapshots

use serde::Serialize;

use super::simulation::SimulationState;

/// One-line HUD text for the current frame
pub fn status_line(state: &SimulationState, now: f64) -> String {
    let player = &state.player;
    let mut line = format!("Enemies: {} • ", state.alive_enemies());

    if player.sword_active(now) {
        line.push_str("SLASH");
    }

    let cooldown = player.parry_cooldown_left(now);
    if player.parry_active(now) {
        line.push_str(" PARRY!");
    } else if cooldown > 0.0 {
        line.push_str(&format!(" Parry CD: {}ms", cooldown.ceil() as u64));
    } else {
        line.push_str(" Parry Ready");
    }

    line
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub facing: i8,
    pub on_ground: bool,
    pub deaths: u32,
}

/// Serializable view of the simulation at one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub time_ms: f64,
    pub player: PlayerSnapshot,
    pub enemies_alive: usize,
    /// Remaining hit points per enemy, in level order
    pub enemy_hp: Vec<u32>,
    pub projectiles: usize,
    pub camera_x: f32,
    pub status: String,
}

/// Decides when to emit snapshots and builds them
pub struct SnapshotBuilder {
    /// Frames since the last snapshot
    frames_since_snapshot: u32,
    /// Snapshot interval in frames
    snapshot_interval: u32,
}

impl SnapshotBuilder {
    pub fn new(snapshot_interval: u32) -> Self {
        Self {
            frames_since_snapshot: 0,
            snapshot_interval: snapshot_interval.max(1),
        }
    }

    /// Check if it's time to emit a snapshot
    pub fn should_send(&mut self) -> bool {
        self.frames_since_snapshot += 1;
        if self.frames_since_snapshot >= self.snapshot_interval {
            self.frames_since_snapshot = 0;
            true
        } else {
            false
        }
    }

    /// Force a snapshot on the next check (used for notable events)
    pub fn force_next(&mut self) {
        self.frames_since_snapshot = self.snapshot_interval;
    }

    pub fn build(&self, state: &SimulationState, now: f64, status: &str) -> FrameSnapshot {
        let p = &state.player;
        FrameSnapshot {
            frame: state.frame,
            time_ms: now,
            player: PlayerSnapshot {
                x: p.x,
                y: p.y,
                vel_x: p.vel_x,
                vel_y: p.vel_y,
                facing: p.facing,
                on_ground: p.on_ground,
                deaths: p.deaths,
            },
            enemies_alive: state.alive_enemies(),
            enemy_hp: state.enemies.iter().map(|e| e.hp).collect(),
            projectiles: state.projectiles.len(),
            camera_x: state.camera.x,
            status: status.to_string(),
        }
    }
}
