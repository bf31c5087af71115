//! Player state (authoritative)

use super::physics::Rect;

pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 48.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    // Position and movement
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub facing: i8,
    pub on_ground: bool,
    /// Platform index the player landed on this frame
    pub standing_on: Option<usize>,

    // Jump feel
    pub last_grounded_at: Option<f64>,
    pub jump_buffered_at: Option<f64>,
    pub jump_lock: bool,

    // Combat windows (absolute expiry timestamps, ms)
    pub parry_until: f64,
    pub parry_ready_at: f64,
    pub sword_until: f64,
    pub sword_ready_at: f64,
    pub sword_lock: bool,

    // Stats
    pub jumps: u32,
    pub parries: u32,
    pub deaths: u32,
}

impl PlayerState {
    pub fn new(spawn_x: f32, spawn_y: f32) -> Self {
        Self {
            x: spawn_x,
            y: spawn_y,
            vel_x: 0.0,
            vel_y: 0.0,
            facing: 1,
            on_ground: false,
            standing_on: None,
            last_grounded_at: None,
            jump_buffered_at: None,
            jump_lock: false,
            parry_until: 0.0,
            parry_ready_at: 0.0,
            sword_until: 0.0,
            sword_ready_at: 0.0,
            sword_lock: false,
            jumps: 0,
            parries: 0,
            deaths: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn center(&self) -> (f32, f32) {
        self.rect().center()
    }

    pub fn parry_active(&self, now: f64) -> bool {
        now < self.parry_until
    }

    pub fn sword_active(&self, now: f64) -> bool {
        now < self.sword_until
    }

    /// Milliseconds until the parry can be used again
    pub fn parry_cooldown_left(&self, now: f64) -> f64 {
        (self.parry_ready_at - now).max(0.0)
    }

    /// Put the player back at the spawn point. Combat timers and stats
    /// survive; only kinematics and ground tracking reset.
    pub fn respawn(&mut self, spawn_x: f32, spawn_y: f32, now: f64) {
        self.x = spawn_x;
        self.y = spawn_y;
        self.vel_x = 0.0;
        self.vel_y = 0.0;
        self.last_grounded_at = Some(now);
        self.standing_on = None;
        self.deaths += 1;
    }
}
