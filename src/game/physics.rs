//! Player movement, gravity and overlap tests

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Movement feel constants. Velocities are in pixels per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Horizontal speed while a direction is held
    pub move_speed: f32,
    /// Base gravity added to vertical velocity each frame
    pub gravity: f32,
    /// Gravity multiplier whenever the player is not rising
    pub fall_gravity_mult: f32,
    /// Gravity multiplier while rising with jump held
    pub hold_gravity_mult: f32,
    /// Vertical velocity set by a jump
    pub jump_velocity: f32,
    /// Terminal fall speed
    pub max_fall_speed: f32,
    /// Grace period after leaving ground during which a jump is accepted
    pub coyote_ms: f64,
    /// How long a jump press stays buffered
    pub jump_buffer_ms: f64,
    /// Velocity retained per frame on the ground with no direction held
    pub ground_friction: f32,
    /// Velocity retained per frame in the air with no direction held
    pub air_friction: f32,
    /// Slack when deciding whether a contact came from above or below
    pub landing_tolerance: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            gravity: 0.42,
            fall_gravity_mult: 0.55,
            hold_gravity_mult: 0.10,
            jump_velocity: -7.2,
            max_fall_speed: 9.5,
            coyote_ms: 190.0,
            jump_buffer_ms: 180.0,
            ground_friction: 0.70,
            air_friction: 0.92,
            landing_tolerance: 2.0,
        }
    }
}

/// How a platform contact was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Landed,
    HeadBump,
    None,
}

/// Stateless physics helpers
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Integrate one frame of gravity and return the new vertical velocity.
    ///
    /// Holding jump while rising softens gravity; anything that is not
    /// rising uses the descent multiplier. The result never exceeds the
    /// terminal fall speed.
    pub fn apply_gravity(vy: f32, holding_jump: bool, tuning: &MovementTuning) -> f32 {
        let rising = vy < 0.0;
        let mut g = tuning.gravity;

        if holding_jump && rising {
            g *= tuning.hold_gravity_mult;
        }
        if !rising {
            g *= tuning.fall_gravity_mult;
        }

        (vy + g).min(tuning.max_fall_speed)
    }

    /// Resolve horizontal input into (new_vx, new_facing).
    /// Left wins when both directions are held.
    pub fn horizontal_velocity(
        vx: f32,
        facing: i8,
        left: bool,
        right: bool,
        on_ground: bool,
        tuning: &MovementTuning,
    ) -> (f32, i8) {
        if left {
            (-tuning.move_speed, -1)
        } else if right {
            (tuning.move_speed, 1)
        } else if on_ground {
            (vx * tuning.ground_friction, facing)
        } else {
            (vx * tuning.air_friction, facing)
        }
    }

    /// Strict AABB overlap; touching edges do not count
    pub fn rect_overlap(a: &Rect, b: &Rect) -> bool {
        a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
    }

    /// Circle against rectangle using the closest point on the rectangle
    pub fn circle_rect_overlap(cx: f32, cy: f32, r: f32, rect: &Rect) -> bool {
        let x = cx.clamp(rect.x, rect.x + rect.w);
        let y = cy.clamp(rect.y, rect.y + rect.h);
        let dx = cx - x;
        let dy = cy - y;
        dx * dx + dy * dy <= r * r
    }

    /// Classify an overlap between a moving body and a solid.
    ///
    /// `prev_y` is the body's top edge before this frame's vertical step.
    pub fn classify_contact(
        body: &Rect,
        prev_y: f32,
        vy: f32,
        solid: &Rect,
        tolerance: f32,
    ) -> Contact {
        if vy > 0.0 && prev_y + body.h <= solid.y + tolerance {
            Contact::Landed
        } else if vy < 0.0 && prev_y >= solid.bottom() - tolerance {
            Contact::HeadBump
        } else {
            Contact::None
        }
    }

    /// Whether a buffered press and the grounded/coyote state allow a jump
    pub fn jump_allowed(
        now: f64,
        jump_buffered_at: Option<f64>,
        last_grounded_at: Option<f64>,
        on_ground: bool,
        tuning: &MovementTuning,
    ) -> bool {
        let buffered = jump_buffered_at.is_some_and(|at| now - at <= tuning.jump_buffer_ms);
        let coyote = last_grounded_at.is_some_and(|at| now - at <= tuning.coyote_ms);
        buffered && (on_ground || coyote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> MovementTuning {
        MovementTuning::default()
    }

    #[test]
    fn holding_jump_softens_ascent() {
        let t = tuning();
        let held = PhysicsSystem::apply_gravity(-5.0, true, &t);
        let released = PhysicsSystem::apply_gravity(-5.0, false, &t);
        assert!((held - (-5.0 + 0.042)).abs() < 1e-5);
        assert!((released - (-5.0 + 0.42)).abs() < 1e-5);
    }

    #[test]
    fn descent_uses_fall_multiplier_even_when_holding() {
        let t = tuning();
        let vy = PhysicsSystem::apply_gravity(1.0, true, &t);
        assert!((vy - (1.0 + 0.42 * 0.55)).abs() < 1e-5);
    }

    #[test]
    fn fall_speed_is_capped() {
        let t = tuning();
        let mut vy = 0.0;
        for _ in 0..500 {
            vy = PhysicsSystem::apply_gravity(vy, false, &t);
            assert!(vy <= t.max_fall_speed);
        }
        assert_eq!(vy, t.max_fall_speed);
    }

    #[test]
    fn horizontal_input_prefers_left_and_applies_friction() {
        let t = tuning();
        assert_eq!(PhysicsSystem::horizontal_velocity(0.0, 1, true, true, true, &t), (-4.0, -1));
        assert_eq!(PhysicsSystem::horizontal_velocity(0.0, -1, false, true, false, &t), (4.0, 1));

        let (vx, facing) = PhysicsSystem::horizontal_velocity(4.0, 1, false, false, true, &t);
        assert!((vx - 2.8).abs() < 1e-5);
        assert_eq!(facing, 1);

        let (vx, _) = PhysicsSystem::horizontal_velocity(4.0, 1, false, false, false, &t);
        assert!((vx - 3.68).abs() < 1e-5);
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(!PhysicsSystem::rect_overlap(&a, &b));
        assert!(PhysicsSystem::rect_overlap(&a, &c));
    }

    #[test]
    fn circle_rect_uses_closest_point() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(PhysicsSystem::circle_rect_overlap(5.0, 5.0, 1.0, &r));
        assert!(PhysicsSystem::circle_rect_overlap(13.0, 5.0, 3.0, &r));
        assert!(!PhysicsSystem::circle_rect_overlap(14.0, 14.0, 5.0, &r));
    }

    #[test]
    fn contact_from_above_lands_and_from_below_bumps() {
        let solid = Rect::new(0.0, 100.0, 50.0, 24.0);
        let body = Rect::new(0.0, 60.0, 32.0, 48.0);
        let t = tuning();
        assert_eq!(
            PhysicsSystem::classify_contact(&body, 52.0, 8.0, &solid, t.landing_tolerance),
            Contact::Landed
        );

        let body = Rect::new(0.0, 120.0, 32.0, 48.0);
        assert_eq!(
            PhysicsSystem::classify_contact(&body, 125.0, -5.0, &solid, t.landing_tolerance),
            Contact::HeadBump
        );

        // Side contact while falling deep inside the solid
        let body = Rect::new(0.0, 90.0, 32.0, 48.0);
        assert_eq!(
            PhysicsSystem::classify_contact(&body, 85.0, 5.0, &solid, t.landing_tolerance),
            Contact::None
        );
    }

    #[test]
    fn jump_needs_buffer_and_support() {
        let t = tuning();
        assert!(PhysicsSystem::jump_allowed(1000.0, Some(900.0), None, true, &t));
        assert!(PhysicsSystem::jump_allowed(1000.0, Some(900.0), Some(850.0), false, &t));
        assert!(!PhysicsSystem::jump_allowed(1000.0, Some(900.0), Some(700.0), false, &t));
        assert!(!PhysicsSystem::jump_allowed(1000.0, Some(700.0), None, true, &t));
        assert!(!PhysicsSystem::jump_allowed(1000.0, None, Some(999.0), true, &t));
    }
}
