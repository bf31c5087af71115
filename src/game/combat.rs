//! Combat system - enemy fire, projectiles, parry and sword

use serde::{Deserialize, Serialize};

use super::physics::{PhysicsSystem, Rect};

/// Combat timing and geometry constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// How long a parry stays open
    pub parry_window_ms: f64,
    /// Lockout after the window closes
    pub parry_cooldown_ms: f64,
    /// Distance from the player centre at which projectiles get reflected
    pub parry_radius: f32,
    /// Speed multiplier applied to reflected projectiles
    pub parry_speed_boost: f32,
    /// Damage a reflected projectile deals to an enemy
    pub reflect_damage: u32,
    pub sword_active_ms: f64,
    pub sword_cooldown_ms: f64,
    /// Hitbox width in front of the player
    pub sword_range: f32,
    pub sword_height: f32,
    /// Gap between the player centre and the hitbox
    pub sword_offset: f32,
    pub sword_damage: u32,
    /// Enemy projectile speed in pixels per frame
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    /// Retry delay for enemies too far from the camera to shoot
    pub offscreen_shot_delay_ms: f64,
    /// Maximum screen-space distance from the fire anchor
    pub fire_range: f32,
    /// Fire anchor as a fraction of the viewport width
    pub fire_anchor_fraction: f32,
    /// Projectiles outside the world grown by this margin are dropped
    pub despawn_margin: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            parry_window_ms: 110.0,
            parry_cooldown_ms: 420.0,
            parry_radius: 52.0,
            parry_speed_boost: 1.30,
            reflect_damage: 1,
            sword_active_ms: 110.0,
            sword_cooldown_ms: 220.0,
            sword_range: 44.0,
            sword_height: 34.0,
            sword_offset: 8.0,
            sword_damage: 1,
            bullet_speed: 6.6,
            bullet_radius: 6.0,
            offscreen_shot_delay_ms: 250.0,
            fire_range: 1200.0,
            fire_anchor_fraction: 0.6,
            despawn_margin: 120.0,
        }
    }
}

/// Who a projectile hurts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileOwner {
    /// Fired by an enemy, hurts the player
    Enemy,
    /// Reflected by a parry, hurts enemies
    Player,
}

/// Active projectile in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub radius: f32,
    pub owner: ProjectileOwner,
}

impl Projectile {
    /// Enemy projectile from `(x, y)` aimed at `(target_x, target_y)`
    pub fn aimed(id: u64, x: f32, y: f32, target_x: f32, target_y: f32, tuning: &CombatTuning) -> Self {
        let (dir_x, dir_y) = CombatSystem::direction(target_x - x, target_y - y);
        Self {
            id,
            x,
            y,
            vel_x: dir_x * tuning.bullet_speed,
            vel_y: dir_y * tuning.bullet_speed,
            radius: tuning.bullet_radius,
            owner: ProjectileOwner::Enemy,
        }
    }

    pub fn advance(&mut self) {
        self.x += self.vel_x;
        self.y += self.vel_y;
    }

    pub fn speed(&self) -> f32 {
        self.vel_x.hypot(self.vel_y)
    }

    pub fn touches(&self, rect: &Rect) -> bool {
        PhysicsSystem::circle_rect_overlap(self.x, self.y, self.radius, rect)
    }

    /// Send the projectile toward `(target_x, target_y)` at boosted speed
    /// and hand it to the player.
    pub fn reflect_toward(&mut self, target_x: f32, target_y: f32, boost: f32) {
        let (dir_x, dir_y) = CombatSystem::direction(target_x - self.x, target_y - self.y);
        let speed = self.speed() * boost;
        self.vel_x = dir_x * speed;
        self.vel_y = dir_y * speed;
        self.owner = ProjectileOwner::Player;
    }
}

/// A stationary turret-like enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub hp: u32,
    /// Earliest time the next shot may be fired
    pub next_shot: f64,
    pub shoot_every_ms: f64,
}

impl Enemy {
    pub fn new(x: f32, y: f32, hp: u32, shoot_every_ms: f64) -> Self {
        Self {
            rect: Rect::new(x, y, 32.0, 48.0),
            hp,
            next_shot: 0.0,
            shoot_every_ms,
        }
    }

    pub fn alive(&self) -> bool {
        self.hp > 0
    }

    /// Apply damage, returns true when this hit defeated the enemy
    pub fn take_damage(&mut self, damage: u32) -> bool {
        let was_alive = self.alive();
        self.hp = self.hp.saturating_sub(damage);
        was_alive && !self.alive()
    }
}

/// Stateless combat helpers
pub struct CombatSystem;

impl CombatSystem {
    /// Unit vector along `(dx, dy)`; a zero vector is treated as length 1
    pub fn direction(dx: f32, dy: f32) -> (f32, f32) {
        let len = dx.hypot(dy);
        let len = if len == 0.0 { 1.0 } else { len };
        (dx / len, dy / len)
    }

    /// Whether an enemy is close enough to the camera to open fire
    pub fn in_fire_range(enemy_x: f32, camera_x: f32, viewport_width: f32, tuning: &CombatTuning) -> bool {
        let anchor = viewport_width * tuning.fire_anchor_fraction;
        ((enemy_x - camera_x) - anchor).abs() <= tuning.fire_range
    }

    /// Index and centre of the living enemy nearest to `(x, y)`
    pub fn nearest_living(enemies: &[Enemy], x: f32, y: f32) -> Option<(usize, f32, f32)> {
        enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alive())
            .map(|(i, e)| {
                let (ex, ey) = e.rect.center();
                (i, ex, ey, (ex - x).hypot(ey - y))
            })
            .fold(None, |best: Option<(usize, f32, f32, f32)>, cand| match best {
                Some(b) if b.3 <= cand.3 => Some(b),
                _ => Some(cand),
            })
            .map(|(i, ex, ey, _)| (i, ex, ey))
    }

    /// Sword hitbox in front of a player body
    pub fn sword_hitbox(player: &Rect, facing: i8, tuning: &CombatTuning) -> Rect {
        let (px, py) = player.center();
        let w = tuning.sword_range;
        let h = tuning.sword_height;
        let x = if facing >= 0 {
            px + tuning.sword_offset
        } else {
            px - tuning.sword_offset - w
        };
        Rect::new(x, py - h / 2.0, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aimed_projectile_has_bullet_speed() {
        let t = CombatTuning::default();
        let p = Projectile::aimed(1, 0.0, 0.0, 30.0, 40.0, &t);
        assert!((p.speed() - 6.6).abs() < 1e-4);
        assert!((p.vel_x - 6.6 * 0.6).abs() < 1e-4);
        assert_eq!(p.owner, ProjectileOwner::Enemy);
    }

    #[test]
    fn zero_length_aim_does_not_produce_nan() {
        let t = CombatTuning::default();
        let p = Projectile::aimed(1, 5.0, 5.0, 5.0, 5.0, &t);
        assert_eq!((p.vel_x, p.vel_y), (0.0, 0.0));
    }

    #[test]
    fn reflection_boosts_speed_and_flips_owner() {
        let t = CombatTuning::default();
        let mut p = Projectile::aimed(7, 100.0, 0.0, 0.0, 0.0, &t);
        p.reflect_toward(200.0, 0.0, t.parry_speed_boost);
        assert_eq!(p.owner, ProjectileOwner::Player);
        assert!((p.vel_x - 6.6 * 1.3).abs() < 1e-4);
        assert!(p.vel_y.abs() < 1e-6);
    }

    #[test]
    fn damage_saturates_and_reports_defeat_once() {
        let mut e = Enemy::new(0.0, 0.0, 2, 500.0);
        assert!(!e.take_damage(1));
        assert!(e.take_damage(5));
        assert_eq!(e.hp, 0);
        assert!(!e.take_damage(1));
        assert_eq!(e.hp, 0);
    }

    #[test]
    fn nearest_living_skips_dead_enemies() {
        let mut near = Enemy::new(10.0, 0.0, 1, 500.0);
        near.hp = 0;
        let far = Enemy::new(500.0, 0.0, 3, 500.0);
        let enemies = vec![near, far];
        let (idx, ex, _) = CombatSystem::nearest_living(&enemies, 0.0, 0.0).expect("one alive");
        assert_eq!(idx, 1);
        assert_eq!(ex, 516.0);

        let none: Vec<Enemy> = vec![];
        assert!(CombatSystem::nearest_living(&none, 0.0, 0.0).is_none());
    }

    #[test]
    fn sword_hitbox_follows_facing() {
        let t = CombatTuning::default();
        let body = Rect::new(100.0, 200.0, 32.0, 48.0);
        let right = CombatSystem::sword_hitbox(&body, 1, &t);
        assert_eq!(right, Rect::new(124.0, 207.0, 44.0, 34.0));
        let left = CombatSystem::sword_hitbox(&body, -1, &t);
        assert_eq!(left, Rect::new(64.0, 207.0, 44.0, 34.0));
    }

    #[test]
    fn fire_range_is_measured_from_the_anchor() {
        let t = CombatTuning::default();
        assert!(CombatSystem::in_fire_range(1120.0, 0.0, 960.0, &t));
        assert!(!CombatSystem::in_fire_range(6600.0, 0.0, 960.0, &t));
        assert!(CombatSystem::in_fire_range(6600.0, 5800.0, 960.0, &t));
    }
}
