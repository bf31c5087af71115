//! Simulation state and the per-frame step

use tracing::trace;

use crate::config::Tuning;

use super::camera::Camera;
use super::combat::{CombatSystem, Enemy, Projectile, ProjectileOwner};
use super::events::{GameEvent, HitCause, RespawnReason};
use super::level::{Level, World};
use super::physics::{Contact, PhysicsSystem};
use super::player::{PlayerState, PLAYER_HEIGHT, PLAYER_WIDTH};
use super::platform::update_platforms;
use super::snapshot::status_line;
use super::FrameInput;

/// Everything the frame step mutates
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub frame: u64,
    pub world: World,
    pub player: PlayerState,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub camera: Camera,
    next_projectile_id: u64,
}

impl SimulationState {
    pub fn new(level: Level) -> Self {
        let player = PlayerState::new(level.world.spawn_x, level.world.spawn_y);
        Self {
            frame: 0,
            world: level.world,
            player,
            enemies: level.enemies,
            projectiles: Vec::new(),
            camera: Camera::default(),
            next_projectile_id: 1,
        }
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive()).count()
    }

    /// Add a projectile, assigning it a fresh id
    pub fn spawn_projectile(&mut self, mut projectile: Projectile) -> u64 {
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        projectile.id = id;
        self.projectiles.push(projectile);
        id
    }
}

/// Outcome of a single frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    pub status: String,
}

/// The frame-stepped platformer simulation
pub struct Simulation {
    state: SimulationState,
    tuning: Tuning,
}

impl Simulation {
    pub fn new(level: Level, tuning: Tuning) -> Self {
        Self {
            state: SimulationState::new(level),
            tuning,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Advance one frame at time `now` (ms, monotonic)
    pub fn step(&mut self, now: f64, input: &FrameInput) -> FrameReport {
        let mut events = Vec::new();
        self.state.frame += 1;
        trace!(frame = self.state.frame, now, "step");

        update_platforms(&mut self.state.world.platforms, now);
        self.handle_input(now, input);
        self.apply_gravity(input.jump);
        self.move_and_collide(now, &mut events);
        self.enemy_fire(now, &mut events);
        self.update_projectiles(now, &mut events);
        self.update_sword(now, &mut events);
        self.state
            .camera
            .follow(self.state.player.x, self.state.world.width, &self.tuning.camera);

        FrameReport {
            events,
            status: status_line(&self.state, now),
        }
    }

    /// Movement keys, jump buffering, parry and sword activation
    fn handle_input(&mut self, now: f64, input: &FrameInput) {
        let movement = &self.tuning.movement;
        let combat = &self.tuning.combat;
        let player = &mut self.state.player;

        let (vel_x, facing) = PhysicsSystem::horizontal_velocity(
            player.vel_x,
            player.facing,
            input.left,
            input.right,
            player.on_ground,
            movement,
        );
        player.vel_x = vel_x;
        player.facing = facing;

        if input.jump && !player.jump_lock {
            player.jump_buffered_at = Some(now);
            player.jump_lock = true;
        }
        if !input.jump {
            player.jump_lock = false;
        }

        if input.parry && now > player.parry_ready_at {
            player.parry_until = now + combat.parry_window_ms;
            player.parry_ready_at = player.parry_until + combat.parry_cooldown_ms;
        }

        if input.sword && !player.sword_lock && now > player.sword_ready_at {
            player.sword_until = now + combat.sword_active_ms;
            player.sword_ready_at = player.sword_until + combat.sword_cooldown_ms;
            player.sword_lock = true;
        }
        if !input.sword {
            player.sword_lock = false;
        }
    }

    fn apply_gravity(&mut self, holding_jump: bool) {
        let player = &mut self.state.player;
        player.vel_y = PhysicsSystem::apply_gravity(player.vel_y, holding_jump, &self.tuning.movement);
    }

    /// Integrate position, resolve platform contacts, carry, jump, respawn
    fn move_and_collide(&mut self, now: f64, events: &mut Vec<GameEvent>) {
        let movement = &self.tuning.movement;
        let SimulationState { world, player, .. } = &mut self.state;
        let was_on_ground = player.on_ground;

        player.standing_on = None;
        player.x = (player.x + player.vel_x).clamp(0.0, (world.width - PLAYER_WIDTH).max(0.0));
        player.y += player.vel_y;
        player.on_ground = false;

        for (idx, platform) in world.platforms.iter().enumerate() {
            let body = player.rect();
            if !PhysicsSystem::rect_overlap(&body, &platform.rect) {
                continue;
            }

            let prev_y = player.y - player.vel_y;
            match PhysicsSystem::classify_contact(
                &body,
                prev_y,
                player.vel_y,
                &platform.rect,
                movement.landing_tolerance,
            ) {
                Contact::Landed => {
                    player.y = platform.rect.y - PLAYER_HEIGHT;
                    player.vel_y = 0.0;
                    player.on_ground = true;
                    player.last_grounded_at = Some(now);
                    player.standing_on = Some(idx);
                }
                Contact::HeadBump => {
                    player.y = platform.rect.bottom();
                    player.vel_y = 0.0;
                }
                Contact::None => {}
            }
        }

        // Carry after resolution so the player stays glued to the platform
        if player.on_ground {
            if let Some(platform) = player.standing_on.and_then(|idx| world.platforms.get(idx)) {
                if platform.moved() {
                    player.x += platform.dx;
                    player.y += platform.dy;
                }
            }
        }

        if let (true, false, Some(idx)) = (player.on_ground, was_on_ground, player.standing_on) {
            events.push(GameEvent::Landed { platform: idx });
        }

        if PhysicsSystem::jump_allowed(
            now,
            player.jump_buffered_at,
            player.last_grounded_at,
            player.on_ground,
            movement,
        ) {
            let coyote = !player.on_ground;
            player.vel_y = movement.jump_velocity;
            player.on_ground = false;
            player.jump_buffered_at = None;
            player.last_grounded_at = None;
            player.standing_on = None;
            player.jumps += 1;
            events.push(GameEvent::Jumped { coyote });
        }

        if player.y > world.kill_line() {
            player.respawn(world.spawn_x, world.spawn_y, now);
            events.push(GameEvent::Respawned {
                reason: RespawnReason::Fell,
            });
        }
    }

    /// Living enemies near the camera fire at the player's centre
    fn enemy_fire(&mut self, now: f64, events: &mut Vec<GameEvent>) {
        let combat = &self.tuning.combat;
        let viewport_width = self.tuning.camera.viewport_width;
        let (target_x, target_y) = self.state.player.center();
        let camera_x = self.state.camera.x;

        let mut fired = Vec::new();
        for (idx, enemy) in self.state.enemies.iter_mut().enumerate() {
            if !enemy.alive() || now < enemy.next_shot {
                continue;
            }

            if !CombatSystem::in_fire_range(enemy.rect.x, camera_x, viewport_width, combat) {
                enemy.next_shot = now + combat.offscreen_shot_delay_ms;
                continue;
            }

            enemy.next_shot = now + enemy.shoot_every_ms;
            let (x, y) = enemy.rect.center();
            fired.push((idx, Projectile::aimed(0, x, y, target_x, target_y, combat)));
        }

        for (enemy, projectile) in fired {
            let projectile = self.state.spawn_projectile(projectile);
            events.push(GameEvent::EnemyFired { enemy, projectile });
        }
    }

    fn update_projectiles(&mut self, now: f64, events: &mut Vec<GameEvent>) {
        // Sampled once; a respawn mid-phase does not move the parry centre
        let center = self.state.player.center();
        let projectiles = std::mem::take(&mut self.state.projectiles);

        let mut kept = Vec::with_capacity(projectiles.len());
        for mut projectile in projectiles {
            if self.resolve_projectile(&mut projectile, now, center, events) {
                kept.push(projectile);
            }
        }
        self.state.projectiles = kept;
    }

    /// Move one projectile and apply parry and hits. Returns false once it
    /// should be removed.
    fn resolve_projectile(
        &mut self,
        projectile: &mut Projectile,
        now: f64,
        (center_x, center_y): (f32, f32),
        events: &mut Vec<GameEvent>,
    ) -> bool {
        let combat = &self.tuning.combat;
        let SimulationState {
            world,
            player,
            enemies,
            ..
        } = &mut self.state;

        projectile.advance();

        let margin = combat.despawn_margin;
        if projectile.x < -margin
            || projectile.x > world.width + margin
            || projectile.y < -margin
            || projectile.y > world.height + margin
        {
            return false;
        }

        if world.platforms.iter().any(|p| projectile.touches(&p.rect)) {
            return false;
        }

        if player.parry_active(now)
            && projectile.owner == ProjectileOwner::Enemy
            && (projectile.x - center_x).hypot(projectile.y - center_y) < combat.parry_radius
        {
            let target = CombatSystem::nearest_living(enemies, projectile.x, projectile.y);
            let (target_x, target_y) = target
                .map(|(_, x, y)| (x, y))
                .unwrap_or((projectile.x + 1.0, projectile.y));

            projectile.reflect_toward(target_x, target_y, combat.parry_speed_boost);
            player.parries += 1;
            events.push(GameEvent::Parried {
                projectile: projectile.id,
                target: target.map(|(idx, _, _)| idx),
            });
        }

        match projectile.owner {
            ProjectileOwner::Player => {
                let hit = enemies
                    .iter_mut()
                    .enumerate()
                    .find(|(_, e)| e.alive() && projectile.touches(&e.rect));

                if let Some((idx, enemy)) = hit {
                    let defeated = enemy.take_damage(combat.reflect_damage);
                    push_enemy_hit(events, idx, enemy, HitCause::Reflected, defeated);
                    return false;
                }
            }
            ProjectileOwner::Enemy => {
                if projectile.touches(&player.rect()) {
                    player.respawn(world.spawn_x, world.spawn_y, now);
                    events.push(GameEvent::PlayerHit {
                        projectile: projectile.id,
                    });
                    events.push(GameEvent::Respawned {
                        reason: RespawnReason::Shot,
                    });
                    return false;
                }
            }
        }

        true
    }

    /// An open sword window hits the first overlapping enemy, then closes
    fn update_sword(&mut self, now: f64, events: &mut Vec<GameEvent>) {
        let combat = &self.tuning.combat;
        let SimulationState { player, enemies, .. } = &mut self.state;

        if !player.sword_active(now) {
            return;
        }

        let hitbox = CombatSystem::sword_hitbox(&player.rect(), player.facing, combat);
        let hit = enemies
            .iter_mut()
            .enumerate()
            .find(|(_, e)| e.alive() && PhysicsSystem::rect_overlap(&hitbox, &e.rect));

        if let Some((idx, enemy)) = hit {
            let defeated = enemy.take_damage(combat.sword_damage);
            push_enemy_hit(events, idx, enemy, HitCause::Sword, defeated);
            player.sword_until = 0.0;
        }
    }
}

fn push_enemy_hit(
    events: &mut Vec<GameEvent>,
    idx: usize,
    enemy: &Enemy,
    cause: HitCause,
    defeated: bool,
) {
    events.push(GameEvent::EnemyHit {
        enemy: idx,
        hp_left: enemy.hp,
        cause,
    });
    if defeated {
        events.push(GameEvent::EnemyDefeated { enemy: idx });
    }
}
