//! World bounds and the built-in stage layout

use super::combat::Enemy;
use super::platform::{Axis, Platform, PlatformMotion};

/// Static world description plus its platforms
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// Extra depth below `height` before a fall counts as out of the world
    pub kill_margin: f32,
    pub platforms: Vec<Platform>,
}

impl World {
    /// Y coordinate past which the player respawns
    pub fn kill_line(&self) -> f32 {
        self.height + self.kill_margin
    }
}

/// A world together with the enemies that start in it
#[derive(Debug, Clone)]
pub struct Level {
    pub world: World,
    pub enemies: Vec<Enemy>,
}

const GROUND_Y: f32 = 672.0;
const GROUND_H: f32 = 48.0;
const LEDGE_H: f32 = 24.0;

impl Level {
    /// The dusk stage: ground chunks broken by pits, ledges, three moving
    /// platforms and three turrets of increasing toughness.
    pub fn dusk() -> Self {
        let ground = |x: f32, w: f32| Platform::fixed(x, GROUND_Y, w, GROUND_H);
        let ledge = |x: f32, y: f32, w: f32| Platform::fixed(x, y, w, LEDGE_H);
        let mover = |x: f32, y: f32, w: f32, axis: Axis, amplitude: f32, speed: f64| {
            Platform::moving(x, y, w, LEDGE_H, PlatformMotion { axis, amplitude, speed })
        };

        let platforms = vec![
            ground(0.0, 760.0),
            ground(1340.0, 520.0),
            ground(2550.0, 640.0),
            ground(3920.0, 620.0),
            ground(5200.0, 560.0),
            ground(6200.0, 1600.0),
            // Section 1
            ledge(220.0, 560.0, 220.0),
            ledge(520.0, 500.0, 190.0),
            ledge(820.0, 430.0, 160.0),
            ledge(1080.0, 560.0, 200.0),
            mover(1400.0, 520.0, 150.0, Axis::Y, 60.0, 0.0012),
            ledge(1660.0, 440.0, 160.0),
            // Section 2
            ledge(1980.0, 600.0, 140.0),
            ledge(2220.0, 520.0, 130.0),
            ledge(2440.0, 440.0, 120.0),
            ledge(2650.0, 560.0, 150.0),
            mover(2920.0, 500.0, 170.0, Axis::X, 150.0, 0.0011),
            ledge(3230.0, 420.0, 150.0),
            // Section 3
            ledge(3520.0, 600.0, 170.0),
            ledge(3780.0, 520.0, 160.0),
            ledge(4060.0, 450.0, 150.0),
            ledge(4350.0, 560.0, 170.0),
            mover(4700.0, 600.0, 160.0, Axis::Y, 80.0, 0.00135),
            ledge(4980.0, 500.0, 150.0),
            // End stretch
            ledge(5280.0, 420.0, 190.0),
            ledge(5600.0, 520.0, 150.0),
            ledge(5880.0, 600.0, 220.0),
        ];

        let enemies = vec![
            Enemy::new(1120.0, 560.0 - 48.0, 3, 650.0),
            Enemy::new(3720.0, 520.0 - 48.0, 4, 580.0),
            Enemy::new(6600.0, GROUND_Y - 48.0, 6, 520.0),
        ];

        Self {
            world: World {
                width: 7800.0,
                height: 720.0,
                spawn_x: 120.0,
                spawn_y: 300.0,
                kill_margin: 200.0,
                platforms,
            },
            enemies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dusk_stage_layout() {
        let level = Level::dusk();
        assert_eq!(level.world.platforms.len(), 27);
        assert_eq!(
            level.world.platforms.iter().filter(|p| p.motion.is_some()).count(),
            3
        );
        assert_eq!(level.enemies.len(), 3);
        assert_eq!(level.world.kill_line(), 920.0);
    }

    #[test]
    fn spawn_is_above_first_ground_chunk() {
        let level = Level::dusk();
        let first = &level.world.platforms[0].rect;
        assert!(level.world.spawn_x >= first.x && level.world.spawn_x < first.x + first.w);
        assert!(level.world.spawn_y < first.y);
    }
}
