//! Side-scrolling camera

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Where the player sits horizontally, as a fraction of the viewport
    pub lead_fraction: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            viewport_width: 960.0,
            viewport_height: 720.0,
            lead_fraction: 0.42,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Track the player, never showing past either world edge
    pub fn follow(&mut self, player_x: f32, world_width: f32, tuning: &CameraTuning) {
        let target = player_x - tuning.viewport_width * tuning.lead_fraction;
        let max_x = (world_width - tuning.viewport_width).max(0.0);
        self.x = target.clamp(0.0, max_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_clamps_to_world() {
        let tuning = CameraTuning::default();
        let mut cam = Camera::default();

        cam.follow(120.0, 7800.0, &tuning);
        assert_eq!(cam.x, 0.0);

        cam.follow(2000.0, 7800.0, &tuning);
        assert!((cam.x - (2000.0 - 403.2)).abs() < 1e-3);

        cam.follow(7790.0, 7800.0, &tuning);
        assert_eq!(cam.x, 6840.0);
    }

    #[test]
    fn narrow_world_pins_camera_at_origin() {
        let mut cam = Camera::default();
        cam.follow(300.0, 500.0, &CameraTuning::default());
        assert_eq!(cam.x, 0.0);
    }
}
