//! Static and sinusoidally moving platforms

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::physics::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

/// Oscillation around the platform's base position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformMotion {
    pub axis: Axis,
    /// Peak displacement in pixels
    pub amplitude: f32,
    /// Full cycles per millisecond
    pub speed: f64,
}

impl PlatformMotion {
    /// Offset from base at time `now` (ms)
    pub fn offset(&self, now: f64) -> f32 {
        ((now * self.speed * TAU).sin() * self.amplitude as f64) as f32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub rect: Rect,
    pub base_x: f32,
    pub base_y: f32,
    pub motion: Option<PlatformMotion>,
    /// Displacement applied during the latest update
    pub dx: f32,
    pub dy: f32,
}

impl Platform {
    pub fn fixed(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            base_x: x,
            base_y: y,
            motion: None,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn moving(x: f32, y: f32, w: f32, h: f32, motion: PlatformMotion) -> Self {
        Self {
            motion: Some(motion),
            ..Self::fixed(x, y, w, h)
        }
    }

    /// Reposition for time `now` and record this frame's displacement
    pub fn update(&mut self, now: f64) {
        let Some(motion) = self.motion else {
            self.dx = 0.0;
            self.dy = 0.0;
            return;
        };

        let (prev_x, prev_y) = (self.rect.x, self.rect.y);
        let offset = motion.offset(now);

        match motion.axis {
            Axis::X => {
                self.rect.x = self.base_x + offset;
                self.rect.y = self.base_y;
            }
            Axis::Y => {
                self.rect.x = self.base_x;
                self.rect.y = self.base_y + offset;
            }
        }

        self.dx = self.rect.x - prev_x;
        self.dy = self.rect.y - prev_y;
    }

    pub fn moved(&self) -> bool {
        self.dx != 0.0 || self.dy != 0.0
    }
}

/// Advance every platform to time `now`
pub fn update_platforms(platforms: &mut [Platform], now: f64) {
    for platform in platforms.iter_mut() {
        platform.update(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_platform_never_moves() {
        let mut p = Platform::fixed(10.0, 20.0, 100.0, 24.0);
        p.update(1234.0);
        assert_eq!(p.rect, Rect::new(10.0, 20.0, 100.0, 24.0));
        assert!(!p.moved());
    }

    #[test]
    fn horizontal_platform_peaks_at_quarter_cycle() {
        let motion = PlatformMotion {
            axis: Axis::X,
            amplitude: 150.0,
            speed: 0.001,
        };
        let mut p = Platform::moving(2920.0, 500.0, 170.0, 24.0, motion);

        // 250 ms is a quarter cycle at 1 cycle/s
        p.update(250.0);
        assert!((p.rect.x - 3070.0).abs() < 1e-3);
        assert_eq!(p.rect.y, 500.0);
        assert!((p.dx - 150.0).abs() < 1e-3);
        assert_eq!(p.dy, 0.0);
    }

    #[test]
    fn displacement_tracks_previous_frame() {
        let motion = PlatformMotion {
            axis: Axis::Y,
            amplitude: 60.0,
            speed: 0.0012,
        };
        let mut p = Platform::moving(1400.0, 520.0, 150.0, 24.0, motion);
        p.update(100.0);
        let y1 = p.rect.y;
        p.update(116.0);
        assert!((p.dy - (p.rect.y - y1)).abs() < 1e-4);
        assert_eq!(p.rect.x, 1400.0);
        assert!(p.moved());
    }
}
