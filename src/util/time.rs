//! Time utilities for the frame simulation

use std::time::Instant;

/// Default display refresh rate the simulation is tuned for
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Milliseconds per frame at the given rate
pub fn frame_millis(frame_rate: u32) -> f64 {
    1000.0 / frame_rate.max(1) as f64
}

/// Synthetic monotonic clock handing out one timestamp per frame.
///
/// The simulation never reads wall time; every step receives the value
/// produced here as its `now` argument.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_ms: f64,
    frame: u64,
}

impl FrameClock {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_ms: frame_millis(frame_rate),
            frame: 0,
        }
    }

    /// Advance one frame and return its timestamp in milliseconds
    pub fn tick(&mut self) -> f64 {
        self.frame += 1;
        self.now()
    }

    /// Timestamp of the most recent frame (0 before the first tick)
    pub fn now(&self) -> f64 {
        self.frame as f64 * self.frame_ms
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// A simple timer for measuring real elapsed durations
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_monotonic_and_fixed_rate() {
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.now(), 0.0);
        let a = clock.tick();
        let b = clock.tick();
        assert!(b > a);
        assert!((b - a - 1000.0 / 60.0).abs() < 1e-9);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn zero_frame_rate_does_not_divide_by_zero() {
        assert_eq!(frame_millis(0), 1000.0);
    }
}
