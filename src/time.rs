//! Frame clock for the viewer loop.
//!
//! # Example
//!
//! ```ignore
//! use ribbons::time::Time;
//!
//! let mut time = Time::new();
//!
//! // Once per frame:
//! let dt = time.update();
//! controller.tick(dt);
//! ```

use std::time::{Duration, Instant};

/// Longest frame delta handed out. Stalls (window drags, breakpoints) are
/// reported as this instead of one huge step.
pub const MAX_DELTA: f32 = 0.25;

/// Elapsed time, delta time and frame counting.
#[derive(Debug)]
pub struct Time {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl Time {
    /// Create a new clock starting now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Advance the clock. Call once per frame. Returns the frame delta.
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_secs = now
            .duration_since(self.last_frame)
            .as_secs_f32()
            .min(MAX_DELTA);
        self.last_frame = now;
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Seconds since the clock started.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds between the last two updates, capped at [`MAX_DELTA`].
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.delta(), 0.0);
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let delta = time.update();

        assert!(delta > 0.0);
        assert!(time.elapsed() > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_delta_is_capped() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(300));
        assert_eq!(time.update(), MAX_DELTA);
    }
}
