//! Frame timing
//!
//! Turns wall-clock timestamps into per-frame deltas and keeps a rolling FPS.

use std::time::Instant;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

pub struct FrameClock {
    start: Instant,
    /// Seconds since `start` at the previous frame
    last_time: f64,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames: u64,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_time: 0.0,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames: 0,
            fps: 0,
        }
    }

    /// Seconds since the previous frame, read from the wall clock
    pub fn tick(&mut self) -> f32 {
        let now = self.start.elapsed().as_secs_f64();
        self.tick_at(now)
    }

    /// Record a frame at `time` seconds since the clock started and return
    /// the delta from the previous one. Time going backwards yields zero.
    pub fn tick_at(&mut self, time: f64) -> f32 {
        let dt = (time - self.last_time).max(0.0) as f32;
        self.last_time = time;
        self.frames += 1;

        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot we will overwrite next holds the oldest sample once the ring is full
        if self.frames >= FPS_WINDOW as u64 {
            let oldest = self.frame_times[self.frame_index];
            let elapsed = time - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 / elapsed).round() as u32;
            }
        }

        dt
    }

    /// Frames per second over the last `FPS_WINDOW` frames (0 until the window fills)
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frames recorded so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_between_frames() {
        let mut clock = FrameClock::new();
        assert!((clock.tick_at(0.5) - 0.5).abs() < 1e-6);
        assert!((clock.tick_at(0.75) - 0.25).abs() < 1e-6);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn test_backwards_time_is_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick_at(1.0);
        assert_eq!(clock.tick_at(0.9), 0.0);
    }

    #[test]
    fn test_fps_after_full_window() {
        let mut clock = FrameClock::new();
        for i in 1..FPS_WINDOW {
            clock.tick_at(i as f64 / 60.0);
            assert_eq!(clock.fps(), 0);
        }
        for i in FPS_WINDOW..FPS_WINDOW * 3 {
            clock.tick_at(i as f64 / 60.0);
        }
        assert_eq!(clock.fps(), 60);
    }

    #[test]
    fn test_real_clock_is_monotonic() {
        let mut clock = FrameClock::new();
        assert!(clock.tick() >= 0.0);
        assert!(clock.tick() >= 0.0);
    }
}
