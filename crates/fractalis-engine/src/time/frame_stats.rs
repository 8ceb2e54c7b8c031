use std::time::Duration;

use super::FrameTime;

/// Rolling frame-rate counter that reports through `log` at a fixed interval.
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: Duration,
    frames: u32,
    window: f32,
}

impl FrameStats {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            frames: 0,
            window: 0.0,
        }
    }

    /// Accounts for one frame. Returns the average frames per second when an
    /// interval has just been completed.
    pub fn record(&mut self, time: &FrameTime) -> Option<f32> {
        self.frames += 1;
        self.window += time.dt;

        if self.window < self.interval.as_secs_f32() {
            return None;
        }

        let fps = self.frames as f32 / self.window;
        log::debug!(
            "{fps:.1} fps over {} frames (frame #{})",
            self.frames,
            time.frame_index
        );

        self.frames = 0;
        self.window = 0.0;
        Some(fps)
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
