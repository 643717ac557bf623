/// Rolling frame-time average for the FPS label

use std::collections::VecDeque;

/// Frame times kept for the rolling average
pub const FRAME_SAMPLES: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct FrameCounter {
    samples: VecDeque<f32>,
    total_frames: u64,
}

impl FrameCounter {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(FRAME_SAMPLES),
            total_frames: 0,
        }
    }

    /// Record the duration of one frame, in seconds.
    ///
    /// Negative and non-finite values are ignored.
    pub fn record(&mut self, elapsed_seconds: f32) {
        if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
            return;
        }
        if self.samples.len() == FRAME_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(elapsed_seconds);
        self.total_frames += 1;
    }

    /// Samples currently in the window
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Frames recorded since creation
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Mean frame time over the window, or 0 when empty
    pub fn average_frame_time(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    /// Frames per second over the window, or 0 when no time has elapsed
    pub fn average_fps(&self) -> f32 {
        let average = self.average_frame_time();
        if average > 0.0 { 1.0 / average } else { 0.0 }
    }
}

#[cfg(test)]
#[path = "frame_counter_tests.rs"]
mod tests;
