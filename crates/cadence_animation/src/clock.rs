//! Render clock
//!
//! Drives per-frame sampling of animated values. The clock has two
//! independent switches:
//!
//! - **run/stop**: whether frames are produced at all
//! - **play/pause**: whether frame time advances while running
//!
//! A paused-but-running clock still produces frames with a zero delta so
//! that static content keeps redrawing.

/// Time information for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Clock time in seconds since the clock was created
    pub time: f64,
    /// Seconds elapsed since the previous frame (zero while paused)
    pub delta: f32,
}

/// Frame clock with run/stop and play/pause lifecycle
#[derive(Debug)]
pub struct RenderClock {
    running: bool,
    playing: bool,
    time: f64,
    frame: u64,
}

impl Default for RenderClock {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderClock {
    /// Stopped, paused clock at time zero
    pub fn new() -> Self {
        Self {
            running: false,
            playing: false,
            time: 0.0,
            frame: 0,
        }
    }

    /// Start producing frames
    pub fn run(&mut self) {
        if !self.running {
            tracing::debug!("RenderClock: run at t={:.3}", self.time);
        }
        self.running = true;
    }

    /// Stop producing frames
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!("RenderClock: stop at t={:.3}", self.time);
        }
        self.running = false;
    }

    /// Let frame time advance
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Freeze frame time
    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current clock time in seconds
    pub fn now(&self) -> f64 {
        self.time
    }

    /// Number of frames produced so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Produce a frame `dt` seconds after the previous one
    ///
    /// Returns `None` when the clock is stopped.
    pub fn advance(&mut self, dt: f64) -> Option<FrameTime> {
        if !self.running {
            return None;
        }
        let delta = if self.playing && dt > 0.0 { dt } else { 0.0 };
        self.time += delta;
        self.frame += 1;
        Some(FrameTime {
            time: self.time,
            delta: delta as f32,
        })
    }
}
