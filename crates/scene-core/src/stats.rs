/// Frames-per-second counter sampled over one-second windows.
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    window_start: Option<f32>,
    frames_in_window: u32,
    last_fps: Option<f32>,
    min_fps: f32,
    max_fps: f32,
    total_frames: u64,
}

/// Finished one-second sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsSample {
    pub fps: f32,
    pub min: f32,
    pub max: f32,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame at `now_secs`. Returns a sample when a window closes.
    pub fn record(&mut self, now_secs: f32) -> Option<FpsSample> {
        self.total_frames += 1;
        let start = *self.window_start.get_or_insert(now_secs);
        self.frames_in_window += 1;
        let span = now_secs - start;
        if span < 1.0 {
            return None;
        }
        let fps = self.frames_in_window as f32 / span;
        if self.last_fps.is_none() {
            self.min_fps = fps;
            self.max_fps = fps;
        } else {
            self.min_fps = self.min_fps.min(fps);
            self.max_fps = self.max_fps.max(fps);
        }
        self.last_fps = Some(fps);
        self.window_start = Some(now_secs);
        self.frames_in_window = 0;
        Some(FpsSample {
            fps,
            min: self.min_fps,
            max: self.max_fps,
        })
    }

    #[inline]
    pub fn last_fps(&self) -> Option<f32> {
        self.last_fps
    }

    #[inline]
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}
