use instant::Instant;

/// Monotonic elapsed-time source read once per frame.
pub trait TimeSource {
    fn elapsed_secs(&self) -> f32;
}

/// Wall clock started at construction; never reset.
#[derive(Clone, Debug)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::start()
    }
}

impl TimeSource for Clock {
    fn elapsed_secs(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}
