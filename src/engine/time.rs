use std::time::Instant;

/// Wall-clock frame timing: the raw delta since the previous tick and the
/// seconds since the timer started.
pub struct FrameTimer {
    start: Instant,
    last: Instant,
    pub dt: f32,
    pub elapsed: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            dt: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.dt = now.duration_since(self.last).as_secs_f32();
        self.elapsed = now.duration_since(self.start).as_secs_f32();
        self.last = now;
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic() {
        let mut timer = FrameTimer::new();
        timer.tick();
        let first = timer.elapsed;
        std::thread::sleep(std::time::Duration::from_millis(2));
        timer.tick();
        assert!(timer.elapsed > first);
        assert!(timer.dt > 0.0);
    }
}
