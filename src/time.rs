use std::time::Instant;

/// Frame clock. Delta time is scaled and clamped so a long stall does not
/// produce a single huge simulation step.
#[derive(Debug, Clone)]
pub struct Time {
    start: Instant,
    frame_start: Instant,
    time: f32,
    delta_time: f32,
    max_delta_time: f32,
    time_scale: f32,
    frame: u64,
}

impl Time {
    pub fn new(max_delta_time: f32, time_scale: f32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_start: now,
            time: 0.0,
            delta_time: 0.0,
            max_delta_time,
            time_scale,
            frame: 0,
        }
    }

    /// Measures the wall-clock time since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let raw = now.duration_since(self.frame_start).as_secs_f32();
        self.frame_start = now;
        self.record(raw);
    }

    /// Steps the clock by a fixed amount instead of measuring.
    pub fn advance(&mut self, dt: f32) {
        self.frame_start = Instant::now();
        self.record(dt);
    }

    fn record(&mut self, raw: f32) {
        self.delta_time = (raw.max(0.0) * self.time_scale).min(self.max_delta_time);
        self.time += self.delta_time;
        self.frame += 1;
    }

    pub fn reset(&mut self) {
        self.start = Instant::now();
        self.frame_start = self.start;
        self.time = 0.0;
        self.delta_time = 0.0;
        self.frame = 0;
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed_real(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time_scale = time_scale;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(1.0 / 30.0, 1.0)
    }
}
