use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Milliseconds since the clock origin.
    pub timestamp_ms: f64,

    /// Milliseconds since the previous tick (0 on the first tick).
    pub dt_ms: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Millisecond clock for the frame loop.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    last_ms: Option<f64>,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            last_ms: None,
            frame_index: 0,
        }
    }

    /// Milliseconds since the clock was created. Never decreases.
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Samples the clock for one refresh callback.
    pub fn tick(&mut self) -> FrameTime {
        let now = self.now_ms();
        let dt_ms = self.last_ms.map_or(0.0, |last| (now - last).max(0.0));
        self.last_ms = Some(now);

        let ft = FrameTime {
            timestamp_ms: now,
            dt_ms,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(b.timestamp_ms >= a.timestamp_ms);
        assert!(clock.now_ms() >= b.timestamp_ms);
    }

    #[test]
    fn first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        let first = clock.tick();
        assert_eq!(first.dt_ms, 0.0);
        assert_eq!(first.frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
    }
}
