use std::time::{Duration, Instant};

/// Number of recent frame intervals kept for the rate estimate.
pub const SAMPLE_WINDOW: usize = 10;

/// Default frame cap.
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Bounded wait used by the loop when the next tick is not due yet.
pub const IDLE_WAIT: Duration = Duration::from_millis(1);

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick (or loop start for the first frame).
    pub delta: Duration,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Completed frame count, including this one. The first frame reports `1`.
    pub frame_count: u64,

    /// Estimated frames per second at the time of the tick.
    pub frame_rate: f32,
}

impl FrameTime {
    /// Delta in milliseconds.
    #[inline]
    pub fn delta_ms(&self) -> f32 {
        self.delta.as_secs_f32() * 1000.0
    }
}

/// Fixed-timestep frame clock with a rolling frame-rate estimate.
///
/// The clock does not read time itself: callers pass `now` in, which keeps it
/// deterministic under test and lets the platform own the time source.
///
/// Rate estimate:
/// - the last `SAMPLE_WINDOW` intervals are kept in a ring buffer
/// - the estimate is recomputed only once the ring is full (frame index 9 on)
/// - until then it holds the target rate as a placeholder
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    target_fps: u32,
    target_interval: Duration,
    uncapped: bool,

    samples: [Duration; SAMPLE_WINDOW],
    frame_count: u64,
    frame_rate: f32,
    estimated: bool,
}

impl FrameClock {
    /// Creates a clock capped at `DEFAULT_TARGET_FPS`.
    pub fn new() -> Self {
        Self::with_target_fps(DEFAULT_TARGET_FPS)
    }

    /// Creates a clock capped at `fps` frames per second. `0` is treated as `1`.
    pub fn with_target_fps(fps: u32) -> Self {
        let fps = fps.max(1);
        Self {
            last: None,
            target_fps: fps,
            target_interval: interval_for(fps),
            uncapped: false,
            samples: [Duration::ZERO; SAMPLE_WINDOW],
            frame_count: 0,
            frame_rate: fps as f32,
            estimated: false,
        }
    }

    /// Sets the loop-start baseline. The first frame delta is measured from here.
    pub fn start(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Returns true when the next frame is due.
    ///
    /// An uncapped clock always advances; pacing is then left to the display.
    pub fn should_advance(&self, now: Instant) -> bool {
        if self.uncapped {
            return true;
        }
        match self.last {
            Some(last) => now.saturating_duration_since(last) >= self.target_interval,
            None => true,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn advance(&mut self, now: Instant) -> FrameTime {
        let last = *self.last.get_or_insert(now);
        let delta = now.saturating_duration_since(last);

        let slot = (self.frame_count % SAMPLE_WINDOW as u64) as usize;
        self.samples[slot] = delta;

        if self.frame_count > (SAMPLE_WINDOW - 2) as u64 {
            self.recompute_rate();
        }

        self.frame_count = self.frame_count.wrapping_add(1);
        self.last = Some(now);

        FrameTime {
            delta,
            now,
            frame_count: self.frame_count,
            frame_rate: self.frame_rate,
        }
    }

    /// Changes the frame cap. Returns `false` (and keeps the old cap) for `fps == 0`.
    pub fn set_target_fps(&mut self, fps: u32) -> bool {
        if fps == 0 {
            return false;
        }
        self.target_fps = fps;
        self.target_interval = interval_for(fps);
        if !self.estimated {
            self.frame_rate = fps as f32;
        }
        true
    }

    /// Disables (or re-enables) the frame cap.
    pub fn set_uncapped(&mut self, uncapped: bool) {
        self.uncapped = uncapped;
    }

    pub fn is_uncapped(&self) -> bool {
        self.uncapped
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    pub fn target_interval(&self) -> Duration {
        self.target_interval
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Estimated frames per second (placeholder until the sample window is full).
    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    fn recompute_rate(&mut self) {
        let total: Duration = self.samples.iter().sum();
        let mean_ms = total.as_secs_f64() * 1000.0 / SAMPLE_WINDOW as f64;

        // Synthetic time can produce zero-length frames.
        if mean_ms > 0.0 {
            self.frame_rate = (1000.0 / mean_ms) as f32;
            self.estimated = true;
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

fn interval_for(fps: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(fps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    // ── gating ────────────────────────────────────────────────────────────

    #[test]
    fn gate_waits_for_target_interval() {
        let t0 = Instant::now();
        let mut clock = FrameClock::with_target_fps(50); // 20 ms
        clock.start(t0);

        assert!(!clock.should_advance(t0 + ms(5)));
        assert!(!clock.should_advance(t0 + ms(19)));
        assert!(clock.should_advance(t0 + ms(20)));
    }

    #[test]
    fn uncapped_always_advances() {
        let t0 = Instant::now();
        let mut clock = FrameClock::with_target_fps(10);
        clock.start(t0);
        clock.set_uncapped(true);

        assert!(clock.should_advance(t0));
        clock.set_uncapped(false);
        assert!(!clock.should_advance(t0));
    }

    #[test]
    fn first_delta_is_measured_from_loop_start() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        clock.start(t0 + ms(100));

        let ft = clock.advance(t0 + ms(117));
        assert_eq!(ft.delta, ms(17));
        assert_eq!(ft.frame_count, 1);
    }

    // ── rate estimate ─────────────────────────────────────────────────────

    #[test]
    fn rate_holds_placeholder_until_frame_nine() {
        let t0 = Instant::now();
        let mut clock = FrameClock::with_target_fps(60);
        clock.start(t0);

        // Frames 0..=8 run at 10 ms; the estimate must not move.
        let mut now = t0;
        for _ in 0..9 {
            now += ms(10);
            let ft = clock.advance(now);
            assert_eq!(ft.frame_rate, 60.0);
        }

        // Frame 9 fills the ring and triggers the first estimate.
        now += ms(10);
        let ft = clock.advance(now);
        assert!((ft.frame_rate - 100.0).abs() < 0.01, "rate = {}", ft.frame_rate);
        assert_eq!(clock.frame_count(), 10);
    }

    #[test]
    fn rate_tracks_the_most_recent_window() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        clock.start(t0);

        let mut now = t0;
        for _ in 0..10 {
            now += ms(10);
            clock.advance(now);
        }
        for _ in 0..10 {
            now += ms(20);
            clock.advance(now);
        }

        assert!((clock.frame_rate() - 50.0).abs() < 0.01);
    }

    #[test]
    fn zero_length_frames_keep_previous_estimate() {
        let t0 = Instant::now();
        let mut clock = FrameClock::with_target_fps(30);
        clock.start(t0);

        for _ in 0..12 {
            clock.advance(t0);
        }
        assert_eq!(clock.frame_rate(), 30.0);
    }

    // ── target ────────────────────────────────────────────────────────────

    #[test]
    fn zero_target_is_rejected() {
        let mut clock = FrameClock::with_target_fps(60);
        assert!(!clock.set_target_fps(0));
        assert_eq!(clock.target_fps(), 60);

        assert!(clock.set_target_fps(30));
        assert_eq!(clock.target_fps(), 30);
        assert_eq!(clock.frame_rate(), 30.0);
    }
}
