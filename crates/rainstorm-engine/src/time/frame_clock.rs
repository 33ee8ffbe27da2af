use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame started, in seconds.
    pub dt: f64,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// One clock per engine instance. Delta time is reported as measured unless
/// clamps are configured with [`FrameClock::with_clamps`].
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    clamps: Option<(Duration, Duration)>,
}

impl FrameClock {
    /// Creates a clock whose baseline is `now`.
    pub fn starting_at(now: Instant) -> Self {
        Self {
            last: now,
            frame_index: 0,
            clamps: None,
        }
    }

    /// Creates a clock that clamps delta time to `[dt_min, dt_max]`.
    ///
    /// Useful when a debugger pause or a minimized window should not turn
    /// into one enormous simulation step.
    pub fn with_clamps(now: Instant, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            clamps: Some((dt_min, dt_max)),
            ..Self::starting_at(now)
        }
    }

    /// Resets the baseline and the frame counter.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
        self.frame_index = 0;
    }

    /// Advances the clock to `now` and returns a new `FrameTime`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let mut dt = now.saturating_duration_since(self.last);
        if let Some((lo, hi)) = self.clamps {
            dt = dt.clamp(lo, hi);
        }

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f64(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }

    /// Advances the clock using the system monotonic clock.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::starting_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_elapsed_seconds_and_counts_frames() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);

        let a = clock.tick_at(t0 + Duration::from_millis(16));
        let b = clock.tick_at(t0 + Duration::from_millis(50));

        assert!((a.dt - 0.016).abs() < 1e-9);
        assert!((b.dt - 0.034).abs() < 1e-9);
        assert_eq!((a.frame_index, b.frame_index), (0, 1));
    }

    #[test]
    fn backwards_time_yields_zero_dt() {
        let t0 = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(t0);
        let ft = clock.tick_at(t0 - Duration::from_millis(5));
        assert_eq!(ft.dt, 0.0);
    }

    #[test]
    fn clamps_apply_when_configured() {
        let t0 = Instant::now();
        let mut clock =
            FrameClock::with_clamps(t0, Duration::from_millis(1), Duration::from_millis(100));

        assert!((clock.tick_at(t0 + Duration::from_secs(5)).dt - 0.1).abs() < 1e-9);
        let t1 = t0 + Duration::from_secs(5);
        assert!((clock.tick_at(t1).dt - 0.001).abs() < 1e-9);
    }

    #[test]
    fn reset_restarts_frame_index() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        clock.tick_at(t0);
        clock.tick_at(t0);
        clock.reset(t0);
        assert_eq!(clock.tick_at(t0).frame_index, 0);
    }
}
