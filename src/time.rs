//! Job-cycle clock using an accumulator pattern.
//!
//! `draw_web()` calls at ~60fps with variable delta. JobClock turns this
//! into whole job cycles (`JOB_CYCLE_MS`) for the accounting engine and a
//! periodic autosave signal, so the economy never depends on frame rate.

/// Length of one accounting step in milliseconds.
pub const JOB_CYCLE_MS: u64 = 1_000;

/// Autosave interval in milliseconds.
pub const SAVE_CYCLE_MS: u64 = 15_000;

/// Wall-clock milliseconds since the Unix epoch.
pub fn wall_clock_ms() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}

/// What the caller should do after feeding a timestamp.
#[derive(Debug, Default, PartialEq)]
pub struct ClockStep {
    /// Milliseconds to pass to the accounting tick, if any whole cycle elapsed.
    pub job_delta_ms: Option<u64>,
    pub save_due: bool,
}

pub struct JobClock {
    cycle_ms: u64,
    save_ms: u64,
    /// Milliseconds not yet handed out as a job cycle.
    accumulator: f64,
    /// Milliseconds since the last autosave.
    since_save: f64,
    /// Timestamp of the last update (ms), None before the first frame.
    last_timestamp: Option<f64>,
}

impl JobClock {
    pub fn new(cycle_ms: u64, save_ms: u64) -> Self {
        Self {
            cycle_ms: cycle_ms.max(1),
            save_ms: save_ms.max(1),
            accumulator: 0.0,
            since_save: 0.0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()` or similar).
    ///
    /// Large gaps are not clamped: a tab that was backgrounded hands the
    /// whole gap to the engine, which settles it as catch-up.
    pub fn update(&mut self, now_ms: f64) -> ClockStep {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        self.since_save += delta;

        let cycles = (self.accumulator / self.cycle_ms as f64) as u64;
        let job_delta_ms = if cycles > 0 {
            let ms = cycles * self.cycle_ms;
            self.accumulator -= ms as f64;
            Some(ms)
        } else {
            None
        };

        let save_due = self.since_save >= self.save_ms as f64;
        if save_due {
            self.since_save = 0.0;
        }

        ClockStep {
            job_delta_ms,
            save_due,
        }
    }
}

impl Default for JobClock {
    fn default() -> Self {
        Self::new(JOB_CYCLE_MS, SAVE_CYCLE_MS)
    }
}
