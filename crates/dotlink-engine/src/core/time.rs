/// Fixed timestep accumulator.
/// Turns variable frame deltas into a whole number of fixed-length steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Most steps a single frame may produce.
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap so a long stall does not replay unbounded steps
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// A cancelable periodic tick source. At most one arming is live at a time.
#[derive(Debug, Clone)]
pub struct Countdown {
    period: f32,
    clock: Option<FixedTimestep>,
}

impl Countdown {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            clock: None,
        }
    }

    /// Start ticking from a fresh accumulator. Any previous arming is dropped
    /// first. Returns whether one was running.
    pub fn arm(&mut self) -> bool {
        let replaced = self.cancel();
        self.clock = Some(FixedTimestep::new(self.period));
        replaced
    }

    /// Stop ticking. Returns `true` only for the call that actually stopped it.
    pub fn cancel(&mut self) -> bool {
        self.clock.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.clock.is_some()
    }

    /// Feed elapsed time; returns the number of whole periods that fired.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.clock.as_mut().map_or(0, |c| c.accumulate(dt))
    }
}
