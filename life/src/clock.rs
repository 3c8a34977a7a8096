use std::time::Duration;

/// Upper bound on steps owed after one long frame; the rest of the backlog is dropped.
pub const MAX_STEPS_PER_FRAME: u32 = 4;

/// Fixed-timestep accumulator that decouples simulation ticks from frame rate.
///
/// Frame time is added with [`TickClock::advance`], which returns how many
/// whole intervals have elapsed. The remainder carries over to the next frame,
/// so the number of ticks over a span of time does not depend on how that span
/// was sliced into frames.
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    accumulated: Duration,
    max_steps: u32,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            max_steps: MAX_STEPS_PER_FRAME,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Add `elapsed` and return the number of ticks now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.interval.is_zero() {
            // Step once per frame.
            return 1;
        }

        self.accumulated += elapsed;
        let cap = self.interval * self.max_steps;
        if self.accumulated > cap {
            self.accumulated = cap;
        }

        let mut ticks = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            ticks += 1;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(40);

    #[test]
    fn no_tick_before_interval() {
        let mut clock = TickClock::new(TICK);
        assert_eq!(clock.advance(Duration::from_millis(39)), 0);
        assert_eq!(clock.advance(Duration::from_millis(1)), 1);
        assert_eq!(clock.advance(Duration::from_millis(39)), 0);
    }

    #[test]
    fn tick_count_independent_of_frame_rate() {
        let second = Duration::from_secs(1);
        for fps in [30u32, 60, 144, 240] {
            let mut clock = TickClock::new(TICK);
            let frame = second / fps;
            let ticks: u32 = (0..fps).map(|_| clock.advance(frame)).sum();
            // 1s / 40ms = 25, integer frame durations may lose a few nanoseconds.
            assert!((24..=25).contains(&ticks), "{fps} fps gave {ticks} ticks");
        }
    }

    #[test]
    fn long_frame_is_capped() {
        let mut clock = TickClock::new(TICK);
        assert_eq!(clock.advance(Duration::from_secs(5)), MAX_STEPS_PER_FRAME);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn custom_cap() {
        let mut clock = TickClock::new(TICK).with_max_steps(2);
        assert_eq!(clock.advance(Duration::from_millis(200)), 2);
        let mut clock = TickClock::new(TICK).with_max_steps(0);
        assert_eq!(clock.advance(Duration::from_millis(200)), 1);
    }

    #[test]
    fn zero_interval_steps_every_frame() {
        let mut clock = TickClock::new(Duration::ZERO);
        assert_eq!(clock.advance(Duration::ZERO), 1);
        assert_eq!(clock.advance(Duration::from_secs(1)), 1);
    }

    #[test]
    fn reset_drops_partial_progress() {
        let mut clock = TickClock::new(TICK);
        clock.advance(Duration::from_millis(30));
        clock.reset();
        assert_eq!(clock.advance(Duration::from_millis(30)), 0);
    }
}
