//! Wall-clock measurement around one decision.
//!
//! The timer only reports. Enforcement lives in the planner's `SearchBudget`,
//! which takes its deadline from `TurnTimer::deadline_after`.

use std::time::{Duration, Instant};

use log::{info, warn};

/// Outcome of timing one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTiming {
    pub elapsed: Duration,
    /// How far past the soft deadline the turn ran, if it did.
    pub overrun: Option<Duration>,
}

/// Measures a turn from construction until `finish` (or drop)
pub struct TurnTimer {
    turn: i32,
    start: Instant,
    soft_deadline: Duration,
    reported: bool,
}

impl TurnTimer {
    pub fn start(turn: i32, soft_deadline: Duration) -> Self {
        TurnTimer {
            turn,
            start: Instant::now(),
            soft_deadline,
            reported: false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Absolute instant `budget` after the turn started
    pub fn deadline_after(&self, budget: Duration) -> Instant {
        self.start + budget
    }

    /// Stops measuring and logs an overrun if the soft deadline was missed
    pub fn finish(&mut self) -> TurnTiming {
        let timing = self.measure();
        self.report(&timing);
        timing
    }

    fn measure(&self) -> TurnTiming {
        let elapsed = self.elapsed();
        TurnTiming {
            elapsed,
            overrun: elapsed.checked_sub(self.soft_deadline).filter(|d| !d.is_zero()),
        }
    }

    fn report(&mut self, timing: &TurnTiming) {
        if self.reported {
            return;
        }
        self.reported = true;

        match timing.overrun {
            Some(over) => warn!(
                "Turn {}: decision took {}ms, {}ms over the {}ms soft deadline",
                self.turn,
                timing.elapsed.as_millis(),
                over.as_millis(),
                self.soft_deadline.as_millis()
            ),
            None => info!(
                "Turn {}: decision took {}ms",
                self.turn,
                timing.elapsed.as_millis()
            ),
        }
    }
}

impl Drop for TurnTimer {
    fn drop(&mut self) {
        if !self.reported {
            let timing = self.measure();
            self.report(&timing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_fast_turn_has_no_overrun() {
        let mut timer = TurnTimer::start(1, Duration::from_secs(60));
        let timing = timer.finish();
        assert_eq!(timing.overrun, None);
        assert!(timing.elapsed < Duration::from_secs(60));
    }

    #[test]
    fn test_slow_turn_reports_overrun() {
        let mut timer = TurnTimer::start(2, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        let timing = timer.finish();
        assert!(timing.overrun.is_some());
        assert!(timing.elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn test_deadline_is_relative_to_start() {
        let timer = TurnTimer::start(3, Duration::from_millis(200));
        let deadline = timer.deadline_after(Duration::from_millis(150));
        assert!(deadline > Instant::now());
        assert!(deadline <= Instant::now() + Duration::from_millis(150));
    }
}
