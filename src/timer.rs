//! Wall-clock and iteration budget for one search

use std::time::{Duration, Instant};

/// Tracks elapsed time and completed iterations against fixed limits.
///
/// The search asks [`Timer::budget_exceeded`] once per iteration, so the
/// duration limit is soft: an iteration already running finishes.
#[derive(Debug, Clone)]
pub struct Timer {
    max_duration: Duration,
    max_iterations: u32,
    start: Instant,
    iterations: u32,
}

impl Timer {
    pub fn new(max_duration: Duration, max_iterations: u32) -> Self {
        Self {
            max_duration,
            max_iterations,
            start: Instant::now(),
            iterations: 0,
        }
    }

    /// Reset the clock and the iteration count
    pub fn start(&mut self) {
        self.start = Instant::now();
        self.iterations = 0;
    }

    /// Count one iteration and report the elapsed time and total count
    #[inline]
    pub fn tick(&mut self) -> (Duration, u32) {
        self.iterations += 1;
        (self.start.elapsed(), self.iterations)
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// True once either limit is reached
    #[inline]
    pub fn budget_exceeded(&self) -> bool {
        self.iterations >= self.max_iterations || self.start.elapsed() >= self.max_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_limit() {
        let mut timer = Timer::new(Duration::from_secs(60), 3);
        timer.start();
        let mut runs = 0;
        while !timer.budget_exceeded() {
            timer.tick();
            runs += 1;
        }
        assert_eq!(runs, 3);
        assert_eq!(timer.iterations(), 3);
    }

    #[test]
    fn test_duration_limit() {
        let mut timer = Timer::new(Duration::from_millis(5), u32::MAX);
        timer.start();
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.budget_exceeded());
        assert!(timer.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_start_resets() {
        let mut timer = Timer::new(Duration::from_secs(60), 1);
        timer.start();
        let (_, count) = timer.tick();
        assert_eq!(count, 1);
        assert!(timer.budget_exceeded());
        timer.start();
        assert!(!timer.budget_exceeded());
    }

    #[test]
    fn test_zero_iterations_is_exhausted() {
        let timer = Timer::new(Duration::from_secs(60), 0);
        assert!(timer.budget_exceeded());
    }
}
