//! Frame timing
//!
//! `FrameTimer` measures how long a frame's work took; `FrameLimiter` decides
//! when the next frame is due for a fixed framerate.

use std::time::{Duration, Instant};

/// Stopwatch around one frame
#[derive(Debug, Default)]
pub struct FrameTimer {
    started: Option<Instant>,
    last: Duration,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Stop the timer and keep the elapsed time; a stop without a start records zero
    pub fn stop(&mut self) -> Duration {
        self.last = self
            .started
            .take()
            .map(|start| start.elapsed())
            .unwrap_or_default();
        self.last
    }

    /// Duration recorded by the most recent `stop`
    pub fn measure(&self) -> Duration {
        self.last
    }

    /// Most recent measurement in milliseconds
    pub fn measure_ms(&self) -> f64 {
        self.measure().as_secs_f64() * 1000.0
    }
}

/// Paces redraws to a target framerate
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    /// `None` means unlimited
    frame_duration: Option<Duration>,
    next_frame: Instant,
}

impl FrameLimiter {
    /// Create a limiter for `framerate` frames per second (0 = unlimited)
    pub fn new(framerate: u32) -> Self {
        Self::starting_at(framerate, Instant::now())
    }

    fn starting_at(framerate: u32, now: Instant) -> Self {
        let frame_duration = if framerate == 0 {
            None
        } else {
            Some(Duration::from_secs_f64(1.0 / framerate as f64))
        };
        Self {
            frame_duration,
            next_frame: now,
        }
    }

    pub fn frame_duration(&self) -> Option<Duration> {
        self.frame_duration
    }

    /// Whether a frame should be produced at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// When the next frame is due
    pub fn next_deadline(&self) -> Instant {
        self.next_frame
    }

    /// Record a frame at `now` and schedule the following one
    ///
    /// Deadlines advance in fixed steps; after a stall longer than one frame the
    /// schedule restarts from `now` instead of bursting to catch up.
    pub fn schedule_next(&mut self, now: Instant) -> Instant {
        self.next_frame = match self.frame_duration {
            None => now,
            Some(step) => {
                let next = self.next_frame + step;
                if next <= now { now + step } else { next }
            }
        };
        self.next_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_measures_elapsed() {
        let mut timer = FrameTimer::new();
        timer.start();
        std::thread::sleep(Duration::from_millis(5));
        let elapsed = timer.stop();
        assert!(elapsed >= Duration::from_millis(5));
        assert_eq!(timer.measure(), elapsed);
        assert!(timer.measure_ms() >= 5.0);
    }

    #[test]
    fn test_stop_without_start_is_zero() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.stop(), Duration::ZERO);
    }

    #[test]
    fn test_limiter_fixed_steps() {
        let t0 = Instant::now();
        let mut limiter = FrameLimiter::starting_at(50, t0);
        let step = Duration::from_millis(20);
        assert_eq!(limiter.frame_duration(), Some(step));
        assert!(limiter.is_due(t0));

        let next = limiter.schedule_next(t0);
        assert_eq!(next, t0 + step);
        assert!(!limiter.is_due(t0 + Duration::from_millis(10)));
        assert!(limiter.is_due(t0 + step));

        // A slightly late frame keeps the original cadence
        let next = limiter.schedule_next(t0 + Duration::from_millis(25));
        assert_eq!(next, t0 + step * 2);
    }

    #[test]
    fn test_limiter_resyncs_after_stall() {
        let t0 = Instant::now();
        let mut limiter = FrameLimiter::starting_at(50, t0);
        limiter.schedule_next(t0);
        let late = t0 + Duration::from_millis(500);
        assert_eq!(limiter.schedule_next(late), late + Duration::from_millis(20));
    }

    #[test]
    fn test_unlimited_is_always_due() {
        let t0 = Instant::now();
        let mut limiter = FrameLimiter::starting_at(0, t0);
        assert_eq!(limiter.frame_duration(), None);
        let next = limiter.schedule_next(t0);
        assert_eq!(next, t0);
        assert!(limiter.is_due(t0));
    }
}
