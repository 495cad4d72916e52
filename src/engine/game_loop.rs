//! Fixed timestep driver for the simulation
//!
//! Converts variable frame durations into a whole number of fixed physics
//! steps. Leftover time carries over to the next frame, and the step count per
//! frame is capped so a long stall cannot snowball into ever longer frames.

use std::time::Duration;

/// Target physics rate (60 steps per second)
pub const FIXED_TIMESTEP: f64 = 1.0 / 60.0;

/// Maximum number of physics steps per frame to prevent spiral of death
pub const MAX_PHYSICS_STEPS: u32 = 5;

/// Accumulator-based fixed step scheduler
#[derive(Debug)]
pub struct FixedStepper {
    /// Step length
    timestep: Duration,

    /// Time not yet consumed by a step
    accumulator: Duration,

    /// Per-frame step cap
    max_steps: u32,

    /// Whether time is currently ignored
    paused: bool,

    /// Frames seen so far
    frame_count: u64,

    /// Steps handed out so far
    step_count: u64,

    /// Steps dropped by the per-frame cap
    dropped_steps: u64,
}

impl FixedStepper {
    /// Create a stepper at the default 60 Hz rate
    pub fn new() -> Self {
        Self::with_timestep(FIXED_TIMESTEP)
    }

    /// Create a stepper with a custom step length in seconds
    ///
    /// Step lengths that are not finite, not positive or shorter than a
    /// nanosecond fall back to [`FIXED_TIMESTEP`].
    pub fn with_timestep(seconds: f64) -> Self {
        let timestep = match Duration::try_from_secs_f64(seconds) {
            Ok(timestep) if !timestep.is_zero() => timestep,
            _ => {
                log::warn!(
                    "Invalid timestep {}s, using {}s instead",
                    seconds,
                    FIXED_TIMESTEP
                );
                Duration::from_secs_f64(FIXED_TIMESTEP)
            }
        };

        Self {
            timestep,
            accumulator: Duration::ZERO,
            max_steps: MAX_PHYSICS_STEPS,
            paused: false,
            frame_count: 0,
            step_count: 0,
            dropped_steps: 0,
        }
    }

    /// Set the per-frame step cap
    pub fn max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Feed one frame's duration, returns the number of fixed steps to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.timestep && steps < self.max_steps {
            self.accumulator -= self.timestep;
            steps += 1;
        }

        // Drop whole steps beyond the cap instead of carrying them forward
        if self.accumulator >= self.timestep {
            let step_nanos = self.timestep.as_nanos();
            let pending_nanos = self.accumulator.as_nanos();
            let behind = (pending_nanos / step_nanos) as u64;
            log::warn!("Physics fell {} steps behind, dropping them", behind);
            self.dropped_steps += behind;
            self.accumulator = Duration::from_nanos((pending_nanos % step_nanos) as u64);
        }

        self.step_count += steps as u64;
        steps
    }

    /// Step length in seconds, the `dt` to pass to each step
    pub fn timestep(&self) -> f64 {
        self.timestep.as_secs_f64()
    }

    /// Interpolation alpha for rendering between physics steps
    /// Alpha = accumulated_time / timestep
    pub fn alpha(&self) -> f64 {
        self.accumulator.as_secs_f64() / self.timestep.as_secs_f64()
    }

    /// Get total number of frames fed
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of steps handed out
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Get total number of steps dropped by the cap
    pub fn dropped_steps(&self) -> u64 {
        self.dropped_steps
    }

    /// Simulated time covered by the steps handed out
    pub fn simulated_secs(&self) -> f64 {
        self.step_count as f64 * self.timestep()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Simulation resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_stepper_creation() {
        let stepper = FixedStepper::new();
        assert_eq!(stepper.frame_count(), 0);
        assert_eq!(stepper.step_count(), 0);
        assert!(!stepper.is_paused());
        assert!((stepper.timestep() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut stepper = FixedStepper::with_timestep(0.010);
        assert_eq!(stepper.advance(ms(6)), 0);
        assert_eq!(stepper.advance(ms(6)), 1);
        assert!((stepper.alpha() - 0.2).abs() < 1e-6);
        assert_eq!(stepper.advance(ms(25)), 2);
        assert_eq!(stepper.step_count(), 3);
        assert_eq!(stepper.frame_count(), 3);
    }

    #[test]
    fn test_pause_resume() {
        let mut stepper = FixedStepper::with_timestep(0.010);
        stepper.advance(ms(5));
        stepper.pause();
        assert!(stepper.is_paused());
        assert_eq!(stepper.advance(ms(100)), 0);

        stepper.resume();
        assert!(!stepper.is_paused());
        assert_eq!(stepper.alpha(), 0.0);
        assert_eq!(stepper.advance(ms(10)), 1);
    }

    #[test]
    fn test_toggle_pause() {
        let mut stepper = FixedStepper::new();
        stepper.toggle_pause();
        assert!(stepper.is_paused());
        stepper.toggle_pause();
        assert!(!stepper.is_paused());
    }

    #[test]
    fn test_max_physics_steps_limit() {
        let mut stepper = FixedStepper::with_timestep(0.010);

        // 300ms would allow 30 steps
        let steps = stepper.advance(ms(300));
        assert_eq!(steps, MAX_PHYSICS_STEPS);
        assert_eq!(stepper.dropped_steps(), 25);
        assert!(stepper.alpha() < 1.0);

        // The backlog is gone, the next frame runs normally
        assert_eq!(stepper.advance(ms(10)), 1);
    }

    #[test]
    fn test_invalid_timestep_falls_back_to_default() {
        for seconds in [0.0, -0.01, f64::NAN, f64::INFINITY, 1e-12] {
            let mut stepper = FixedStepper::with_timestep(seconds);
            assert!((stepper.timestep() - FIXED_TIMESTEP).abs() < 1e-9);
            assert_eq!(stepper.advance(ms(20)), 1);
        }
    }

    #[test]
    fn test_custom_cap() {
        let mut stepper = FixedStepper::with_timestep(0.010).max_steps(2);
        assert_eq!(stepper.advance(ms(50)), 2);
        assert!((stepper.simulated_secs() - 0.02).abs() < 1e-9);
    }
}
