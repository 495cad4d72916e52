// Per-frame pointer state in world space

use crate::core::math::approx_equal;

/// Movement below this distance between samples does not count as a move
const MOVE_EPSILON: f64 = 1e-6;

/// Snapshot of the pointer for one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub world_x: f64,
    pub world_z: f64,
    /// Pointer height, when the projection provides one
    pub world_y: Option<f64>,
    /// Pointer velocity along X (units/second)
    pub vel_x: f64,
    /// Pointer velocity along Z (units/second)
    pub vel_z: f64,
    /// Whether the pointer moved since the previous sample
    pub has_moved: bool,
}

impl PointerState {
    /// A pointer resting at a position
    pub fn at(world_x: f64, world_z: f64) -> Self {
        Self {
            world_x,
            world_z,
            ..Self::default()
        }
    }

    /// Set the velocity and mark the pointer as moving
    pub fn moving(mut self, vel_x: f64, vel_z: f64) -> Self {
        self.vel_x = vel_x;
        self.vel_z = vel_z;
        self.has_moved = true;
        self
    }

    /// Set an explicit pointer height
    pub fn with_height(mut self, world_y: f64) -> Self {
        self.world_y = Some(world_y);
        self
    }

    /// Horizontal pointer speed
    pub fn horizontal_speed(&self) -> f64 {
        self.vel_x.hypot(self.vel_z)
    }
}

/// Derives pointer velocity from successive world-space samples
#[derive(Debug, Default)]
pub struct PointerTracker {
    /// Latest snapshot
    state: PointerState,

    /// Whether at least one sample has been recorded
    has_sample: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new pointer position sampled `dt` seconds after the previous one
    ///
    /// The first sample only establishes the position; velocity stays zero and
    /// the pointer is not reported as moved.
    pub fn update(&mut self, world_x: f64, world_z: f64, dt: f64) -> PointerState {
        let previous = self.state;
        self.state.world_x = world_x;
        self.state.world_z = world_z;

        let moved = self.has_sample
            && !(approx_equal(world_x, previous.world_x, MOVE_EPSILON)
                && approx_equal(world_z, previous.world_z, MOVE_EPSILON));

        if moved && dt > 0.0 {
            self.state.vel_x = (world_x - previous.world_x) / dt;
            self.state.vel_z = (world_z - previous.world_z) / dt;
        } else {
            self.state.vel_x = 0.0;
            self.state.vel_z = 0.0;
        }
        self.state.has_moved = moved;
        self.has_sample = true;

        self.state
    }

    /// Set or clear the pointer height reported in snapshots
    pub fn set_height(&mut self, world_y: Option<f64>) {
        self.state.world_y = world_y;
    }

    /// Latest snapshot
    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Forget all samples (e.g. when the pointer leaves the window)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_sample_is_not_a_move() {
        let mut tracker = PointerTracker::new();
        let state = tracker.update(1.0, 2.0, 1.0 / 60.0);
        assert!(!state.has_moved);
        assert_eq!(state.vel_x, 0.0);
        assert_eq!(state.world_x, 1.0);
        assert_eq!(state.world_z, 2.0);
    }

    #[test]
    fn test_velocity_from_samples() {
        let mut tracker = PointerTracker::new();
        tracker.update(0.0, 0.0, 0.1);
        let state = tracker.update(0.5, -0.2, 0.1);

        assert!(state.has_moved);
        assert_relative_eq!(state.vel_x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(state.vel_z, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stationary_pointer_stops() {
        let mut tracker = PointerTracker::new();
        tracker.update(0.0, 0.0, 0.1);
        tracker.update(1.0, 0.0, 0.1);
        let state = tracker.update(1.0, 0.0, 0.1);

        assert!(!state.has_moved);
        assert_eq!(state.vel_x, 0.0);
    }

    #[test]
    fn test_height_and_reset() {
        let mut tracker = PointerTracker::new();
        tracker.set_height(Some(0.25));
        tracker.update(0.0, 0.0, 0.1);
        assert_eq!(tracker.state().world_y, Some(0.25));

        tracker.reset();
        assert_eq!(tracker.state(), PointerState::default());
    }

    #[test]
    fn test_pointer_state_builders() {
        let state = PointerState::at(1.0, 2.0).moving(3.0, 4.0).with_height(0.5);
        assert!(state.has_moved);
        assert_eq!(state.world_y, Some(0.5));
        assert_relative_eq!(state.horizontal_speed(), 5.0, epsilon = 1e-12);
    }
}
