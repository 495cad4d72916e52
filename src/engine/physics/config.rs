// Simulation tuning constants
//
// Everything here is read-only while a step runs. Swap configs between steps
// with `Simulation::set_config`, which validates first.

use super::PhysicsError;

/// Density used to derive body mass from volume
pub const DEFAULT_DENSITY: f64 = 3.0;

/// Pointer push tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushConfig {
    /// Reach of the pointer, added to the body radius
    pub radius: f64,
    /// Height of the pointer when the input collaborator provides none
    pub reference_y: f64,
    /// Scale from pointer velocity to impulse
    pub impulse_multiplier: f64,
    /// Upward kick per unit of horizontal pointer speed (0.0 disables)
    pub lift_factor: f64,
    /// Impulse pushing bodies away from the pointer center
    pub radial_strength: f64,
}

/// Single-funnel tornado tuning (linear falloff from the center)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TornadoConfig {
    /// Horizontal reach of the funnel
    pub radius: f64,
    /// Force toward the funnel axis
    pub pull_strength: f64,
    /// Force around the funnel axis
    pub rotation_strength: f64,
    /// Constant upward force
    pub lift_strength: f64,
}

/// Layered vortex tuning
///
/// The space above the floor is cut into `band_count` horizontal bands of
/// `band_height`. Band `k` reaches `base_radius + k * radius_step` from the
/// pointer and pulls/spins with strengths growing by the matching step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VortexConfig {
    pub band_height: f64,
    pub band_count: usize,
    pub base_radius: f64,
    pub radius_step: f64,
    pub base_pull: f64,
    pub pull_step: f64,
    pub base_rotation: f64,
    pub rotation_step: f64,
}

impl VortexConfig {
    /// Reach of band `k`
    pub fn band_radius(&self, band: usize) -> f64 {
        self.base_radius + band as f64 * self.radius_step
    }

    /// Inward force of band `k`
    pub fn band_pull(&self, band: usize) -> f64 {
        self.base_pull + band as f64 * self.pull_step
    }

    /// Tangential force of band `k`
    pub fn band_rotation(&self, band: usize) -> f64 {
        self.base_rotation + band as f64 * self.rotation_step
    }
}

/// Global simulation constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Vertical gravitational acceleration (negative pulls down)
    pub gravity: f64,
    /// Fraction of normal velocity kept after a bounce (0.0 = dead, 1.0 = elastic)
    pub restitution: f64,
    /// Apply horizontal damping to bodies resting on the floor
    pub floor_friction: bool,
    /// Damping coefficient for floor friction force
    pub friction_damping: f64,
    /// Gap above the floor still counted as contact
    pub floor_contact_threshold: f64,
    /// Density for bodies spawned through the simulation
    pub density: f64,
    /// Squared distance under which two centers are treated as coincident
    pub contact_epsilon: f64,
    pub push: PushConfig,
    pub tornado: TornadoConfig,
    pub vortex: VortexConfig,
}

/// Defaults tuned for 0.1 radius marbles at density 3.0 in the standard box
pub const DEFAULT_CONFIG: SimulationConfig = SimulationConfig {
    gravity: -9.8,
    restitution: 0.5,
    floor_friction: true,
    // Kept well under mass / dt for a default marble so the damping never overshoots
    friction_damping: 0.01,
    floor_contact_threshold: 0.01,
    density: DEFAULT_DENSITY,
    contact_epsilon: 0.005,

    push: PushConfig {
        radius: 0.3,
        reference_y: -0.5,
        impulse_multiplier: 0.005,
        lift_factor: 0.25,
        radial_strength: 0.0005,
    },

    tornado: TornadoConfig {
        radius: 1.0,
        pull_strength: 0.15,
        rotation_strength: 0.25,
        lift_strength: 0.18,
    },

    vortex: VortexConfig {
        band_height: 0.4,
        band_count: 5,
        base_radius: 0.4,
        radius_step: 0.2,
        base_pull: 0.12,
        pull_step: 0.02,
        base_rotation: 0.2,
        rotation_step: 0.05,
    },
};

impl Default for SimulationConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl SimulationConfig {
    /// Set gravitational acceleration
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set restitution coefficient
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Enable floor friction with the given damping
    pub fn with_floor_friction(mut self, damping: f64) -> Self {
        self.floor_friction = true;
        self.friction_damping = damping;
        self
    }

    /// Disable floor friction
    pub fn without_floor_friction(mut self) -> Self {
        self.floor_friction = false;
        self
    }

    /// Set density for spawned bodies
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Reject values the solver cannot work with
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let scalars = [
            ("gravity", self.gravity),
            ("restitution", self.restitution),
            ("friction_damping", self.friction_damping),
            ("floor_contact_threshold", self.floor_contact_threshold),
            ("density", self.density),
            ("contact_epsilon", self.contact_epsilon),
            ("push.radius", self.push.radius),
            ("push.reference_y", self.push.reference_y),
            ("push.impulse_multiplier", self.push.impulse_multiplier),
            ("push.lift_factor", self.push.lift_factor),
            ("push.radial_strength", self.push.radial_strength),
            ("tornado.radius", self.tornado.radius),
            ("tornado.pull_strength", self.tornado.pull_strength),
            ("tornado.rotation_strength", self.tornado.rotation_strength),
            ("tornado.lift_strength", self.tornado.lift_strength),
            ("vortex.band_height", self.vortex.band_height),
            ("vortex.base_radius", self.vortex.base_radius),
            ("vortex.radius_step", self.vortex.radius_step),
            ("vortex.base_pull", self.vortex.base_pull),
            ("vortex.pull_step", self.vortex.pull_step),
            ("vortex.base_rotation", self.vortex.base_rotation),
            ("vortex.rotation_step", self.vortex.rotation_step),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{} is not finite ({})", name, value)));
        }

        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(invalid(format!(
                "restitution must be within [0, 1], got {}",
                self.restitution
            )));
        }
        if self.density <= 0.0 {
            return Err(invalid(format!("density must be positive, got {}", self.density)));
        }

        let non_negative = [
            ("friction_damping", self.friction_damping),
            ("floor_contact_threshold", self.floor_contact_threshold),
            ("contact_epsilon", self.contact_epsilon),
            ("push.radius", self.push.radius),
            ("vortex.base_radius", self.vortex.base_radius),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(invalid(format!("{} must not be negative, got {}", name, value)));
        }

        if self.tornado.radius <= 0.0 {
            return Err(invalid(format!(
                "tornado.radius must be positive, got {}",
                self.tornado.radius
            )));
        }
        if self.vortex.band_height <= 0.0 || self.vortex.band_count == 0 {
            return Err(invalid(format!(
                "vortex needs at least one band of positive height (height = {}, count = {})",
                self.vortex.band_height, self.vortex.band_count
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> PhysicsError {
    PhysicsError::InvalidConfig(message)
}
