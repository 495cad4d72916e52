// Sphere-in-a-box physics: bodies, force fields, collision resolution

pub mod body;
mod bounds;
mod collision;
mod config;
mod forces;
mod instance;
mod world;

pub use body::{Body, BodyBuilder, BodyId};
pub use bounds::{BoxBounds, BoxPreset};
pub use collision::{resolve_boundaries, resolve_pairs};
pub use config::{
    PushConfig, SimulationConfig, TornadoConfig, VortexConfig, DEFAULT_CONFIG, DEFAULT_DENSITY,
};
pub use forces::{apply_floor_friction, apply_gravity, apply_interaction, InteractionMode};
pub use instance::BodyInstance;
pub use world::{Simulation, StepStats};

/// Physics construction and configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("Invalid body radius: {0} (must be finite and positive)")]
    InvalidRadius(f64),

    #[error("Invalid body density: {0} (must be finite and positive)")]
    InvalidDensity(f64),

    #[error("Invalid box bounds: {0}")]
    InvalidBounds(String),

    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("Unknown body: {0}")]
    UnknownBody(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_error_display() {
        let err = PhysicsError::InvalidRadius(-1.0);
        assert_eq!(
            err.to_string(),
            "Invalid body radius: -1 (must be finite and positive)"
        );

        let err = PhysicsError::UnknownBody(7);
        assert_eq!(err.to_string(), "Unknown body: 7");
    }
}
