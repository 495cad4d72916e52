//! Sphere-in-a-box rigid body simulation.
//!
//! Spheres fall under gravity inside an axis-aligned box, bounce off the walls
//! and each other, and can be stirred by a pointer-driven force field (push,
//! tornado or layered vortex). The caller owns a [`Simulation`] and advances it
//! once per tick with [`Simulation::step`]; rendering and input projection stay
//! outside the crate.

pub mod core;
pub mod engine;

pub use engine::game_loop::FixedStepper;
pub use engine::input::{PointerState, PointerTracker};
pub use engine::physics::{
    Body, BodyBuilder, BodyId, BodyInstance, BoxBounds, BoxPreset, InteractionMode, PhysicsError,
    SimulationConfig, Simulation, StepStats,
};
