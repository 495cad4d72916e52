use glam::DVec3;
use log::{debug, trace};

use super::body::{Body, BodyId};
use super::bounds::{BoxBounds, BoxPreset};
use super::collision::{resolve_boundaries, resolve_pairs};
use super::config::SimulationConfig;
use super::forces::{apply_floor_friction, apply_gravity, apply_interaction, InteractionMode};
use super::instance::BodyInstance;
use super::PhysicsError;
use crate::engine::input::PointerState;

/// Counters gathered during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Overlapping body pairs resolved
    pub pair_contacts: usize,
    /// Wall contacts resolved (a body in a corner counts once per wall)
    pub wall_contacts: usize,
    /// Bodies resting on the floor while friction is enabled
    pub grounded: usize,
    /// Bodies touched by the pointer field
    pub interacted: usize,
}

/// Simulation context: bodies, box, pointer and tuning
///
/// The caller owns it and drives it with [`Simulation::step`]; nothing here is
/// global, so several independent simulations can coexist.
pub struct Simulation {
    /// Bodies in insertion order
    bodies: Vec<Body>,

    /// Confinement box, read fresh every step
    bounds: BoxBounds,

    /// Global constants and force field tuning
    config: SimulationConfig,

    /// Active pointer field
    mode: InteractionMode,

    /// Latest pointer snapshot from the input layer
    pointer: PointerState,

    /// Non-empty steps taken so far
    steps: u64,
}

impl Simulation {
    /// Create an empty simulation
    pub fn new(config: SimulationConfig, bounds: BoxBounds) -> Result<Self, PhysicsError> {
        config.validate()?;
        bounds.validate()?;
        Ok(Self::empty(config, bounds))
    }

    /// Create an empty simulation with the default config in the standard box
    pub fn with_defaults() -> Self {
        Self::empty(SimulationConfig::default(), BoxBounds::default())
    }

    fn empty(config: SimulationConfig, bounds: BoxBounds) -> Self {
        Self {
            bodies: Vec::new(),
            bounds,
            config,
            mode: InteractionMode::None,
            pointer: PointerState::default(),
            steps: 0,
        }
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Phases run in a fixed order: gravity, floor friction, body-body
    /// collisions, pointer field, wall collisions, integration. The pointer
    /// field sees post-collision state and walls are resolved after bodies
    /// push each other apart, so nothing is left outside the box.
    pub fn step(&mut self, dt: f64) -> StepStats {
        if self.bodies.is_empty() {
            return StepStats::default();
        }

        let mut stats = StepStats::default();
        let config = &self.config;

        apply_gravity(&mut self.bodies, config.gravity);

        if config.floor_friction {
            stats.grounded = apply_floor_friction(&mut self.bodies, &self.bounds, config);
        }

        stats.pair_contacts =
            resolve_pairs(&mut self.bodies, config.restitution, config.contact_epsilon);

        stats.interacted = apply_interaction(
            &mut self.bodies,
            self.mode,
            &self.pointer,
            &self.bounds,
            config,
        );

        stats.wall_contacts = resolve_boundaries(&mut self.bodies, &self.bounds, config.restitution);

        for body in &mut self.bodies {
            body.integrate(dt);
        }

        self.steps += 1;
        trace!(
            "step {}: dt={:.5} pairs={} walls={} grounded={} interacted={}",
            self.steps,
            dt,
            stats.pair_contacts,
            stats.wall_contacts,
            stats.grounded,
            stats.interacted
        );

        stats
    }

    /// Spawn a body with the configured density
    pub fn spawn(&mut self, position: DVec3, radius: f64) -> Result<BodyId, PhysicsError> {
        let body = Body::new(position, radius, self.config.density)?;
        Ok(self.add_body(body))
    }

    /// Add a pre-built body
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        id
    }

    /// Remove every body (between sessions, never mid-step)
    pub fn clear_bodies(&mut self) {
        debug!("Clearing {} bodies", self.bodies.len());
        self.bodies.clear();
    }

    /// Get a reference to a body
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    /// Get a mutable reference to a body
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.index())
    }

    /// Get a body, failing for unknown ids
    pub fn try_body(&self, id: BodyId) -> Result<&Body, PhysicsError> {
        self.body(id).ok_or(PhysicsError::UnknownBody(id.index()))
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Set the active pointer field
    pub fn set_interaction_mode(&mut self, mode: InteractionMode) {
        if mode != self.mode {
            debug!("Interaction mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.mode
    }

    /// Replace the confinement box
    pub fn set_bounds(&mut self, bounds: BoxBounds) -> Result<(), PhysicsError> {
        bounds.validate()?;
        debug!("Box bounds set to {:?}", bounds);
        self.bounds = bounds;
        Ok(())
    }

    /// Switch to a named box configuration
    pub fn set_bounds_preset(&mut self, preset: BoxPreset) {
        debug!("Box preset {:?}", preset);
        self.bounds = preset.bounds();
    }

    pub fn bounds(&self) -> BoxBounds {
        self.bounds
    }

    /// Replace the tuning constants
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<(), PhysicsError> {
        config.validate()?;
        debug!("Simulation config replaced");
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Store the pointer snapshot used by the next step
    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Number of non-empty steps taken
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Render records for every body, in body order
    pub fn instances(&self) -> Vec<BodyInstance> {
        self.bodies.iter().map(BodyInstance::from).collect()
    }

    /// Refill a caller-owned buffer with render records
    pub fn write_instances(&self, out: &mut Vec<BodyInstance>) {
        out.clear();
        out.extend(self.bodies.iter().map(BodyInstance::from));
    }

    /// Sum of kinetic energy over all bodies
    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Sum of linear momentum over all bodies
    pub fn total_momentum(&self) -> DVec3 {
        self.bodies.iter().map(Body::momentum).sum()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::with_defaults()
    }
}
