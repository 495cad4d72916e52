use glam::DVec3;

use super::config::DEFAULT_DENSITY;
use super::PhysicsError;
use crate::core::math::sphere_volume;

/// Index of a body inside a simulation's body collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl BodyId {
    /// Position of the body in insertion order
    pub fn index(self) -> usize {
        self.0
    }
}

/// A simulated sphere: non-rotating point mass with a radius
///
/// Forces accumulate until [`Body::integrate`] turns them into a velocity
/// change and clears the accumulator. Impulses change velocity immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: DVec3,
    velocity: DVec3,
    accumulated_force: DVec3,
    radius: f64,
    mass: f64,
    inverse_mass: f64,
}

impl Body {
    /// Create a dynamic body whose mass is derived from `density` and volume
    pub fn new(position: DVec3, radius: f64, density: f64) -> Result<Self, PhysicsError> {
        validate_radius(radius)?;
        if !density.is_finite() || density <= 0.0 {
            return Err(PhysicsError::InvalidDensity(density));
        }

        let mass = density * sphere_volume(radius);
        Ok(Self {
            position,
            velocity: DVec3::ZERO,
            accumulated_force: DVec3::ZERO,
            radius,
            mass,
            inverse_mass: 1.0 / mass,
        })
    }

    /// Create an immovable body (infinite mass, zero inverse mass)
    pub fn fixed(position: DVec3, radius: f64) -> Result<Self, PhysicsError> {
        validate_radius(radius)?;
        Ok(Self {
            position,
            velocity: DVec3::ZERO,
            accumulated_force: DVec3::ZERO,
            radius,
            mass: f64::INFINITY,
            inverse_mass: 0.0,
        })
    }

    /// Accumulate a continuous force, realized at the next integration
    pub fn apply_force(&mut self, force: DVec3) {
        self.accumulated_force += force;
    }

    /// Change velocity instantly by `impulse / mass`
    pub fn apply_impulse(&mut self, impulse: DVec3) {
        self.velocity += impulse * self.inverse_mass;
    }

    /// Accumulate the force that produces a vertical acceleration of `g`
    pub fn apply_gravity(&mut self, g: f64) {
        if self.is_static() {
            return;
        }
        self.accumulated_force.y += g * self.mass;
    }

    /// Semi-implicit Euler: velocity first, then position from the new velocity
    ///
    /// Static bodies stay where they are, whatever velocity they were given.
    pub fn integrate(&mut self, dt: f64) {
        if self.is_static() {
            self.accumulated_force = DVec3::ZERO;
            return;
        }
        self.velocity += self.accumulated_force * self.inverse_mass * dt;
        self.position += self.velocity * dt;
        self.accumulated_force = DVec3::ZERO;
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: DVec3) {
        self.velocity = velocity;
    }

    /// Force accumulated since the last integration
    pub fn accumulated_force(&self) -> DVec3 {
        self.accumulated_force
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Mass in simulation units (infinite for static bodies)
    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    /// Whether the body is immovable
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Kinetic energy (zero for static bodies)
    pub fn kinetic_energy(&self) -> f64 {
        if self.is_static() {
            return 0.0;
        }
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Linear momentum (zero for static bodies)
    pub fn momentum(&self) -> DVec3 {
        if self.is_static() {
            return DVec3::ZERO;
        }
        self.velocity * self.mass
    }
}

fn validate_radius(radius: f64) -> Result<(), PhysicsError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(PhysicsError::InvalidRadius(radius));
    }
    Ok(())
}

/// Builder for creating bodies with common configurations
#[derive(Debug, Clone)]
pub struct BodyBuilder {
    position: DVec3,
    velocity: DVec3,
    radius: f64,
    density: f64,
    fixed: bool,
}

impl BodyBuilder {
    /// Create a new dynamic sphere builder
    pub fn new(radius: f64) -> Self {
        Self {
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            radius,
            density: DEFAULT_DENSITY,
            fixed: false,
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = DVec3::new(x, y, z);
        self
    }

    /// Set the initial linear velocity
    pub fn velocity(mut self, x: f64, y: f64, z: f64) -> Self {
        self.velocity = DVec3::new(x, y, z);
        self
    }

    /// Set density (mass is calculated from the sphere volume)
    pub fn density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Make the body immovable
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Build the body
    pub fn build(self) -> Result<Body, PhysicsError> {
        let mut body = if self.fixed {
            Body::fixed(self.position, self.radius)?
        } else {
            Body::new(self.position, self.radius, self.density)?
        };

        // Static bodies never move, so an initial velocity is meaningless
        if !self.fixed {
            body.velocity = self.velocity;
        }
        Ok(body)
    }
}

/// Common sphere configurations
pub mod presets {
    use super::*;

    /// Radius of the marbles in the default scene
    pub const MARBLE_RADIUS: f64 = 0.1;

    /// Create a default marble at a position
    pub fn marble(x: f64, y: f64, z: f64) -> Result<Body, PhysicsError> {
        BodyBuilder::new(MARBLE_RADIUS).position(x, y, z).build()
    }

    /// Create a heavy ball (ten times the default density)
    pub fn heavy_ball(x: f64, y: f64, z: f64, radius: f64) -> Result<Body, PhysicsError> {
        BodyBuilder::new(radius)
            .position(x, y, z)
            .density(DEFAULT_DENSITY * 10.0)
            .build()
    }

    /// Create an immovable post that other bodies bounce off
    pub fn post(x: f64, y: f64, z: f64, radius: f64) -> Result<Body, PhysicsError> {
        BodyBuilder::new(radius).position(x, y, z).fixed().build()
    }
}
