// External forces: gravity, floor friction and pointer-driven fields

use glam::DVec3;

use super::body::Body;
use super::bounds::BoxBounds;
use super::config::{PushConfig, SimulationConfig, TornadoConfig, VortexConfig};
use crate::core::math::{horizontal, linear_falloff};
use crate::engine::input::PointerState;

/// Pointer distance under which the push has no usable radial direction
const MIN_RADIAL_DISTANCE: f64 = 0.01;

/// Which pointer-driven field is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionMode {
    /// Pointer does nothing
    #[default]
    None,
    /// Pointer shoves bodies it touches along its own motion
    Push,
    /// Single funnel that pulls, spins and lifts bodies near the pointer
    Tornado,
    /// Stacked bands that pull and spin, wider the higher they sit
    Vortex,
}

impl InteractionMode {
    /// Cycle to the next mode (None -> Push -> Tornado -> Vortex -> None)
    pub fn next(self) -> Self {
        match self {
            InteractionMode::None => InteractionMode::Push,
            InteractionMode::Push => InteractionMode::Tornado,
            InteractionMode::Tornado => InteractionMode::Vortex,
            InteractionMode::Vortex => InteractionMode::None,
        }
    }
}

/// Accumulate gravity on every body
pub fn apply_gravity(bodies: &mut [Body], g: f64) {
    for body in bodies {
        body.apply_gravity(g);
    }
}

/// Damp horizontal motion of bodies touching the floor
///
/// Returns the number of bodies in floor contact.
pub fn apply_floor_friction(
    bodies: &mut [Body],
    bounds: &BoxBounds,
    config: &SimulationConfig,
) -> usize {
    let mut grounded = 0;
    for body in bodies {
        let gap = body.position().y - (bounds.y_bottom + body.radius());
        if gap <= config.floor_contact_threshold {
            body.apply_force(-config.friction_damping * horizontal(body.velocity()));
            grounded += 1;
        }
    }
    grounded
}

/// Apply the active pointer field
///
/// Nothing happens unless the pointer moved this frame. Returns the number of
/// bodies the field touched.
pub fn apply_interaction(
    bodies: &mut [Body],
    mode: InteractionMode,
    pointer: &PointerState,
    bounds: &BoxBounds,
    config: &SimulationConfig,
) -> usize {
    if !pointer.has_moved {
        return 0;
    }

    match mode {
        InteractionMode::None => 0,
        InteractionMode::Push => push(bodies, pointer, &config.push),
        InteractionMode::Tornado => tornado(bodies, pointer, &config.tornado),
        InteractionMode::Vortex => vortex(bodies, pointer, bounds, &config.vortex),
    }
}

fn push(bodies: &mut [Body], pointer: &PointerState, push: &PushConfig) -> usize {
    let center = DVec3::new(
        pointer.world_x,
        pointer.world_y.unwrap_or(push.reference_y),
        pointer.world_z,
    );
    let lift = push.lift_factor * pointer.horizontal_speed();
    let drag = DVec3::new(pointer.vel_x, lift, pointer.vel_z) * push.impulse_multiplier;

    let mut touched = 0;
    for body in bodies {
        let offset = body.position() - center;
        let reach = push.radius + body.radius();
        if offset.length_squared() >= reach * reach {
            continue;
        }

        // Horizontal kick scaled by the full distance, so it fades with height difference
        let mut impulse = drag;
        let distance = offset.length();
        if distance > MIN_RADIAL_DISTANCE {
            impulse += horizontal(offset) / distance * push.radial_strength;
        }

        body.apply_impulse(impulse);
        touched += 1;
    }
    touched
}

/// Unit vector from the body toward the pointer axis and the horizontal distance
fn inward_direction(body: &Body, pointer: &PointerState) -> (DVec3, f64) {
    let offset = DVec3::new(
        body.position().x - pointer.world_x,
        0.0,
        body.position().z - pointer.world_z,
    );
    let distance = offset.length();
    if distance > 0.0 {
        (-offset / distance, distance)
    } else {
        (DVec3::ZERO, 0.0)
    }
}

fn tornado(bodies: &mut [Body], pointer: &PointerState, tornado: &TornadoConfig) -> usize {
    let mut touched = 0;
    for body in bodies {
        let (inward, distance) = inward_direction(body, pointer);
        if distance >= tornado.radius {
            continue;
        }

        let falloff = linear_falloff(distance, tornado.radius);
        // Zero on the axis itself, where only lift applies
        let tangent = DVec3::Y.cross(inward);

        let pull = inward * tornado.pull_strength;
        let spin = tangent * tornado.rotation_strength;
        let lift = DVec3::new(0.0, tornado.lift_strength, 0.0);
        body.apply_force((pull + spin + lift) * falloff);
        touched += 1;
    }
    touched
}

/// Band containing a height, if any
fn vortex_band(y: f64, bounds: &BoxBounds, vortex: &VortexConfig) -> Option<usize> {
    let height = y - bounds.y_bottom;
    if height < 0.0 {
        return None;
    }
    let band = (height / vortex.band_height).floor() as usize;
    (band < vortex.band_count).then_some(band)
}

fn vortex(
    bodies: &mut [Body],
    pointer: &PointerState,
    bounds: &BoxBounds,
    vortex: &VortexConfig,
) -> usize {
    let mut touched = 0;
    for body in bodies {
        let Some(band) = vortex_band(body.position().y, bounds, vortex) else {
            continue;
        };

        let (inward, distance) = inward_direction(body, pointer);
        if distance == 0.0 || distance > vortex.band_radius(band) {
            continue;
        }

        let tangent = DVec3::Y.cross(inward);
        let force = inward * vortex.band_pull(band) + tangent * vortex.band_rotation(band);
        body.apply_force(force);
        touched += 1;
    }
    touched
}
