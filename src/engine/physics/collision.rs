// Body-body and body-wall collision resolution
//
// Both passes run once per step with no iteration. Pairs are visited in index
// order and later pairs see the corrections made by earlier ones, so piles of
// three or more overlapping bodies only settle over several steps.

use super::body::Body;
use super::bounds::BoxBounds;

/// Separate overlapping pairs and exchange normal impulses
///
/// `epsilon` is compared against squared center distance; pairs closer than
/// that have no usable normal and are skipped. Returns the number of
/// overlapping pairs handled.
pub fn resolve_pairs(bodies: &mut [Body], restitution: f64, epsilon: f64) -> usize {
    let mut contacts = 0;
    let count = bodies.len();

    for i in 0..count {
        for j in (i + 1)..count {
            let (head, tail) = bodies.split_at_mut(j);
            if resolve_pair(&mut head[i], &mut tail[0], restitution, epsilon) {
                contacts += 1;
            }
        }
    }

    contacts
}

fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f64, epsilon: f64) -> bool {
    let delta = a.position() - b.position();
    let dist_sq = delta.length_squared();
    let reach = a.radius() + b.radius();
    if dist_sq >= reach * reach || dist_sq <= epsilon {
        return false;
    }

    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum == 0.0 {
        return false;
    }

    let dist = dist_sq.sqrt();
    let normal = delta / dist;

    // Push apart along the normal, heavier body moving less
    let correction = (reach - dist) / inv_sum;
    a.set_position(a.position() + normal * (correction * inv_a));
    b.set_position(b.position() - normal * (correction * inv_b));

    let vel_along_normal = (a.velocity() - b.velocity()).dot(normal);
    if vel_along_normal > 0.0 {
        // Already separating
        return true;
    }

    let impulse = -(1.0 + restitution) * vel_along_normal / inv_sum;
    a.set_velocity(a.velocity() + normal * (impulse * inv_a));
    b.set_velocity(b.velocity() - normal * (impulse * inv_b));
    true
}

/// Clamp bodies inside the box and reflect velocity off any wall they crossed
///
/// Returns the number of wall contacts (a body in a corner counts once per wall).
pub fn resolve_boundaries(bodies: &mut [Body], bounds: &BoxBounds, restitution: f64) -> usize {
    let (x_min, x_max) = bounds.x_range();
    let (y_min, y_max) = bounds.y_range();
    let (z_min, z_max) = bounds.z_range();

    let mut contacts = 0;
    for body in bodies.iter_mut().filter(|body| !body.is_static()) {
        let radius = body.radius();
        let mut position = body.position();
        let mut velocity = body.velocity();

        contacts += clamp_axis(&mut position.x, &mut velocity.x, x_min, x_max, radius, restitution);
        contacts += clamp_axis(&mut position.y, &mut velocity.y, y_min, y_max, radius, restitution);
        contacts += clamp_axis(&mut position.z, &mut velocity.z, z_min, z_max, radius, restitution);

        body.set_position(position);
        body.set_velocity(velocity);
    }
    contacts
}

fn clamp_axis(
    position: &mut f64,
    velocity: &mut f64,
    lower: f64,
    upper: f64,
    radius: f64,
    restitution: f64,
) -> usize {
    let mut contacts = 0;
    if *position < lower + radius {
        *position = lower + radius;
        *velocity *= -restitution;
        contacts += 1;
    }
    if *position > upper - radius {
        *position = upper - radius;
        *velocity *= -restitution;
        contacts += 1;
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec3;

    const EPSILON: f64 = 0.005;

    fn ball(x: f64, radius: f64, density: f64) -> Body {
        Body::new(DVec3::new(x, 0.0, 0.0), radius, density).unwrap()
    }

    #[test]
    fn test_no_contact_when_apart() {
        let mut bodies = vec![ball(0.0, 0.1, 3.0), ball(0.3, 0.1, 3.0)];
        let before = bodies.clone();
        assert_eq!(resolve_pairs(&mut bodies, 0.5, EPSILON), 0);
        assert_eq!(bodies, before);
    }

    #[test]
    fn test_touching_exactly_is_not_a_contact() {
        let mut bodies = vec![ball(0.0, 0.25, 3.0), ball(0.5, 0.25, 3.0)];
        assert_eq!(resolve_pairs(&mut bodies, 0.5, EPSILON), 0);
    }

    #[test]
    fn test_coincident_centers_skipped() {
        let mut bodies = vec![ball(0.0, 0.1, 3.0), ball(0.05, 0.1, 3.0)];
        let before = bodies.clone();
        // 0.05^2 = 0.0025 is inside the coincidence epsilon
        assert_eq!(resolve_pairs(&mut bodies, 0.5, EPSILON), 0);
        assert_eq!(bodies, before);
    }

    #[test]
    fn test_mass_proportional_separation() {
        // Same radius, density ratio 4:1, so mass ratio 4:1
        let mut bodies = vec![ball(0.0, 0.1, 12.0), ball(0.15, 0.1, 3.0)];
        let m1 = bodies[0].mass();
        let m2 = bodies[1].mass();
        assert_eq!(resolve_pairs(&mut bodies, 0.5, EPSILON), 1);

        let dx1 = bodies[0].position().x - 0.0;
        let dx2 = bodies[1].position().x - 0.15;
        assert!(dx1 < 0.0 && dx2 > 0.0);
        assert_relative_eq!(dx1 * m1, -dx2 * m2, epsilon = 1e-12);

        // Fully separated after one pass
        let gap = bodies[1].position().x - bodies[0].position().x;
        assert_relative_eq!(gap, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_separating_pair_not_reimpulsed() {
        let mut bodies = vec![ball(0.0, 0.1, 3.0), ball(0.15, 0.1, 3.0)];
        bodies[0].set_velocity(DVec3::new(-1.0, 0.0, 0.0));
        bodies[1].set_velocity(DVec3::new(1.0, 0.0, 0.0));

        assert_eq!(resolve_pairs(&mut bodies, 0.5, EPSILON), 1);
        assert_eq!(bodies[0].velocity(), DVec3::new(-1.0, 0.0, 0.0));
        assert_eq!(bodies[1].velocity(), DVec3::new(1.0, 0.0, 0.0));
        // Still pushed out of overlap
        assert!(bodies[0].position().x < 0.0);
        assert!(bodies[1].position().x > 0.15);
    }

    #[test]
    fn test_elastic_head_on_swaps_velocities() {
        let mut bodies = vec![ball(0.0, 0.1, 3.0), ball(0.18, 0.1, 3.0)];
        bodies[0].set_velocity(DVec3::new(2.0, 0.0, 0.5));
        bodies[1].set_velocity(DVec3::new(-1.0, 0.0, 0.0));
        let momentum_before = bodies[0].momentum() + bodies[1].momentum();

        resolve_pairs(&mut bodies, 1.0, EPSILON);

        // Normal is along X; the tangential Z component is untouched
        assert_relative_eq!(bodies[0].velocity().x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(bodies[1].velocity().x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(bodies[0].velocity().z, 0.5, epsilon = 1e-12);

        let momentum_after = bodies[0].momentum() + bodies[1].momentum();
        assert!(momentum_before.abs_diff_eq(momentum_after, 1e-12));
    }

    #[test]
    fn test_inelastic_collision_stops_relative_motion() {
        let mut bodies = vec![ball(0.0, 0.1, 3.0), ball(0.18, 0.1, 3.0)];
        bodies[0].set_velocity(DVec3::new(1.0, 0.0, 0.0));

        resolve_pairs(&mut bodies, 0.0, EPSILON);

        assert_relative_eq!(bodies[0].velocity().x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(bodies[1].velocity().x, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_static_body_absorbs_nothing() {
        let mut bodies = vec![
            Body::fixed(DVec3::ZERO, 0.1).unwrap(),
            ball(0.15, 0.1, 3.0),
        ];
        bodies[1].set_velocity(DVec3::new(-1.0, 0.0, 0.0));

        resolve_pairs(&mut bodies, 1.0, EPSILON);

        assert_eq!(bodies[0].position(), DVec3::ZERO);
        assert_eq!(bodies[0].velocity(), DVec3::ZERO);
        assert_relative_eq!(bodies[1].position().x, 0.2, epsilon = 1e-12);
        assert_relative_eq!(bodies[1].velocity().x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_two_static_bodies_left_alone() {
        let mut bodies = vec![
            Body::fixed(DVec3::ZERO, 0.1).unwrap(),
            Body::fixed(DVec3::new(0.1, 0.0, 0.0), 0.1).unwrap(),
        ];
        let before = bodies.clone();
        assert_eq!(resolve_pairs(&mut bodies, 0.5, EPSILON), 0);
        assert_eq!(bodies, before);
    }

    #[test]
    fn test_boundary_clamps_and_reflects() {
        let bounds = BoxBounds::symmetric(1.0, 1.0, 1.0);
        let mut bodies = vec![Body::new(DVec3::new(0.0, -1.05, 0.0), 0.1, 3.0).unwrap()];
        bodies[0].set_velocity(DVec3::new(0.0, -2.0, 0.0));

        assert_eq!(resolve_boundaries(&mut bodies, &bounds, 0.5), 1);
        assert_relative_eq!(bodies[0].position().y, -0.9, epsilon = 1e-12);
        assert_relative_eq!(bodies[0].velocity().y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_boundary_corner_clamps_every_axis() {
        let bounds = BoxBounds::symmetric(1.0, 1.0, 1.0);
        let mut bodies = vec![Body::new(DVec3::new(1.2, 1.2, -1.2), 0.1, 3.0).unwrap()];
        bodies[0].set_velocity(DVec3::new(1.0, 1.0, -1.0));

        assert_eq!(resolve_boundaries(&mut bodies, &bounds, 1.0), 3);
        let position = bodies[0].position();
        assert_relative_eq!(position.x, 0.9, epsilon = 1e-12);
        assert_relative_eq!(position.y, 0.9, epsilon = 1e-12);
        assert_relative_eq!(position.z, -0.9, epsilon = 1e-12);
        assert_eq!(bodies[0].velocity(), DVec3::new(-1.0, -1.0, 1.0));
    }

    #[test]
    fn test_boundary_idempotent_at_rest_position() {
        let bounds = BoxBounds::new(2.0, -1.0, 1.0, 2.0);
        let floor = bounds.y_bottom + 0.1;
        let mut bodies = vec![Body::new(DVec3::new(0.0, floor, 0.0), 0.1, 3.0).unwrap()];
        bodies[0].set_velocity(DVec3::new(0.0, 0.3, 0.0));
        let before = bodies.clone();

        assert_eq!(resolve_boundaries(&mut bodies, &bounds, 0.5), 0);
        assert_eq!(bodies, before);

        // Running it again changes nothing either
        resolve_boundaries(&mut bodies, &bounds, 0.5);
        assert_eq!(bodies, before);
    }
}
