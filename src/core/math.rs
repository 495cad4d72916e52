// Math utilities and helper functions

use glam::DVec3;

/// Check if two f64 values are approximately equal
pub fn approx_equal(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Project a vector onto the XZ plane (drops the vertical component)
pub fn horizontal(v: DVec3) -> DVec3 {
    DVec3::new(v.x, 0.0, v.z)
}

/// Linear falloff from 1.0 at the center to 0.0 at `radius`, clamped to [0, 1]
pub fn linear_falloff(distance: f64, radius: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / radius).clamp(0.0, 1.0)
}

/// Volume of a sphere with the given radius
pub fn sphere_volume(radius: f64) -> f64 {
    4.0 / 3.0 * std::f64::consts::PI * radius.powi(3)
}
