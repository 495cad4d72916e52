// Per-body record handed to the renderer

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::body::Body;

/// Sphere transform for instanced drawing
///
/// Laid out for direct upload into a GPU instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Center in world space
    pub position: [f32; 3],
    /// Uniform scale of the unit sphere mesh
    pub radius: f32,
}

impl BodyInstance {
    /// Create a new instance
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position: position.to_array(),
            radius,
        }
    }
}

impl From<&Body> for BodyInstance {
    fn from(body: &Body) -> Self {
        Self::new(body.position().as_vec3(), body.radius() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_instance_from_body() {
        let body = Body::new(DVec3::new(1.0, -0.5, 0.25), 0.1, 3.0).unwrap();
        let instance = BodyInstance::from(&body);
        assert_eq!(instance.position, [1.0, -0.5, 0.25]);
        assert_eq!(instance.radius, 0.1);
    }

    #[test]
    fn test_instance_bytes() {
        let instances = [BodyInstance::new(Vec3::new(1.0, 2.0, 3.0), 0.5); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 2 * 16);
    }
}
