use super::PhysicsError;

/// Axis-aligned confinement volume
///
/// X and Z are symmetric around the origin; Y has independent floor and
/// ceiling heights so taller or shallower boxes can share the same floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxBounds {
    /// Half extent along X (walls at `-half_x` and `+half_x`)
    pub half_x: f64,
    /// Floor height
    pub y_bottom: f64,
    /// Ceiling height
    pub y_top: f64,
    /// Half extent along Z (walls at `-half_z` and `+half_z`)
    pub half_z: f64,
}

/// Named box configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxPreset {
    /// The 4 x 2 x 4 box of the default scene
    Standard,
    /// Narrow column, good for stacking and tornado demos
    Tall,
    /// Wide shallow tray
    Pool,
}

impl BoxPreset {
    pub fn bounds(self) -> BoxBounds {
        match self {
            BoxPreset::Standard => BoxBounds::new(2.0, -1.0, 1.0, 2.0),
            BoxPreset::Tall => BoxBounds::new(1.0, -1.0, 3.0, 1.0),
            BoxPreset::Pool => BoxBounds::new(3.0, -1.0, 0.0, 3.0),
        }
    }
}

impl BoxBounds {
    pub const fn new(half_x: f64, y_bottom: f64, y_top: f64, half_z: f64) -> Self {
        Self {
            half_x,
            y_bottom,
            y_top,
            half_z,
        }
    }

    /// Symmetric box centered on the origin
    pub const fn symmetric(half_x: f64, half_y: f64, half_z: f64) -> Self {
        Self::new(half_x, -half_y, half_y, half_z)
    }

    /// Lower and upper wall coordinates along X
    pub fn x_range(&self) -> (f64, f64) {
        (-self.half_x, self.half_x)
    }

    /// Floor and ceiling heights
    pub fn y_range(&self) -> (f64, f64) {
        (self.y_bottom, self.y_top)
    }

    /// Lower and upper wall coordinates along Z
    pub fn z_range(&self) -> (f64, f64) {
        (-self.half_z, self.half_z)
    }

    pub fn height(&self) -> f64 {
        self.y_top - self.y_bottom
    }

    /// Check the extents describe a non-empty box
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let values = [self.half_x, self.y_bottom, self.y_top, self.half_z];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PhysicsError::InvalidBounds(format!(
                "non-finite extent in {:?}",
                self
            )));
        }
        if self.half_x <= 0.0 || self.half_z <= 0.0 {
            return Err(PhysicsError::InvalidBounds(format!(
                "half extents must be positive (x = {}, z = {})",
                self.half_x, self.half_z
            )));
        }
        if self.y_top <= self.y_bottom {
            return Err(PhysicsError::InvalidBounds(format!(
                "ceiling {} is not above floor {}",
                self.y_top, self.y_bottom
            )));
        }
        Ok(())
    }
}

impl Default for BoxBounds {
    fn default() -> Self {
        BoxPreset::Standard.bounds()
    }
}

impl From<BoxPreset> for BoxBounds {
    fn from(preset: BoxPreset) -> Self {
        preset.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in [BoxPreset::Standard, BoxPreset::Tall, BoxPreset::Pool] {
            assert!(preset.bounds().validate().is_ok(), "{:?}", preset);
            assert_eq!(preset.bounds().y_bottom, -1.0, "presets share a floor");
        }
    }

    #[test]
    fn test_symmetric() {
        let bounds = BoxBounds::symmetric(2.0, 1.0, 3.0);
        assert_eq!(bounds.x_range(), (-2.0, 2.0));
        assert_eq!(bounds.y_range(), (-1.0, 1.0));
        assert_eq!(bounds.z_range(), (-3.0, 3.0));
        assert_eq!(bounds.height(), 2.0);
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(BoxBounds::new(0.0, -1.0, 1.0, 1.0).validate().is_err());
        assert!(BoxBounds::new(1.0, 1.0, 1.0, 1.0).validate().is_err());
        assert!(BoxBounds::new(1.0, -1.0, f64::NAN, 1.0).validate().is_err());
    }

    #[test]
    fn test_default_is_standard() {
        assert_eq!(BoxBounds::default(), BoxBounds::from(BoxPreset::Standard));
    }
}
