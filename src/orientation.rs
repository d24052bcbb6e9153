use glam::Mat4;

/// Global orientation of the whole cube, driven by mouse drags.
///
/// Stores two unclamped angles in degrees: rotation about world X and rotation about
/// world Y. The rotation matrix is always derived from them on demand.
///
/// # Example
/// ```
/// use cubeturn::Orientation;
///
/// let mut orientation = Orientation::new();
/// orientation.rotate(0.0, -90.0);
/// assert_eq!(orientation.angle_y, -45.0);
/// let rotation = orientation.rotation_matrix();
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    /// Rotation about world X, in degrees.
    pub angle_x: f32,
    /// Rotation about world Y, in degrees.
    pub angle_y: f32,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            angle_x: 45.0,
            angle_y: 45.0,
        }
    }
}

impl Orientation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both angles, in degrees.
    pub fn angles(mut self, angle_x: f32, angle_y: f32) -> Self {
        self.angle_x = angle_x;
        self.angle_y = angle_y;
        self
    }

    /// Accumulate angle deltas, in degrees.
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.angle_x += delta_x;
        self.angle_y += delta_y;
    }

    /// `Rx(angle_x) * Ry(angle_y)`.
    ///
    /// The order is fixed: the axis mapper reads local axes from the columns of this
    /// matrix, and the renderer draws the cube under the same matrix.
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.angle_x.to_radians())
            * Mat4::from_rotation_y(self.angle_y.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn zero_angles_give_identity() {
        let orientation = Orientation::new().angles(0.0, 0.0);
        assert!(orientation
            .rotation_matrix()
            .abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn rotate_accumulates_without_clamping() {
        let mut orientation = Orientation::new();
        orientation.rotate(400.0, -30.0);
        orientation.rotate(10.0, -30.0);
        assert_eq!(orientation.angle_x, 455.0);
        assert_eq!(orientation.angle_y, -15.0);
    }

    #[test]
    fn x_rotation_applies_after_y() {
        let rotation = Orientation::new().angles(90.0, 90.0).rotation_matrix();
        // Ry(90) sends +X to -Z, then Rx(90) sends -Z to +Y.
        let local_x = rotation.col(0).truncate();
        assert!(local_x.abs_diff_eq(Vec3::Y, 1e-6));
    }
}
