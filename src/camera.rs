use glam::{Mat4, Vec3};

/// A perspective camera on the +Z axis looking at the cube center.
///
/// The cube's own orientation is handled by [`Orientation`](crate::Orientation); the
/// camera only moves in and out.
///
/// # Example
/// ```
/// use cubeturn::Camera;
///
/// let mut camera = Camera::new().distance_limits(4.0, 40.0);
/// camera.zoom(2.0);
/// assert_eq!(camera.distance, 9.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Distance from the cube center.
    pub distance: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Distance change per scroll line.
    pub zoom_sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance: 10.0,
            fov: 45.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
            zoom_sensitivity: 0.5,
            min_distance: 4.0,
            max_distance: 40.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set scroll zoom sensitivity.
    pub fn zoom_sensitivity(mut self, sensitivity: f32) -> Self {
        self.zoom_sensitivity = sensitivity;
        self
    }

    /// Set distance limits, clamping the current distance into them.
    pub fn distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self.distance = self.distance.clamp(min, max);
        self
    }

    /// Move closer for positive `scroll_lines`, further for negative.
    pub fn zoom(&mut self, scroll_lines: f32) {
        self.distance = (self.distance - scroll_lines * self.zoom_sensitivity)
            .clamp(self.min_distance, self.max_distance);
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}
