//! Orbit camera and pointer unprojection.

use glam::{Mat4, Vec2, Vec3};

/// Vertical field of view in degrees.
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Orbit camera looking at a target point.
///
/// With zero yaw and pitch the camera sits on +Z looking down -Z, which is
/// the axis ribbons extrude along.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 3.0,
            target: Vec3::ZERO,
        }
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Rotate by a pointer drag of `delta` pixels.
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * 0.005;
        self.pitch = (self.pitch + delta.y * 0.005).clamp(-1.5, 1.5);
    }

    /// Move closer (positive) or farther (negative).
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * 0.3).clamp(0.5, 20.0);
    }

    /// Cast a ray through `ndc` and intersect it with the plane `z = depth`.
    ///
    /// Returns `None` when the ray runs parallel to the plane.
    pub fn project_to_depth(&self, ndc: Vec2, aspect: f32, depth: f32) -> Option<Vec3> {
        let inverse = self.view_proj(aspect).inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        let dir = (far - near).normalize_or_zero();

        if dir.z.abs() < 1e-4 {
            return None;
        }
        let t = (depth - near.z) / dir.z;
        Some(near + dir * t)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_position_on_z() {
        let camera = Camera::new();
        assert!((camera.position() - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_center_projects_to_target_axis() {
        let camera = Camera::new();
        let p = camera.project_to_depth(Vec2::ZERO, 16.0 / 9.0, -1.0).unwrap();
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-3);
    }

    #[test]
    fn test_pointer_right_projects_right() {
        let camera = Camera::new();
        let p = camera.project_to_depth(Vec2::new(0.5, 0.5), 1.0, 0.0).unwrap();
        assert!(p.x > 0.0 && p.y > 0.0);
        assert!(p.z.abs() < 1e-3);

        // Farther planes spread the same pointer wider
        let q = camera.project_to_depth(Vec2::new(0.5, 0.5), 1.0, -3.0).unwrap();
        assert!(q.x > p.x);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let mut camera = Camera::new();
        camera.yaw = std::f32::consts::FRAC_PI_2;
        assert!(camera.project_to_depth(Vec2::ZERO, 1.0, 0.0).is_none());
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = Camera::new();
        camera.zoom(1000.0);
        assert_eq!(camera.distance, 0.5);
        camera.zoom(-1000.0);
        assert_eq!(camera.distance, 20.0);
    }
}
