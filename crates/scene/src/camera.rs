use foundation::math::{Vec2, Vec3};

use crate::GlobeConfig;
use crate::picking::Ray;

/// Drawable area in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Pixel position (origin top-left, Y down) to normalized device
    /// coordinates (origin center, Y up, [-1, 1] on both axes).
    pub fn to_ndc(&self, pos_px: Vec2) -> Vec2 {
        Vec2::new(
            (pos_px.x / self.width) * 2.0 - 1.0,
            -((pos_px.y / self.height) * 2.0 - 1.0),
        )
    }

    /// Inverse of [`Viewport::to_ndc`].
    pub fn to_pixels(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

/// A point projected through the camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projected {
    pub ndc: Vec2,
    /// Distance along the view direction.
    pub depth: f64,
}

/// Perspective camera on the +Z axis looking at the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub fov_y_rad: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl PerspectiveCamera {
    pub fn new(config: &GlobeConfig, aspect: f64) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, config.camera_distance),
            fov_y_rad: config.fov_y_deg.to_radians(),
            aspect: aspect.max(1e-6),
            near: config.near,
            far: config.far,
        }
    }

    pub fn set_aspect(&mut self, aspect: f64) {
        self.aspect = aspect.max(1e-6);
    }

    /// Puts the camera back at its configured distance.
    pub fn reset(&mut self, config: &GlobeConfig) {
        self.position = Vec3::new(0.0, 0.0, config.camera_distance);
    }

    fn half_extents(&self) -> (f64, f64) {
        let half_h = (0.5 * self.fov_y_rad).tan();
        (half_h * self.aspect, half_h)
    }

    /// Ray from the camera through a point given in NDC.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let (half_w, half_h) = self.half_extents();
        let dir = Vec3::new(ndc.x * half_w, ndc.y * half_h, -1.0);
        // Non-zero z keeps this normalizable.
        Ray::new(self.position, dir.normalized().unwrap_or(Vec3::new(0.0, 0.0, -1.0)))
    }

    /// Projects a world-space point; `None` when it is not in front of the near plane.
    pub fn project(&self, world: Vec3) -> Option<Projected> {
        let v = world - self.position;
        let depth = -v.z;
        if depth <= self.near || depth >= self.far {
            return None;
        }
        let (half_w, half_h) = self.half_extents();
        Some(Projected {
            ndc: Vec2::new(v.x / (depth * half_w), v.y / (depth * half_h)),
            depth,
        })
    }

    /// On-screen size (in NDC height units) of a sphere of `radius` at `depth`.
    pub fn projected_radius(&self, radius: f64, depth: f64) -> f64 {
        let (_, half_h) = self.half_extents();
        radius / (depth * half_h)
    }
}

#[cfg(test)]
mod tests {
    use super::{PerspectiveCamera, Viewport};
    use crate::GlobeConfig;
    use foundation::math::{Vec2, Vec3};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn viewport_center_is_ndc_origin() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), Vec2::new(0.0, 0.0));
        assert_eq!(vp.to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_pixels(Vec2::new(-1.0, 1.0)), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn center_ray_points_at_origin() {
        let camera = PerspectiveCamera::new(&GlobeConfig::default(), 1.5);
        let ray = camera.ray_from_ndc(Vec2::new(0.0, 0.0));
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 5.0));
        assert_close(ray.dir.z, -1.0, 1e-12);
    }

    #[test]
    fn project_inverts_ray() {
        let camera = PerspectiveCamera::new(&GlobeConfig::default(), 4.0 / 3.0);
        let ndc = Vec2::new(0.3, -0.6);
        let ray = camera.ray_from_ndc(ndc);
        let point = ray.origin + ray.dir.scale(4.0);
        let projected = camera.project(point).expect("in front");
        assert_close(projected.ndc.x, ndc.x, 1e-9);
        assert_close(projected.ndc.y, ndc.y, 1e-9);
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let camera = PerspectiveCamera::new(&GlobeConfig::default(), 1.0);
        assert!(camera.project(Vec3::new(0.0, 0.0, 6.0)).is_none());
    }

    #[test]
    fn reset_restores_distance() {
        let config = GlobeConfig::default();
        let mut camera = PerspectiveCamera::new(&config, 1.0);
        camera.position = Vec3::new(1.0, 2.0, 9.0);
        camera.reset(&config);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
    }
}
