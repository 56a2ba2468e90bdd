use std::f64::consts::FRAC_PI_2;

use foundation::math::{GeoPoint, Vec3, nearest_equivalent_angle};

use crate::GlobeConfig;

/// Globe orientation as Euler angles (radians).
///
/// A globe-local point `p` is seen at `Rx(pitch) * Ry(yaw) * p`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Orientation {
    pub pitch: f64,
    pub yaw: f64,
}

impl Orientation {
    pub fn new(pitch: f64, yaw: f64) -> Self {
        Self { pitch, yaw }
    }

    /// Globe-local to view-space.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        local.rotate_y(self.yaw).rotate_x(self.pitch)
    }
}

/// Orientation that turns `geo` toward the camera (+Z), chosen as the
/// equivalent closest to `current`.
pub fn orientation_facing(current: Orientation, geo: GeoPoint) -> Orientation {
    let pitch = geo.lat_deg.to_radians();
    let yaw = FRAC_PI_2 - geo.seam_longitude_rad();
    Orientation::new(
        nearest_equivalent_angle(pitch, current.pitch),
        nearest_equivalent_angle(yaw, current.yaw),
    )
}

/// Rotation of the one globe view. Mutated by pointer input and once per frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotationState {
    pub current: Orientation,
    pub target: Orientation,
    pub auto_rotate: bool,
    pub dragging: bool,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            current: Orientation::default(),
            target: Orientation::default(),
            auto_rotate: true,
            dragging: false,
        }
    }
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances one frame: constant spin while auto-rotating, otherwise
    /// exponential easing toward the target.
    pub fn tick(&mut self, config: &GlobeConfig) {
        if self.auto_rotate && !self.dragging {
            self.current.yaw += config.auto_rotate_speed;
        } else {
            self.current.pitch += (self.target.pitch - self.current.pitch) * config.easing;
            self.current.yaw += (self.target.yaw - self.current.yaw) * config.easing;
        }
    }

    /// Target back to the rest orientation and auto-rotation back on.
    pub fn reset(&mut self) {
        self.target = Orientation::default();
        self.auto_rotate = true;
    }

    /// Returns the new auto-rotation flag.
    pub fn toggle_auto_rotation(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    /// Eases toward `target`, stopping auto-rotation so the easing is visible.
    pub fn ease_to(&mut self, target: Orientation) {
        self.target = target;
        self.auto_rotate = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{Orientation, RotationState, orientation_facing};
    use crate::GlobeConfig;
    use foundation::math::{GeoPoint, sphere_point};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn auto_rotation_adds_fixed_yaw() {
        let config = GlobeConfig::default();
        let mut state = RotationState::new();
        state.current = Orientation::new(0.25, 1.0);
        state.tick(&config);
        assert_close(state.current.yaw, 1.005, 1e-12);
        assert_eq!(state.current.pitch, 0.25);
    }

    #[test]
    fn easing_covers_five_percent_per_frame() {
        let config = GlobeConfig::default();
        let mut state = RotationState::new();
        state.auto_rotate = false;
        state.target = Orientation::new(1.0, 1.0);
        state.tick(&config);
        assert_close(state.current.pitch, 0.05, 1e-12);
        assert_close(state.current.yaw, 0.05, 1e-12);
    }

    #[test]
    fn dragging_suppresses_auto_rotation() {
        let config = GlobeConfig::default();
        let mut state = RotationState::new();
        state.dragging = true;
        state.target = Orientation::new(0.0, 2.0);
        state.tick(&config);
        assert_close(state.current.yaw, 0.1, 1e-12);
    }

    #[test]
    fn easing_never_overshoots() {
        let config = GlobeConfig::default();
        let mut state = RotationState::new();
        state.auto_rotate = false;
        state.target = Orientation::new(-0.8, 3.0);
        for _ in 0..500 {
            state.tick(&config);
            assert!(state.current.yaw <= 3.0);
            assert!(state.current.pitch >= -0.8);
        }
        assert_close(state.current.yaw, 3.0, 1e-6);
    }

    #[test]
    fn reset_and_toggle() {
        let mut state = RotationState::new();
        state.ease_to(Orientation::new(0.4, 0.4));
        assert!(!state.auto_rotate);

        assert!(state.toggle_auto_rotation());
        assert!(!state.toggle_auto_rotation());

        state.reset();
        assert_eq!(state.target, Orientation::default());
        assert!(state.auto_rotate);
    }

    #[test]
    fn facing_orientation_brings_country_to_camera() {
        for (lat, lon) in [(46.2276, 2.2137), (35.68, 139.69), (-33.45, -70.66), (0.0, 180.0)] {
            let geo = GeoPoint::new(lat, lon);
            let o = orientation_facing(Orientation::default(), geo);
            let seen = o.apply(sphere_point(geo, 2.05));
            assert_close(seen.x, 0.0, 1e-9);
            assert_close(seen.y, 0.0, 1e-9);
            assert_close(seen.z, 2.05, 1e-9);
        }
    }

    #[test]
    fn facing_orientation_stays_near_current_yaw() {
        let geo = GeoPoint::new(10.0, 20.0);
        let current = Orientation::new(0.0, 40.0);
        let o = orientation_facing(current, geo);
        assert!((o.yaw - current.yaw).abs() <= std::f64::consts::PI);

        let seen = o.apply(sphere_point(geo, 1.0));
        assert_close(seen.z, 1.0, 1e-9);
    }
}
