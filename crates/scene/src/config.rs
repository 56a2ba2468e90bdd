use serde::Deserialize;

/// Tunables for the globe view. Every field has a default, so a partial JSON
/// object (or `{}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Radius of the globe mesh.
    pub globe_radius: f64,
    /// Radius at which markers are placed (slightly above the surface).
    pub marker_radius: f64,
    /// Radius of a marker's hit sphere at scale 1.
    pub marker_size: f64,
    /// Scale applied to a hovered marker.
    pub hover_scale: f64,
    /// Radians of target rotation per pixel dragged.
    pub drag_sensitivity: f64,
    /// Radians of yaw added per frame while auto-rotating.
    pub auto_rotate_speed: f64,
    /// Fraction of the remaining distance to target covered per frame.
    pub easing: f64,
    pub camera_distance: f64,
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            globe_radius: 2.0,
            marker_radius: 2.05,
            marker_size: 0.05,
            hover_scale: 1.5,
            drag_sensitivity: 0.01,
            auto_rotate_speed: 0.005,
            easing: 0.05,
            camera_distance: 5.0,
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl GlobeConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::GlobeConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default() {
        let config = GlobeConfig::from_json("{}").expect("config");
        assert_eq!(config, GlobeConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = GlobeConfig::from_json(r#"{"easing": 0.1, "fov_y_deg": 60}"#).expect("config");
        assert_eq!(config.easing, 0.1);
        assert_eq!(config.fov_y_deg, 60.0);
        assert_eq!(config.auto_rotate_speed, 0.005);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(GlobeConfig::from_json(r#"{"easing": "fast"}"#).is_err());
    }
}
