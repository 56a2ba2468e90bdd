use catalog::CountryCatalog;
use foundation::math::{GeoPoint, Vec2};

use crate::camera::{PerspectiveCamera, Viewport};
use crate::interaction::{Cursor, PointerController, PointerEvent};
use crate::markers::{MarkerId, MarkerRegistry};
use crate::picking::{PickHit, PickOptions, pick_ray};
use crate::render::{OCEAN_COLOR, RenderCommand, RenderFrame, SceneRenderer};
use crate::rotation::{Orientation, RotationState, orientation_facing};
use crate::GlobeConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobeError {
    /// Markers need country data; load (or fall back) first.
    EmptyCatalog,
    /// The drawing surface could not be created.
    RenderInit(String),
    Config(String),
}

impl std::fmt::Display for GlobeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlobeError::EmptyCatalog => write!(f, "globe needs at least one country"),
            GlobeError::RenderInit(msg) => write!(f, "3D view unavailable: {msg}"),
            GlobeError::Config(msg) => write!(f, "invalid globe config: {msg}"),
        }
    }
}

impl std::error::Error for GlobeError {}

/// What the page should do after a pointer event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerResponse {
    /// Set after every hover test.
    pub cursor: Option<Cursor>,
    /// Country key of a clicked marker.
    pub selected: Option<String>,
}

/// The one interactive globe view: camera, markers, rotation and pointer
/// state, owned together and torn down together.
#[derive(Debug, Clone)]
pub struct Globe {
    config: GlobeConfig,
    camera: PerspectiveCamera,
    viewport: Viewport,
    markers: MarkerRegistry,
    rotation: RotationState,
    controller: PointerController,
    pick_options: PickOptions,
}

impl Globe {
    pub fn new(
        config: GlobeConfig,
        catalog: &CountryCatalog,
        viewport: Viewport,
    ) -> Result<Self, GlobeError> {
        if catalog.is_empty() {
            return Err(GlobeError::EmptyCatalog);
        }
        let markers = MarkerRegistry::from_catalog(catalog, config.marker_radius);
        tracing::info!(markers = markers.len(), "globe initialized");

        Ok(Self {
            camera: PerspectiveCamera::new(&config, viewport.aspect()),
            viewport,
            markers,
            rotation: RotationState::new(),
            controller: PointerController::new(),
            pick_options: PickOptions::default(),
            config,
        })
    }

    /// Replaces every marker after a data reload. Rotation is kept.
    pub fn rebuild_markers(&mut self, catalog: &CountryCatalog) -> Result<(), GlobeError> {
        if catalog.is_empty() {
            return Err(GlobeError::EmptyCatalog);
        }
        self.markers = MarkerRegistry::from_catalog(catalog, self.config.marker_radius);
        Ok(())
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    pub fn set_pick_options(&mut self, opts: PickOptions) {
        self.pick_options = opts;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
        self.camera.set_aspect(self.viewport.aspect());
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerResponse {
        match event {
            PointerEvent::Down(pos) => {
                self.controller.on_pointer_down(pos, &mut self.rotation);
                PointerResponse::default()
            }
            PointerEvent::Move(pos) => {
                self.controller.on_pointer_move(
                    pos,
                    &mut self.rotation,
                    self.config.drag_sensitivity,
                );
                let hit = self.pick_at(pos).map(|h| h.marker);
                self.markers.set_hovered(hit);
                PointerResponse {
                    cursor: Some(if hit.is_some() {
                        Cursor::Pointer
                    } else {
                        Cursor::Grab
                    }),
                    selected: None,
                }
            }
            PointerEvent::Up => {
                self.controller.on_pointer_up(&mut self.rotation);
                PointerResponse::default()
            }
            PointerEvent::Click(pos) => {
                let selected = self
                    .pick_at(pos)
                    .and_then(|hit| self.markers.get(hit.marker))
                    .map(|marker| marker.owner.clone());
                if let Some(key) = &selected {
                    tracing::debug!(country = %key, "marker selected");
                }
                PointerResponse {
                    cursor: None,
                    selected,
                }
            }
        }
    }

    /// Nearest marker under a pixel position, if any.
    pub fn pick_at(&self, pos_px: Vec2) -> Option<PickHit> {
        let ray = self.camera.ray_from_ndc(self.viewport.to_ndc(pos_px));
        pick_ray(
            &self.markers,
            self.rotation.current,
            &self.config,
            ray,
            self.pick_options,
        )
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.markers.hovered()
    }

    /// Advances the rotation by one frame.
    pub fn tick(&mut self) {
        self.rotation.tick(&self.config);
    }

    /// Draw list for the current orientation.
    pub fn render_frame(&self) -> RenderFrame {
        let orientation = self.rotation.current;
        let mut frame = RenderFrame::default();
        frame.commands.push(RenderCommand::Globe {
            radius: self.config.globe_radius,
            orientation,
            color: OCEAN_COLOR,
        });
        for marker in self.markers.all() {
            let style = marker.state.style(&self.config);
            frame.commands.push(RenderCommand::Marker {
                id: marker.id,
                center: orientation.apply(marker.position),
                radius: self.config.marker_size * style.scale,
                color: style.color,
            });
        }
        frame
    }

    /// One animation frame: update the rotation, then draw.
    pub fn frame(&mut self, renderer: &mut impl SceneRenderer) {
        self.tick();
        let frame = self.render_frame();
        renderer.render(&self.camera, &frame);
    }

    /// Back to the rest orientation with auto-rotation on.
    pub fn reset(&mut self) {
        self.controller.cancel(&mut self.rotation);
        self.rotation.reset();
        self.camera.reset(&self.config);
    }

    /// Returns the new auto-rotation flag.
    pub fn toggle_auto_rotation(&mut self) -> bool {
        self.rotation.toggle_auto_rotation()
    }

    /// Eases the globe until `geo` faces the camera.
    pub fn focus(&mut self, geo: GeoPoint) -> Orientation {
        let target = orientation_facing(self.rotation.current, geo);
        self.rotation.ease_to(target);
        target
    }
}

#[cfg(test)]
mod tests {
    use super::{Globe, GlobeError, PointerResponse};
    use crate::camera::Viewport;
    use crate::interaction::{Cursor, PointerEvent};
    use crate::render::{RecordingRenderer, RenderCommand};
    use crate::GlobeConfig;
    use catalog::{CountryCatalog, CountryRecord};
    use foundation::math::{GeoPoint, Vec2};

    fn record(key: &str, lat: f64, lon: f64) -> CountryRecord {
        CountryRecord {
            key: key.to_string(),
            display_name: key.to_string(),
            position: GeoPoint::new(lat, lon),
            description: String::new(),
            culture: String::new(),
            monuments: Vec::new(),
            population: String::new(),
            languages: String::new(),
        }
    }

    /// Globe with one country that faces the camera at the rest orientation
    /// (lat 0, lon -90 projects to +Z).
    fn facing_globe() -> Globe {
        let catalog = CountryCatalog::from_records([
            record("Ecuador", 0.0, -90.0),
            record("Kenya", 0.0, 37.0),
        ]);
        Globe::new(GlobeConfig::default(), &catalog, Viewport::new(800.0, 600.0)).expect("globe")
    }

    const CENTER: Vec2 = Vec2 { x: 400.0, y: 300.0 };
    const CORNER: Vec2 = Vec2 { x: 5.0, y: 5.0 };

    #[test]
    fn empty_catalog_is_rejected() {
        let err = Globe::new(
            GlobeConfig::default(),
            &CountryCatalog::new(),
            Viewport::new(1.0, 1.0),
        )
        .unwrap_err();
        assert_eq!(err, GlobeError::EmptyCatalog);
    }

    #[test]
    fn hover_sets_pointer_cursor_and_highlights_marker() {
        let mut globe = facing_globe();

        let response = globe.handle_pointer(PointerEvent::Move(CENTER));
        assert_eq!(response.cursor, Some(Cursor::Pointer));
        let hovered = globe.hovered().expect("hovered marker");
        assert_eq!(
            globe.markers().get(hovered).map(|m| m.owner.as_str()),
            Some("Ecuador")
        );

        let response = globe.handle_pointer(PointerEvent::Move(CORNER));
        assert_eq!(response.cursor, Some(Cursor::Grab));
        assert_eq!(globe.hovered(), None);
    }

    #[test]
    fn click_selects_nearest_marker_owner() {
        let mut globe = facing_globe();
        let response = globe.handle_pointer(PointerEvent::Click(CENTER));
        assert_eq!(response.selected.as_deref(), Some("Ecuador"));

        let response = globe.handle_pointer(PointerEvent::Click(CORNER));
        assert_eq!(response, PointerResponse::default());
    }

    #[test]
    fn drag_rotates_target_and_disables_auto_rotation() {
        let mut globe = facing_globe();
        globe.handle_pointer(PointerEvent::Down(Vec2::new(100.0, 100.0)));
        globe.handle_pointer(PointerEvent::Move(Vec2::new(150.0, 120.0)));
        globe.handle_pointer(PointerEvent::Up);

        assert!(!globe.is_dragging());
        assert!(!globe.rotation().auto_rotate);
        assert!((globe.rotation().target.yaw - 0.5).abs() < 1e-12);
        assert!((globe.rotation().target.pitch - 0.2).abs() < 1e-12);

        globe.tick();
        assert!((globe.rotation().current.yaw - 0.025).abs() < 1e-12);
    }

    #[test]
    fn focus_eases_country_toward_camera() {
        let mut globe = facing_globe();
        globe.focus(GeoPoint::new(0.0, 37.0));
        assert!(!globe.rotation().auto_rotate);
        for _ in 0..400 {
            globe.tick();
        }
        let response = globe.handle_pointer(PointerEvent::Click(CENTER));
        assert_eq!(response.selected.as_deref(), Some("Kenya"));
    }

    #[test]
    fn reset_restores_auto_rotation() {
        let mut globe = facing_globe();
        globe.handle_pointer(PointerEvent::Down(Vec2::new(1.0, 1.0)));
        globe.reset();
        assert!(globe.rotation().auto_rotate);
        assert!(!globe.is_dragging());
        assert!(!globe.toggle_auto_rotation());
    }

    #[test]
    fn frame_draws_globe_then_markers() {
        let mut globe = facing_globe();
        let mut renderer = RecordingRenderer::default();
        globe.frame(&mut renderer);

        assert_eq!(renderer.frames.len(), 1);
        let commands = &renderer.frames[0].commands;
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], RenderCommand::Globe { .. }));
        assert!((globe.rotation().current.yaw - 0.005).abs() < 1e-12);
    }

    #[test]
    fn rebuild_replaces_markers() {
        let mut globe = facing_globe();
        let catalog = CountryCatalog::from_records([record("Chile", -33.4, -70.6)]);
        globe.rebuild_markers(&catalog).expect("rebuild");
        assert_eq!(globe.markers().len(), 1);
        assert!(globe.markers().owners_resolve_in(&catalog));
        assert_eq!(
            globe.rebuild_markers(&CountryCatalog::new()),
            Err(GlobeError::EmptyCatalog)
        );
    }
}
