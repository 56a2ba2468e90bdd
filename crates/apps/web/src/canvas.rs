//! Canvas 2D backend for the globe scene.
//!
//! Projects the frame's view-space geometry through the camera and paints it
//! back to front: hidden markers, the globe disc with its graticule, then the
//! visible markers.

use foundation::math::{GeoPoint, Vec2, Vec3, sphere_point};
use scene::{
    LAND_COLOR, Orientation, PerspectiveCamera, RenderCommand, RenderFrame, SceneRenderer,
    Viewport, ray_sphere_hit_t,
};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

const GRATICULE_STEP_DEG: f64 = 30.0;
const GRATICULE_SAMPLES: usize = 48;
const OCCLUSION_EPS: f64 = 1e-6;

/// A flat shape in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Disc {
        center: Vec2,
        radius: f64,
        color: u32,
    },
    /// Visible runs of a graticule line.
    Polyline { points: Vec<Vec2>, color: u32 },
}

pub fn css_color(color: u32) -> String {
    format!("#{:06x}", color & 0xff_ffff)
}

/// Whether the globe sphere blocks the camera's line of sight to `point`.
///
/// Uses the real sight line, so points slightly in front of the globe's
/// center plane but past its silhouette still count as hidden.
pub fn occluded(camera: &PerspectiveCamera, globe_radius: f64, point: Vec3) -> bool {
    let to_point = point - camera.position;
    let dist = to_point.length();
    let Some(dir) = to_point.normalized() else {
        return false;
    };
    ray_sphere_hit_t(camera.position, dir, Vec3::ZERO, globe_radius, 0.0, dist)
        .is_some_and(|t| t + OCCLUSION_EPS < dist)
}

/// Turns a frame into pixel shapes in paint order.
pub fn plan_shapes(camera: &PerspectiveCamera, viewport: Viewport, frame: &RenderFrame) -> Vec<Shape> {
    let globe_radius = frame.commands.iter().find_map(|command| match command {
        RenderCommand::Globe { radius, .. } => Some(*radius),
        RenderCommand::Marker { .. } => None,
    });
    let hidden = |point: Vec3| globe_radius.is_some_and(|r| occluded(camera, r, point));

    let mut behind = Vec::new();
    let mut globe = Vec::new();
    let mut front = Vec::new();

    for command in &frame.commands {
        match command {
            RenderCommand::Globe {
                radius,
                orientation,
                color,
            } => {
                let Some(center) = camera.project(Vec3::ZERO) else {
                    continue;
                };
                globe.push(Shape::Disc {
                    center: viewport.to_pixels(center.ndc),
                    radius: camera.projected_radius(*radius, center.depth) * 0.5 * viewport.height,
                    color: *color,
                });
                globe.extend(graticule(camera, viewport, *radius, *orientation));
            }
            RenderCommand::Marker {
                center,
                radius,
                color,
                ..
            } => {
                let Some(p) = camera.project(*center) else {
                    continue;
                };
                let shape = Shape::Disc {
                    center: viewport.to_pixels(p.ndc),
                    radius: camera.projected_radius(*radius, p.depth) * 0.5 * viewport.height,
                    color: *color,
                };
                if hidden(*center) {
                    behind.push(shape);
                } else {
                    front.push(shape);
                }
            }
        }
    }

    behind.extend(globe);
    behind.extend(front);
    behind
}

fn graticule(
    camera: &PerspectiveCamera,
    viewport: Viewport,
    radius: f64,
    orientation: Orientation,
) -> Vec<Shape> {
    let mut lines: Vec<Vec<GeoPoint>> = Vec::new();
    let mut lon = -180.0;
    while lon < 180.0 {
        lines.push(
            (0..=GRATICULE_SAMPLES)
                .map(|i| GeoPoint::new(-90.0 + 180.0 * i as f64 / GRATICULE_SAMPLES as f64, lon))
                .collect(),
        );
        lon += GRATICULE_STEP_DEG;
    }
    let mut lat = -60.0;
    while lat <= 60.0 {
        lines.push(
            (0..=GRATICULE_SAMPLES)
                .map(|i| GeoPoint::new(lat, -180.0 + 360.0 * i as f64 / GRATICULE_SAMPLES as f64))
                .collect(),
        );
        lat += GRATICULE_STEP_DEG;
    }

    let mut shapes = Vec::new();
    for line in lines {
        let mut run = Vec::new();
        for geo in line {
            let view = orientation.apply(sphere_point(geo, radius));
            let projected = (!occluded(camera, radius, view))
                .then(|| camera.project(view))
                .flatten();
            match projected {
                Some(p) => run.push(viewport.to_pixels(p.ndc)),
                None => flush_run(&mut run, &mut shapes),
            }
        }
        flush_run(&mut run, &mut shapes);
    }
    shapes
}

fn flush_run(run: &mut Vec<Vec2>, shapes: &mut Vec<Shape>) {
    if run.len() >= 2 {
        shapes.push(Shape::Polyline {
            points: std::mem::take(run),
            color: LAND_COLOR,
        });
    } else {
        run.clear();
    }
}

// Set through the property so older web-sys bindings work too.
fn ctx_set_fill_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(value),
    );
}

fn ctx_set_stroke_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(value),
    );
}

pub struct Canvas2dRenderer {
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl Canvas2dRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, viewport: Viewport) -> Self {
        Self { ctx, viewport }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn paint(&self, shape: &Shape) {
        let ctx = &self.ctx;
        match shape {
            Shape::Disc {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                if ctx
                    .arc(center.x, center.y, radius.max(0.5), 0.0, std::f64::consts::TAU)
                    .is_err()
                {
                    return;
                }
                ctx_set_fill_style(ctx, &css_color(*color));
                ctx.fill();
            }
            Shape::Polyline { points, color } => {
                let Some((first, rest)) = points.split_first() else {
                    return;
                };
                ctx.begin_path();
                ctx.move_to(first.x, first.y);
                for p in rest {
                    ctx.line_to(p.x, p.y);
                }
                ctx_set_stroke_style(ctx, &css_color(*color));
                ctx.set_line_width(1.0);
                ctx.stroke();
            }
        }
    }
}

impl SceneRenderer for Canvas2dRenderer {
    fn render(&mut self, camera: &PerspectiveCamera, frame: &RenderFrame) {
        self.ctx
            .clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
        for shape in plan_shapes(camera, self.viewport, frame) {
            self.paint(&shape);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Shape, css_color, occluded, plan_shapes};
    use catalog::{CountryCatalog, CountryRecord};
    use foundation::math::{GeoPoint, Vec3};
    use pretty_assertions::assert_eq;
    use scene::{Globe, GlobeConfig, MARKER_COLOR, OCEAN_COLOR, Viewport};

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

    fn discs(shapes: &[Shape]) -> Vec<(f64, f64, f64, u32)> {
        shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Disc {
                    center,
                    radius,
                    color,
                } => Some((center.x, center.y, *radius, *color)),
                Shape::Polyline { .. } => None,
            })
            .collect()
    }

    #[test]
    fn css_color_is_six_hex_digits() {
        assert_eq!(css_color(0x4a90e2), "#4a90e2");
        assert_eq!(css_color(0x27ae60), "#27ae60");
    }

    #[test]
    fn hidden_markers_paint_before_globe() {
        // lon -90 faces the camera at rest; lon 90 sits on the far side.
        let catalog = CountryCatalog::from_records([
            record("Front", 0.0, -90.0),
            record("Back", 0.0, 90.0),
        ]);
        let viewport = Viewport::new(800.0, 600.0);
        let globe = Globe::new(GlobeConfig::default(), &catalog, viewport).expect("globe");

        let shapes = plan_shapes(globe.camera(), viewport, &globe.render_frame());
        let discs = discs(&shapes);
        assert_eq!(discs.len(), 3);
        assert_eq!(discs[0].3, MARKER_COLOR);
        assert_eq!(discs[1].3, OCEAN_COLOR);
        assert_eq!(discs[2].3, MARKER_COLOR);

        // Globe centered in the canvas.
        assert!((discs[1].0 - 400.0).abs() < 1e-9);
        assert!((discs[1].1 - 300.0).abs() < 1e-9);
        // Front marker at the center, smaller than the globe.
        assert!((discs[2].0 - 400.0).abs() < 1e-6);
        assert!(discs[2].2 < discs[1].2);
        assert!(shapes.iter().any(|s| matches!(s, Shape::Polyline { .. })));
    }

    #[test]
    fn marker_past_the_silhouette_is_hidden() {
        // Just in front of the center plane (view z 0.1) but behind the
        // rim as seen from the camera.
        let catalog = CountryCatalog::from_records([record("Edge", 0.0, -2.8)]);
        let viewport = Viewport::new(800.0, 600.0);
        let globe = Globe::new(GlobeConfig::default(), &catalog, viewport).expect("globe");

        let shapes = plan_shapes(globe.camera(), viewport, &globe.render_frame());
        let colors: Vec<u32> = discs(&shapes).iter().map(|d| d.3).collect();
        assert_eq!(colors, vec![MARKER_COLOR, OCEAN_COLOR]);
    }

    #[test]
    fn occlusion_follows_the_sight_line() {
        let viewport = Viewport::new(800.0, 600.0);
        let catalog = CountryCatalog::from_records([record("Front", 0.0, -90.0)]);
        let globe = Globe::new(GlobeConfig::default(), &catalog, viewport).expect("globe");
        let camera = globe.camera();

        // Nearest surface point and the marker shell above it.
        assert!(!occluded(camera, 2.0, Vec3::new(0.0, 0.0, 2.0)));
        assert!(!occluded(camera, 2.0, Vec3::new(0.0, 0.0, 2.05)));
        // Far pole and a point beside the rim at positive z.
        assert!(occluded(camera, 2.0, Vec3::new(0.0, 0.0, -2.0)));
        assert!(occluded(camera, 2.0, Vec3::new(2.047, 0.0, 0.1)));
        // Off to the side of the globe entirely.
        assert!(!occluded(camera, 2.0, Vec3::new(3.0, 0.0, 0.0)));
    }
}
