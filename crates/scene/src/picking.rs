use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

use crate::markers::{MarkerId, MarkerRegistry};
use crate::rotation::Orientation;
use crate::GlobeConfig;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir.scale(t)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub marker: MarkerId,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
    /// When set, hits farther than the entry point of a sphere of this radius
    /// at the origin are discarded (markers behind the globe).
    pub occluder_radius: Option<f64>,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
            occluder_radius: None,
        }
    }
}

/// Deterministic ray picking for globe markers.
///
/// Each marker is a sphere of `marker_size * style.scale` around its
/// orientation-applied position, so a hovered marker is easier to hit.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - If multiple markers are hit at the same distance, the lower `MarkerId` wins.
pub fn pick_ray(
    markers: &MarkerRegistry,
    orientation: Orientation,
    config: &GlobeConfig,
    ray: Ray,
    opts: PickOptions,
) -> Option<PickHit> {
    let dir = ray.dir.normalized()?;

    let mut t_max = opts.max_distance;
    if let Some(radius) = opts.occluder_radius {
        if let Some(t) = ray_sphere_hit_t(ray.origin, dir, Vec3::ZERO, radius, 0.0, t_max) {
            t_max = t;
        }
    }

    let mut best: Option<(f64, MarkerId)> = None;
    for marker in markers.all() {
        let center = orientation.apply(marker.position);
        let radius = config.marker_size * marker.state.style(config).scale;
        let Some(t) = ray_sphere_hit_t(ray.origin, dir, center, radius, 0.0, t_max) else {
            continue;
        };

        best = match best {
            None => Some((t, marker.id)),
            Some((bt, bid)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| marker.id.cmp(&bid));
                if ord.is_lt() {
                    Some((t, marker.id))
                } else {
                    Some((bt, bid))
                }
            }
        };
    }

    let (t, marker) = best?;
    Some(PickHit {
        marker,
        distance: t,
        point: Ray::new(ray.origin, dir).at(t),
    })
}

/// Entry distance of a ray into a sphere, clamped to `[t_min, t_max]`.
///
/// `dir` must be normalized. A ray starting inside the sphere hits at `t_min`.
pub fn ray_sphere_hit_t(
    origin: Vec3,
    dir: Vec3,
    center: Vec3,
    radius: f64,
    t_min: f64,
    t_max: f64,
) -> Option<f64> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t_near = -b - sq;
    let t_far = -b + sq;
    if t_far < t_min || t_near > t_max {
        return None;
    }
    Some(t_near.max(t_min))
}
