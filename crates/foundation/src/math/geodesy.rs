//! Latitude/longitude to sphere-surface projection.
//!
//! The globe uses a Y-up frame: latitude 90 lies on +Y, and longitude is
//! measured from a seam at ±180 degrees so both ends of the range coincide.

use super::Vec3;

/// Geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// Finite and within [-90, 90] x [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.lat_deg.is_finite()
            && self.lon_deg.is_finite()
            && (-90.0..=90.0).contains(&self.lat_deg)
            && (-180.0..=180.0).contains(&self.lon_deg)
    }

    /// Angle from the north pole, in radians.
    pub fn colatitude_rad(&self) -> f64 {
        (90.0 - self.lat_deg).to_radians()
    }

    /// Longitude measured from the ±180 seam, in radians.
    pub fn seam_longitude_rad(&self) -> f64 {
        (self.lon_deg + 180.0).to_radians()
    }
}

/// Project `geo` onto the surface of a sphere of `radius` centered at the origin.
pub fn sphere_point(geo: GeoPoint, radius: f64) -> Vec3 {
    let colat = geo.colatitude_rad();
    let theta = geo.seam_longitude_rad();
    let (sin_colat, cos_colat) = colat.sin_cos();

    Vec3::new(
        -radius * sin_colat * theta.cos(),
        radius * cos_colat,
        radius * sin_colat * theta.sin(),
    )
}
