/// Radius of the reference sphere used by the projection when callers do not scale.
pub const UNIT_SPHERE_RADIUS: f64 = 1.0;

/// Azimuth offset in degrees so that longitude 0 lands on the earth texture seam.
pub const LONGITUDE_SEAM_OFFSET_DEG: f64 = 180.0;

/// Project a latitude/longitude pair (degrees) onto a sphere of the given radius.
///
/// Right-handed, Y-up: `phi` is the polar angle measured from the north pole
/// and `theta` the azimuth around Y. Latitudes of ±90 collapse onto the poles
/// and any real longitude is accepted since the trigonometry wraps it.
pub fn project(latitude_deg: f64, longitude_deg: f64, radius: f64) -> (f64, f64, f64) {
    let phi = (90.0 - latitude_deg).to_radians();
    let theta = (longitude_deg + LONGITUDE_SEAM_OFFSET_DEG).to_radians();

    let x = radius * phi.sin() * theta.cos();
    let y = radius * phi.cos();
    let z = radius * phi.sin() * theta.sin();

    (x, y, z)
}

/// Project onto the unit sphere.
pub fn project_unit(latitude_deg: f64, longitude_deg: f64) -> (f64, f64, f64) {
    project(latitude_deg, longitude_deg, UNIT_SPHERE_RADIUS)
}

/// A latitude/longitude sample in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build from a GeoJSON position, which is ordered `[longitude, latitude]`.
    pub fn from_lon_lat(position: [f64; 2]) -> Self {
        Self::new(position[1], position[0])
    }

    pub fn project(&self, radius: f64) -> (f64, f64, f64) {
        project(self.latitude, self.longitude, radius)
    }
}
