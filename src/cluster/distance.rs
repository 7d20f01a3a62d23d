use std::f64::consts::PI;

/// Coefficient to translate from degrees to radians
pub const DEGREE_RAD: f64 = PI / 180.0;

/// Earth radius in kilometers
pub const EARTH_R: f64 = 6371.0;

// Base factors and caps are tuned against the dashboard's marker density;
// changing any of them changes which pings group together.

/// Cluster radius per unit of camera altitude, in km
pub const CLUSTER_BASE: f64 = 1500.0;

/// Culling radius per unit of camera altitude, in km
pub const CULL_BASE: f64 = 7000.0;

const CLUSTER_RADIUS_CAP_KM: f64 = 10_000.0;
const CULL_RADIUS_CAP_KM: f64 = 70_000.0;
const CULL_RADIUS_FLOOR_KM: f64 = 1.0;

/// Calculates great-circle distance between two points using the
/// haversine formula
///
/// Exact at all latitudes, including near the poles where flat
/// approximations diverge badly.
///
/// # Returns
///
/// Distance in kilometers
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1) * DEGREE_RAD;
    let d_lng = (lng2 - lng1) * DEGREE_RAD;

    let a = (d_lat / 2.0).sin().powi(2)
        + (lat1 * DEGREE_RAD).cos() * (lat2 * DEGREE_RAD).cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_R * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Derives the merge radius from camera altitude
///
/// Two pings within this many kilometers of a cluster's seed are merged.
/// Monotonic non-decreasing in altitude, capped at 10,000 km.
pub fn cluster_radius_km(altitude: f64) -> f64 {
    (CLUSTER_BASE * altitude).min(CLUSTER_RADIUS_CAP_KM)
}

/// Derives the culling radius from camera altitude
///
/// Pings farther than this from the camera are dropped before grouping.
/// Monotonic non-decreasing in altitude, clamped to [1, 70,000] km.
pub fn cull_radius_km(altitude: f64) -> f64 {
    (CULL_BASE * altitude)
        .min(CULL_RADIUS_CAP_KM)
        .max(CULL_RADIUS_FLOOR_KM)
}

/// Calculates the spherical centroid of a set of (lat, lng) coordinates
///
/// Each coordinate becomes a 3D unit vector; the mean vector is converted
/// back to degrees, with renormalization implicit in `atan2`. The mean
/// vector is only zero for perfectly antipodal inputs, which identical or
/// nearby coordinates never are.
///
/// # Panics
///
/// Panics if `coords` is empty
pub fn spherical_centroid(coords: &[(f64, f64)]) -> (f64, f64) {
    if coords.is_empty() {
        panic!("empty coordinate set");
    }

    let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
    for &(lat, lng) in coords {
        let lat_r = lat * DEGREE_RAD;
        let lng_r = lng * DEGREE_RAD;
        x += lat_r.cos() * lng_r.cos();
        y += lat_r.cos() * lng_r.sin();
        z += lat_r.sin();
    }

    let n = coords.len() as f64;
    let (x, y, z) = (x / n, y / n, z / n);

    let lat = z.atan2((x * x + y * y).sqrt()) / DEGREE_RAD;
    let lng = y.atan2(x) / DEGREE_RAD;
    (lat, lng)
}
