//! Package cluster implements greedy marker clustering of (lat, lng)
//! vessel pings around a camera position
pub mod distance;
pub mod engine;
pub mod point;

#[cfg(test)]
mod point_test;

pub use engine::cluster_markers;
pub use point::{CameraState, MarkerCluster, Ping, PingList, TimeWindow};
// Distance internals re-exported for callers that derive their own radii
#[allow(unused_imports)]
pub use distance::{
    CLUSTER_BASE, CULL_BASE, DEGREE_RAD, EARTH_R, cluster_radius_km, cull_radius_km, haversine_km,
    spherical_centroid,
};
