use super::distance::{cluster_radius_km, cull_radius_km, haversine_km, spherical_centroid};
use super::point::{CameraState, MarkerCluster, Ping, TimeWindow};
use bitvec::prelude::*;

// Clustering pseudocode, as the dashboard runs it on every pan/zoom:
//
// cluster(P, camera, window, clearance, cull)
//    keep = filter(P)          (clearance, window, optional camera cull)
//    for each unassigned ping p in keep, in input order
//       open cluster C seeded by p
//       for each other unassigned ping q in keep
//          if class(q) == class(C) and dist(seed, q) <= radius(altitude)
//             absorb q into C
//       if |C| > 1
//          move C's marker to the member nearest the spherical centroid
//
// Distances are anchored at the seed, never the evolving centroid, so
// membership is order-dependent and non-transitive: two absorbed pings may
// sit farther apart than the radius while both being within range of the
// seed. The dashboard renders exactly these groupings; kept as-is.

/// Groups pings into render-ready map clusters around a camera position
///
/// # Arguments
///
/// * `pings` - Pings to cluster, in a stable caller-chosen order
/// * `camera` - Camera position and altitude (zoom proxy)
/// * `window` - Inclusive timestamp window a ping must fall into
/// * `viewer_can_see_restricted` - Whether unregistered pings are visible
///   to the current viewer (resolved by the caller's auth layer)
/// * `apply_distance_culling` - Whether to drop pings far from the camera;
///   overview globes pass `false` to keep every ping regardless of camera
///
/// # Returns
///
/// One [`MarkerCluster`] per group, in seed encounter order. Member indices
/// refer to `pings`, and every ping surviving the filters lands in exactly
/// one cluster.
pub fn cluster_markers(
    pings: &[Ping],
    camera: &CameraState,
    window: &TimeWindow,
    viewer_can_see_restricted: bool,
    apply_distance_culling: bool,
) -> Vec<MarkerCluster> {
    if pings.is_empty() {
        return Vec::new();
    }

    let cluster_radius = cluster_radius_km(camera.altitude);
    let cull_radius = cull_radius_km(camera.altitude);

    // Filtering pass, order-preserving.
    let mut eligible: Vec<usize> = Vec::new();
    for (i, ping) in pings.iter().enumerate() {
        if !ping.registered && !viewer_can_see_restricted {
            continue;
        }
        if !window.contains(ping.recorded_at) {
            continue;
        }
        if apply_distance_culling {
            let from_camera =
                haversine_km(ping.latitude, ping.longitude, camera.latitude, camera.longitude);
            if from_camera > cull_radius {
                continue;
            }
        }
        eligible.push(i);
    }

    let mut assigned = bitvec![0; eligible.len()];
    let mut clusters = Vec::new();

    for a in 0..eligible.len() {
        if assigned[a] {
            continue;
        }
        assigned.set(a, true);

        let seed = &pings[eligible[a]];
        let mut cluster = MarkerCluster {
            latitude: seed.latitude,
            longitude: seed.longitude,
            members: vec![eligible[a]],
            registered: seed.registered,
            nearest_internal_km: f64::INFINITY,
        };

        // Scan the whole remaining unassigned set, not just forward.
        for b in 0..eligible.len() {
            if assigned[b] {
                continue;
            }
            let candidate = &pings[eligible[b]];
            if candidate.registered != cluster.registered {
                continue;
            }
            let from_seed = haversine_km(
                seed.latitude,
                seed.longitude,
                candidate.latitude,
                candidate.longitude,
            );
            if from_seed > cluster_radius {
                continue;
            }

            assigned.set(b, true);
            cluster.members.push(eligible[b]);
            cluster.registered &= candidate.registered;
            if from_seed < cluster.nearest_internal_km {
                cluster.nearest_internal_km = from_seed;
            }
        }

        if cluster.member_count() > 1 {
            relocate_representative(&mut cluster, pings);
        }

        clusters.push(cluster);
    }

    clusters
}

/// Moves the cluster's marker to the member closest to the spherical
/// centroid of all members
///
/// The centroid itself is never exposed: the marker must sit on a real
/// reported position, not on open water (or land) between members.
fn relocate_representative(cluster: &mut MarkerCluster, pings: &[Ping]) {
    let coords: Vec<(f64, f64)> = cluster
        .members
        .iter()
        .map(|&i| (pings[i].latitude, pings[i].longitude))
        .collect();
    let (centroid_lat, centroid_lng) = spherical_centroid(&coords);

    let mut best = coords[0];
    let mut best_dist = f64::INFINITY;
    for &(lat, lng) in &coords {
        let d = haversine_km(lat, lng, centroid_lat, centroid_lng);
        if d < best_dist {
            best_dist = d;
            best = (lat, lng);
        }
    }

    cluster.latitude = best.0;
    cluster.longitude = best.1;
}
