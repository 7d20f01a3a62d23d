//! Input and output records for marker clustering

use chrono::{DateTime, Utc};

/// A single geo-tagged vessel ping
///
/// Latitude and longitude are degrees. `registered` is the visibility
/// class: unregistered pings are only shown to viewers with clearance.
/// Payload fields (vessel identity, category) stay with the caller;
/// clusters refer back to pings by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Ping {
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: DateTime<Utc>,
    pub registered: bool,
}

/// PingList is a collection of Pings
pub type PingList = Vec<Ping>;

/// Camera position over the globe
///
/// `altitude` is a unit-less zoom proxy: larger means more zoomed out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// Inclusive `[start, end]` timestamp window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// A window that accepts every timestamp
    pub fn all_time() -> Self {
        Self {
            start: DateTime::<Utc>::MIN_UTC,
            end: DateTime::<Utc>::MAX_UTC,
        }
    }

    /// Checks whether `t` falls inside the window (both bounds inclusive)
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }
}

/// MarkerCluster represents one rendered map marker
///
/// `members` holds indices into the ping slice the cluster was built from,
/// in encounter order; the first entry is always the seed.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerCluster {
    /// Representative latitude (always a real member coordinate)
    pub latitude: f64,
    /// Representative longitude (always a real member coordinate)
    pub longitude: f64,
    /// Indices of member pings, in encounter order
    pub members: Vec<usize>,
    /// True only when every member is registered
    pub registered: bool,
    /// Minimum seed-to-member distance in km; infinite for singletons.
    /// The renderer uses this to pick a zoom-in altitude on activation.
    pub nearest_internal_km: f64,
}

impl MarkerCluster {
    /// Number of pings aggregated into this marker
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
