#[cfg(test)]
mod tests {
    use super::super::*;
    use chrono::{DateTime, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).expect("valid timestamp")
    }

    #[test]
    fn test_time_window_bounds_inclusive() {
        let window = TimeWindow {
            start: ts(100),
            end: ts(200),
        };
        assert!(window.contains(ts(100)));
        assert!(window.contains(ts(150)));
        assert!(window.contains(ts(200)));
        assert!(!window.contains(ts(99)));
        assert!(!window.contains(ts(201)));
    }

    #[test]
    fn test_all_time_window() {
        assert!(TimeWindow::all_time().contains(ts(0)));
        assert!(TimeWindow::all_time().contains(Utc::now()));
    }

    #[test]
    fn test_member_count_matches_members() {
        let cluster = MarkerCluster {
            latitude: 0.0,
            longitude: 0.0,
            members: vec![3, 1, 4],
            registered: true,
            nearest_internal_km: f64::INFINITY,
        };
        assert_eq!(cluster.member_count(), 3);
    }
}
