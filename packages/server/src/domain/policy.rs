//! Alerting and merge policy.

use std::time::Duration;

/// Radius around a new hazard within which connected users are alerted.
pub const DEFAULT_ALERT_RADIUS_M: f64 = 5_000.0;
/// Same-type reports closer than this collapse into one record.
pub const DEFAULT_MERGE_DISTANCE_M: f64 = 50.0;
/// Same-type reports newer than this collapse into one record.
pub const DEFAULT_MERGE_WINDOW: Duration = Duration::from_secs(2 * 60);
/// Report count at which a hazard becomes verified.
pub const DEFAULT_VERIFY_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardPolicy {
    pub alert_radius_m: f64,
    pub merge_distance_m: f64,
    pub merge_window: Duration,
    pub verify_threshold: u32,
}

impl Default for HazardPolicy {
    fn default() -> Self {
        Self {
            alert_radius_m: DEFAULT_ALERT_RADIUS_M,
            merge_distance_m: DEFAULT_MERGE_DISTANCE_M,
            merge_window: DEFAULT_MERGE_WINDOW,
            verify_threshold: DEFAULT_VERIFY_THRESHOLD,
        }
    }
}

impl HazardPolicy {
    pub fn merge_window_millis(&self) -> i64 {
        i64::try_from(self.merge_window.as_millis()).unwrap_or(i64::MAX)
    }
}
