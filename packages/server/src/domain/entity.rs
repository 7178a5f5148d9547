//! Entities.

use super::{
    geo::Coordinate,
    registry::PusherChannel,
    value_object::{ConnectionId, HazardId, HazardType, Timestamp, UserId},
};

/// A user with a live socket, as held by the connection registry.
#[derive(Debug, Clone)]
pub struct ConnectedUser {
    pub user_id: UserId,
    /// Which socket this entry belongs to
    pub connection_id: ConnectionId,
    /// Outbound channel drained into the socket by the session task
    pub sender: PusherChannel,
    pub connected_at: Timestamp,
    /// `None` until the first location update
    pub location: Option<Coordinate>,
    pub location_updated_at: Option<Timestamp>,
}

impl ConnectedUser {
    pub fn new(
        user_id: UserId,
        connection_id: ConnectionId,
        sender: PusherChannel,
        connected_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            connection_id,
            sender,
            connected_at,
            location: None,
            location_updated_at: None,
        }
    }

    pub fn update_location(&mut self, location: Coordinate, at: Timestamp) {
        self.location = Some(location);
        self.location_updated_at = Some(at);
    }
}

/// A validated hazard report as submitted by a client.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardReport {
    pub hazard_type: HazardType,
    pub description: String,
    pub coordinate: Coordinate,
    /// Client-supplied report time, kept verbatim
    pub reported_at: String,
    /// Base64 photo, optionally wrapped in a data URL
    pub photo: Option<String>,
}

/// Fields of a hazard about to be persisted for the first time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHazard {
    pub id: HazardId,
    pub hazard_type: HazardType,
    pub description: String,
    pub coordinate: Coordinate,
    pub photo_url: Option<String>,
    pub reporter_id: UserId,
    /// Client-supplied report time, kept verbatim
    pub reported_at: String,
    pub created_at: Timestamp,
}

/// A persisted hazard.
///
/// Only `report_count`, `last_reported_at` and `verified` change after
/// creation, and only through [`HazardRecord::register_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct HazardRecord {
    pub id: HazardId,
    pub hazard_type: HazardType,
    pub description: String,
    pub coordinate: Coordinate,
    pub photo_url: Option<String>,
    pub reporter_id: UserId,
    pub reported_at: String,
    pub report_count: u32,
    pub verified: bool,
    pub created_at: Timestamp,
    pub last_reported_at: Timestamp,
}

impl From<NewHazard> for HazardRecord {
    fn from(new: NewHazard) -> Self {
        Self {
            id: new.id,
            hazard_type: new.hazard_type,
            description: new.description,
            coordinate: new.coordinate,
            photo_url: new.photo_url,
            reporter_id: new.reporter_id,
            reported_at: new.reported_at,
            report_count: 1,
            verified: false,
            created_at: new.created_at,
            last_reported_at: new.created_at,
        }
    }
}

impl HazardRecord {
    /// Count one more corroborating report.
    ///
    /// Once the counter reaches `verify_threshold` the record is verified and
    /// stays verified.
    pub fn register_report(&mut self, now: Timestamp, verify_threshold: u32) {
        self.report_count = self.report_count.saturating_add(1);
        self.last_reported_at = now;
        if self.report_count >= verify_threshold {
            self.verified = true;
        }
    }
}
