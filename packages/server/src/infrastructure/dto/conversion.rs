//! Conversion logic between DTOs and domain types.

use roadsafe_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    ConnectedUser, Coordinate, HazardAck, HazardAlert, HazardReport, HazardType, PushMessage,
    ValueObjectError,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::HazardReportPayload> for HazardReport {
    type Error = ValueObjectError;

    fn try_from(payload: dto::HazardReportPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            hazard_type: HazardType::new(payload.hazard_type)?,
            description: payload.description,
            coordinate: Coordinate::new(payload.latitude, payload.longitude)?,
            reported_at: payload.timestamp,
            photo: payload.photo.filter(|p| !p.is_empty()),
        })
    }
}

impl dto::LocationUpdatePayload {
    /// The reported position, or `None` when either axis is missing or zero.
    ///
    /// Zero is treated like a missing value, which is what deployed clients
    /// send before they have a GPS fix.
    pub fn coordinate(&self) -> Result<Option<Coordinate>, ValueObjectError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0 => {
                Coordinate::new(lat, lon).map(Some)
            }
            _ => Ok(None),
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&HazardAlert> for dto::HazardAlertPayload {
    fn from(alert: &HazardAlert) -> Self {
        Self {
            id: alert.id.as_str().to_string(),
            hazard_type: alert.hazard_type.as_str().to_string(),
            description: alert.description.clone(),
            latitude: alert.coordinate.latitude,
            longitude: alert.coordinate.longitude,
            timestamp: alert.reported_at.clone(),
            photo_url: alert.photo_url.clone(),
            distance: alert.distance_m,
        }
    }
}

impl From<&HazardAck> for dto::HazardAckPayload {
    fn from(ack: &HazardAck) -> Self {
        match ack {
            HazardAck::Merged {
                hazard_id,
                photo_url,
            } => Self {
                hazard_id: hazard_id.as_str().to_string(),
                merged: Some(true),
                notified_users: None,
                status: None,
                photo_url: photo_url.clone(),
            },
            HazardAck::Broadcasted {
                hazard_id,
                photo_url,
                notified_users,
            } => Self {
                hazard_id: hazard_id.as_str().to_string(),
                merged: None,
                notified_users: Some(*notified_users),
                status: Some("broadcasted".to_string()),
                photo_url: photo_url.clone(),
            },
        }
    }
}

impl From<&PushMessage> for dto::ServerMessage {
    fn from(message: &PushMessage) -> Self {
        match message {
            PushMessage::LocationAck => dto::ServerMessage::LocationAck(dto::StatusPayload {
                status: "ok".to_string(),
            }),
            PushMessage::HazardAck(ack) => dto::ServerMessage::HazardAck(ack.into()),
            PushMessage::HazardAlert(alert) => dto::ServerMessage::HazardAlert(alert.into()),
            PushMessage::Error(notice) => dto::ServerMessage::Error(dto::ErrorPayload {
                code: notice.code.as_str().to_string(),
                message: notice.message.clone(),
            }),
        }
    }
}

impl From<&HazardAck> for http::HazardReportResponseDto {
    fn from(ack: &HazardAck) -> Self {
        match ack {
            HazardAck::Merged {
                hazard_id,
                photo_url,
            } => Self {
                success: true,
                hazard_id: hazard_id.as_str().to_string(),
                photo_url: photo_url.clone(),
                merged: Some(true),
                notified_users: None,
            },
            HazardAck::Broadcasted {
                hazard_id,
                photo_url,
                notified_users,
            } => Self {
                success: true,
                hazard_id: hazard_id.as_str().to_string(),
                photo_url: photo_url.clone(),
                merged: None,
                notified_users: Some(*notified_users),
            },
        }
    }
}

impl From<&ConnectedUser> for http::ConnectionDto {
    fn from(user: &ConnectedUser) -> Self {
        Self {
            user_id: user.user_id.as_str().to_string(),
            connected_at: timestamp_to_rfc3339(user.connected_at.value()),
            latitude: user.location.map(|c| c.latitude),
            longitude: user.location.map(|c| c.longitude),
            location_updated_at: user
                .location_updated_at
                .map(|t| timestamp_to_rfc3339(t.value())),
        }
    }
}
