//! Messages the server pushes to a connected user.
//!
//! These are protocol-neutral; the registry encodes them with the WebSocket
//! DTOs right before writing to the socket.

use super::{
    entity::HazardRecord,
    geo::Coordinate,
    value_object::{HazardId, HazardType},
};

#[derive(Debug, Clone, PartialEq)]
pub enum PushMessage {
    LocationAck,
    HazardAck(HazardAck),
    HazardAlert(HazardAlert),
    Error(ErrorNotice),
}

/// Reply to the reporter of a hazard.
#[derive(Debug, Clone, PartialEq)]
pub enum HazardAck {
    /// The report was folded into an existing record
    Merged {
        hazard_id: HazardId,
        photo_url: Option<String>,
    },
    /// A new record was created and fanned out
    Broadcasted {
        hazard_id: HazardId,
        photo_url: Option<String>,
        notified_users: usize,
    },
}

impl HazardAck {
    pub fn hazard_id(&self) -> &HazardId {
        match self {
            HazardAck::Merged { hazard_id, .. } | HazardAck::Broadcasted { hazard_id, .. } => {
                hazard_id
            }
        }
    }
}

/// Alert pushed to a user near a new hazard.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardAlert {
    pub id: HazardId,
    pub hazard_type: HazardType,
    pub description: String,
    pub coordinate: Coordinate,
    pub reported_at: String,
    pub photo_url: Option<String>,
    /// Meters from the recipient, rounded to two decimals
    pub distance_m: f64,
}

impl HazardAlert {
    pub fn new(hazard: &HazardRecord, distance_m: f64) -> Self {
        Self {
            id: hazard.id.clone(),
            hazard_type: hazard.hazard_type.clone(),
            description: hazard.description.clone(),
            coordinate: hazard.coordinate,
            reported_at: hazard.reported_at.clone(),
            photo_url: hazard.photo_url.clone(),
            distance_m: round_to_hundredths(distance_m),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MalformedMessage,
    StoreFailure,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MalformedMessage => "malformed_message",
            ErrorCode::StoreFailure => "store_failure",
        }
    }
}

/// Typed error reply; the connection stays open.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNotice {
    pub code: ErrorCode,
    pub message: String,
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_hundredths() {
        // テスト項目: 距離が小数点以下 2 桁に丸められる
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(round_to_hundredths(22.238_99), 22.24);
        assert_eq!(round_to_hundredths(0.004), 0.0);
        assert_eq!(round_to_hundredths(4_999.995_1), 5_000.0);
    }
}
