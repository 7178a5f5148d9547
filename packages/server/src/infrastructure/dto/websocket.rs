//! WebSocket message DTOs.
//!
//! Every frame is a JSON object `{"type": ..., "payload": {...}}`.

use serde::{Deserialize, Serialize};

/// Messages sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientMessage {
    LocationUpdate(LocationUpdatePayload),
    HazardReport(HazardReportPayload),
}

/// Position update. Missing or zero coordinates make the update a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdatePayload {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardReportPayload {
    pub latitude: f64,
    pub longitude: f64,
    pub hazard_type: String,
    pub description: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Messages pushed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerMessage {
    LocationAck(StatusPayload),
    HazardAck(HazardAckPayload),
    HazardAlert(HazardAlertPayload),
    Error(ErrorPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardAckPayload {
    pub hazard_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notified_users: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        rename = "photoUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardAlertPayload {
    pub id: String,
    pub hazard_type: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_location_update() {
        // テスト項目: location_update メッセージがデコードできる
        // given (前提条件):
        let text = r#"{"type":"location_update","payload":{"latitude":37.0,"longitude":-122.0,"timestamp":"t"}}"#;

        // when (操作):
        let msg: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            msg,
            ClientMessage::LocationUpdate(LocationUpdatePayload {
                latitude: Some(37.0),
                longitude: Some(-122.0),
                timestamp: Some("t".to_string()),
            })
        );
    }

    #[test]
    fn test_decode_location_update_with_missing_longitude() {
        // テスト項目: 経度が欠けた location_update もデコード自体は成功する
        // given (前提条件):
        let text = r#"{"type":"location_update","payload":{"latitude":37.0}}"#;

        // when (操作):
        let msg: ClientMessage = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert!(matches!(
            msg,
            ClientMessage::LocationUpdate(LocationUpdatePayload { longitude: None, .. })
        ));
    }

    #[test]
    fn test_decode_hazard_report_requires_hazard_type() {
        // テスト項目: hazardType が欠けた hazard_report はデコードエラーになる
        // given (前提条件):
        let text = r#"{"type":"hazard_report","payload":{"latitude":37.0,"longitude":-122.0,"description":"x","timestamp":"t"}}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientMessage>(text);

        // then (期待する結果):
        let err = result.unwrap_err().to_string();
        assert!(err.contains("hazardType"), "unexpected error: {err}");
    }

    #[test]
    fn test_decode_unknown_type_is_an_error() {
        // テスト項目: 未知の type はデコードエラーになる
        // given (前提条件):
        let text = r#"{"type":"speed_camera","payload":{}}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientMessage>(text);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_merged_hazard_ack_omits_broadcast_fields() {
        // テスト項目: merged の hazard_ack には notified_users と status が含まれない
        // given (前提条件):
        let msg = ServerMessage::HazardAck(HazardAckPayload {
            hazard_id: "h-1".to_string(),
            merged: Some(true),
            notified_users: None,
            status: None,
            photo_url: None,
        });

        // when (操作):
        let value = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            serde_json::json!({"type": "hazard_ack", "payload": {"hazard_id": "h-1", "merged": true}})
        );
    }

    #[test]
    fn test_encode_hazard_alert_uses_camel_case() {
        // テスト項目: hazard_alert のフィールド名がクライアント互換の camelCase になる
        // given (前提条件):
        let msg = ServerMessage::HazardAlert(HazardAlertPayload {
            id: "h-1".to_string(),
            hazard_type: "pothole".to_string(),
            description: "deep".to_string(),
            latitude: 37.0,
            longitude: -122.0,
            timestamp: "t".to_string(),
            photo_url: Some("/uploads/a.jpg".to_string()),
            distance: 22.24,
        });

        // when (操作):
        let value = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], "hazard_alert");
        assert_eq!(value["payload"]["hazardType"], "pothole");
        assert_eq!(value["payload"]["photoUrl"], "/uploads/a.jpg");
        assert_eq!(value["payload"]["distance"], 22.24);
    }
}
