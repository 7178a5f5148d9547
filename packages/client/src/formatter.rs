//! Message formatting utilities for client display.

use roadsafe_server::infrastructure::dto::websocket::{
    ErrorPayload, HazardAckPayload, HazardAlertPayload, ServerMessage,
};

const RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any frame pushed by the server
    pub fn format_server_message(message: &ServerMessage) -> String {
        match message {
            ServerMessage::LocationAck(ack) => Self::format_location_ack(&ack.status),
            ServerMessage::HazardAck(ack) => Self::format_hazard_ack(ack),
            ServerMessage::HazardAlert(alert) => Self::format_hazard_alert(alert),
            ServerMessage::Error(error) => Self::format_error(error),
        }
    }

    pub fn format_location_ack(status: &str) -> String {
        format!("\nlocation {}\n", status)
    }

    /// Format the server's answer to our own report
    pub fn format_hazard_ack(ack: &HazardAckPayload) -> String {
        let mut output = if ack.merged == Some(true) {
            format!("\nreport merged into hazard {}\n", ack.hazard_id)
        } else {
            format!(
                "\nhazard {} created, {} nearby user(s) notified\n",
                ack.hazard_id,
                ack.notified_users.unwrap_or(0)
            )
        };
        if let Some(photo_url) = &ack.photo_url {
            output.push_str(&format!("photo: {}\n", photo_url));
        }
        output
    }

    /// Format an alert for a hazard reported nearby
    pub fn format_hazard_alert(alert: &HazardAlertPayload) -> String {
        let mut output = format!(
            "\n\n{rule}\n\
             !! {} {:.0} m away at ({:.5}, {:.5})\n",
            alert.hazard_type.to_uppercase(),
            alert.distance,
            alert.latitude,
            alert.longitude,
            rule = RULE,
        );
        if !alert.description.is_empty() {
            output.push_str(&format!("   {}\n", alert.description));
        }
        output.push_str(&format!("   reported at {}\n", alert.timestamp));
        if let Some(photo_url) = &alert.photo_url {
            output.push_str(&format!("   photo: {}\n", photo_url));
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    pub fn format_error(error: &ErrorPayload) -> String {
        format!("\nerror ({}): {}\n", error.code, error.message)
    }

    /// Format a text frame that is not a known server message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n{}\n", text)
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\nReceived binary data: {} bytes\n", byte_count)
    }

    pub fn format_help() -> String {
        "\ncommands:\n  \
         loc <lat> <lon>                               update your position\n  \
         report <type> <lat> <lon> [description...]   report a hazard\n  \
         help                                          show this help\n  \
         quit                                          disconnect and exit\n"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadsafe_server::infrastructure::dto::websocket::StatusPayload;

    fn alert() -> HazardAlertPayload {
        HazardAlertPayload {
            id: "h-1".to_string(),
            hazard_type: "pothole".to_string(),
            description: "deep hole".to_string(),
            latitude: 37.0,
            longitude: -122.0,
            timestamp: "2026-10-18T08:00:00Z".to_string(),
            photo_url: None,
            distance: 22.24,
        }
    }

    #[test]
    fn test_format_hazard_alert() {
        // テスト項目: アラートに種別・距離・説明・報告時刻が含まれる
        // given (前提条件):
        let alert = alert();

        // when (操作):
        let output = MessageFormatter::format_hazard_alert(&alert);

        // then (期待する結果):
        assert!(output.contains("!! POTHOLE 22 m away at (37.00000, -122.00000)"));
        assert!(output.contains("   deep hole\n"));
        assert!(output.contains("reported at 2026-10-18T08:00:00Z"));
        assert!(!output.contains("photo:"));
    }

    #[test]
    fn test_format_hazard_alert_with_photo() {
        // テスト項目: 写真付きアラートには写真の URL が表示される
        // given (前提条件):
        let alert = HazardAlertPayload {
            photo_url: Some("/uploads/hazard_h-1_abc.jpg".to_string()),
            ..alert()
        };

        // when (操作):
        let output = MessageFormatter::format_hazard_alert(&alert);

        // then (期待する結果):
        assert!(output.contains("photo: /uploads/hazard_h-1_abc.jpg"));
    }

    #[test]
    fn test_format_hazard_ack_created_and_merged() {
        // テスト項目: 新規作成とマージで ack の表示が変わる
        // given (前提条件):
        let created = HazardAckPayload {
            hazard_id: "h-1".to_string(),
            merged: None,
            notified_users: Some(3),
            status: Some("broadcasted".to_string()),
            photo_url: None,
        };
        let merged = HazardAckPayload {
            merged: Some(true),
            notified_users: None,
            status: None,
            ..created.clone()
        };

        // when (操作):
        let created_output = MessageFormatter::format_hazard_ack(&created);
        let merged_output = MessageFormatter::format_hazard_ack(&merged);

        // then (期待する結果):
        assert_eq!(
            created_output,
            "\nhazard h-1 created, 3 nearby user(s) notified\n"
        );
        assert_eq!(merged_output, "\nreport merged into hazard h-1\n");
    }

    #[test]
    fn test_format_server_message_dispatch() {
        // テスト項目: 各メッセージ種別が対応するフォーマットに振り分けられる
        // given (前提条件):
        let ack = ServerMessage::LocationAck(StatusPayload {
            status: "ok".to_string(),
        });
        let error = ServerMessage::Error(ErrorPayload {
            code: "malformed_message".to_string(),
            message: "missing field `hazardType`".to_string(),
        });

        // when (操作) / then (期待する結果):
        assert_eq!(MessageFormatter::format_server_message(&ack), "\nlocation ok\n");
        assert_eq!(
            MessageFormatter::format_server_message(&error),
            "\nerror (malformed_message): missing field `hazardType`\n"
        );
    }
}
