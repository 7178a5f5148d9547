//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// `GET /api/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsDto {
    pub total_hazards: usize,
    pub active_users: usize,
}

/// `POST /api/hazards/report` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardReportResponseDto {
    pub success: bool,
    pub hazard_id: String,
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notified_users: Option<usize>,
}

/// `GET /debug/connections` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDto {
    pub user_id: String,
    pub connected_at: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}
