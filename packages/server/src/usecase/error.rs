//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{AuthError, RepositoryError};

/// 接続時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("authentication failed: {0}")]
    Unauthorized(#[from] AuthError),
}

/// ハザード報告のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportHazardError {
    #[error("hazard store failure: {0}")]
    Store(#[from] RepositoryError),
}

/// 統計取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetStatsError {
    #[error("hazard store failure: {0}")]
    Store(#[from] RepositoryError),
}
