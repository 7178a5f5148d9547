//! UseCase: 統計情報の取得

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, HazardRepository};

use super::error::GetStatsError;

/// ハザード総数と接続中ユーザー数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total_hazards: usize,
    pub active_users: usize,
}

/// 統計情報取得のユースケース
pub struct GetStatsUseCase {
    repository: Arc<dyn HazardRepository>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetStatsUseCase {
    pub fn new(repository: Arc<dyn HazardRepository>, registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            repository,
            registry,
        }
    }

    pub async fn execute(&self) -> Result<Stats, GetStatsError> {
        Ok(Stats {
            total_hazards: self.repository.count().await?,
            active_users: self.registry.count().await,
        })
    }
}
