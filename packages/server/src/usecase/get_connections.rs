//! UseCase: 接続一覧の取得（デバッグ用）

use std::sync::Arc;

use crate::domain::{ConnectedUser, ConnectionRegistry};

/// 接続一覧取得のユースケース
pub struct GetConnectionsUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetConnectionsUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// user id 順の接続一覧
    pub async fn execute(&self) -> Vec<ConnectedUser> {
        self.registry.snapshot().await
    }
}
