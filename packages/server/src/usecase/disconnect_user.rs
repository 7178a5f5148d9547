//! UseCase: ユーザー切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUserUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断でソケットと位置が同時に消えることを保証
//! - 置き換えられた古いセッションの後始末が、新しい接続を消さないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続中ユーザーの切断
//! - エッジケース：再接続後に古いセッションが終了する

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, UserId};

/// ユーザー切断のユースケース
pub struct DisconnectUserUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectUserUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// セッション終了時の後始末
    ///
    /// エントリが `connection_id` のものである場合に限り削除する。
    /// 戻り値は実際に削除したかどうか。
    pub async fn execute(&self, user_id: &UserId, connection_id: ConnectionId) -> bool {
        let removed = self
            .registry
            .disconnect_connection(user_id, connection_id)
            .await;
        if removed {
            tracing::info!(
                "User '{}' disconnected ({} active)",
                user_id,
                self.registry.count().await
            );
        } else {
            tracing::debug!(
                "Session {} of '{}' ended after being superseded",
                connection_id,
                user_id
            );
        }
        removed
    }
}
