//! UseCase: 位置情報の更新
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateLocationUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 更新後の位置が近傍検索に使われることを保証
//! - 位置が無い更新は無視され、ack も返らないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：位置の更新と location_ack
//! - エッジケース：座標なしの更新、未接続ユーザーの更新

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, Coordinate, PushMessage, UserId};

/// 位置更新のユースケース
pub struct UpdateLocationUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl UpdateLocationUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 最終位置を上書きし、location_ack を返す
    ///
    /// `location` が `None` の場合は何もしない。
    pub async fn execute(&self, user_id: &UserId, location: Option<Coordinate>) {
        let Some(location) = location else {
            tracing::debug!("Ignoring location update without coordinates from '{}'", user_id);
            return;
        };

        if self.registry.update_location(user_id, location).await {
            tracing::debug!(
                "Location of '{}' updated to ({}, {})",
                user_id,
                location.latitude,
                location.longitude
            );
            self.registry.send(user_id, &PushMessage::LocationAck).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::ProximityQuery,
        infrastructure::{dto::websocket::ServerMessage, registry::InMemoryConnectionRegistry},
    };
    use roadsafe_shared::time::FixedClock;
    use tokio::sync::mpsc;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn setup() -> (Arc<InMemoryConnectionRegistry>, UpdateLocationUseCase) {
        let registry = Arc::new(InMemoryConnectionRegistry::new(Arc::new(FixedClock::new(0))));
        let usecase = UpdateLocationUseCase::new(registry.clone());
        (registry, usecase)
    }

    fn query_at(lat: f64, lon: f64) -> ProximityQuery {
        ProximityQuery {
            center: Coordinate::new(lat, lon).unwrap(),
            radius_m: 5_000.0,
            exclude: user("reporter"),
        }
    }

    #[tokio::test]
    async fn test_update_location_acks_and_is_used_by_queries() {
        // テスト項目: 位置更新で location_ack が届き、最新の位置が近傍検索に使われる
        // given (前提条件):
        let (registry, usecase) = setup();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.connect(user("bob"), tx).await;

        // when (操作):
        usecase
            .execute(&user("bob"), Some(Coordinate::new(10.0, 10.0).unwrap()))
            .await;
        usecase
            .execute(&user("bob"), Some(Coordinate::new(37.0, -122.0).unwrap()))
            .await;

        // then (期待する結果):
        let ack = serde_json::from_str::<ServerMessage>(&rx.recv().await.unwrap()).unwrap();
        assert!(matches!(ack, ServerMessage::LocationAck(ref s) if s.status == "ok"));
        assert!(registry.find_nearby(&query_at(10.0, 10.0)).await.is_empty());
        assert_eq!(registry.find_nearby(&query_at(37.0, -122.0)).await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_without_coordinates_is_ignored() {
        // テスト項目: 座標なしの更新は位置を変えず、ack も返さない
        // given (前提条件):
        let (registry, usecase) = setup();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.connect(user("bob"), tx).await;

        // when (操作):
        usecase.execute(&user("bob"), None).await;

        // then (期待する結果):
        assert!(rx.try_recv().is_err());
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot[0].location, None);
    }

    #[tokio::test]
    async fn test_update_for_unknown_user_does_nothing() {
        // テスト項目: 未接続ユーザーの位置更新はエントリを作らない
        // given (前提条件):
        let (registry, usecase) = setup();

        // when (操作):
        usecase
            .execute(&user("ghost"), Some(Coordinate::new(37.0, -122.0).unwrap()))
            .await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 0);
    }
}
