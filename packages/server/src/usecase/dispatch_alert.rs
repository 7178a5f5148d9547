//! UseCase: ハザードアラートの配信（BroadcastDispatcher）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DispatchHazardAlertUseCase::execute() メソッド
//! - 半径 5 km 以内の接続ユーザーへのアラート送信と、報告者の除外
//!
//! ### なぜこのテストが必要か
//! - 報告者自身にアラートが届かないことを保証
//! - 切断済みユーザーに送信されないことを保証
//! - 送信失敗が他の宛先への配信を止めないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：半径内の複数ユーザーへの配信
//! - エッジケース：報告者だけが半径内にいる場合（配信対象なし）
//! - 異常系：一部の宛先のチャンネルが閉じている

use std::sync::Arc;

use crate::domain::{
    ConnectionRegistry, HazardAlert, HazardPolicy, HazardRecord, ProximityQuery, PushMessage,
    UserId,
};

/// ハザードアラート配信のユースケース
pub struct DispatchHazardAlertUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    alert_radius_m: f64,
}

impl DispatchHazardAlertUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, policy: &HazardPolicy) -> Self {
        Self {
            registry,
            alert_radius_m: policy.alert_radius_m,
        }
    }

    /// ハザード周辺の接続ユーザーにアラートを送信
    ///
    /// # Arguments
    ///
    /// * `hazard` - 配信するハザード
    /// * `reporter_id` - 報告者（配信対象から除外）
    ///
    /// # Returns
    ///
    /// 送信を試みたユーザーの ID リスト。届かなかった送信の再試行は行わない。
    pub async fn execute(&self, hazard: &HazardRecord, reporter_id: &UserId) -> Vec<UserId> {
        let query = ProximityQuery {
            center: hazard.coordinate,
            radius_m: self.alert_radius_m,
            exclude: reporter_id.clone(),
        };

        let matches = self.registry.find_nearby(&query).await;

        let mut notified = Vec::with_capacity(matches.len());
        for m in matches {
            let alert = PushMessage::HazardAlert(HazardAlert::new(hazard, m.distance_m));
            self.registry.send(&m.user_id, &alert).await;
            notified.push(m.user_id);
        }

        tracing::info!(
            "Hazard '{}' ({}) dispatched to {} nearby user(s)",
            hazard.id,
            hazard.hazard_type.as_str(),
            notified.len()
        );

        notified
    }
}
