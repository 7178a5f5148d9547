//! UseCase: ハザード報告の受付
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReportHazardUseCase::execute() / execute_from_socket() メソッド
//! - 新規作成時のみアラートが配信され、マージ時は報告者への ack のみ
//!
//! ### なぜこのテストが必要か
//! - 重複報告で周辺ユーザーに同じアラートが何度も届かないことを保証
//! - ストア障害が WebSocket では error メッセージとして報告者に返ることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規作成 → 配信 → ack、重複 → マージ ack
//! - 異常系：ストア障害

use std::sync::Arc;

use crate::{
    domain::{
        ConnectionRegistry, ErrorCode, ErrorNotice, HazardAck, HazardReport, PushMessage, UserId,
    },
    usecase::{
        deduplicate_hazard::{DedupOutcome, HazardDeduplicator},
        dispatch_alert::DispatchHazardAlertUseCase,
        error::ReportHazardError,
    },
};

/// ハザード報告のユースケース
pub struct ReportHazardUseCase {
    deduplicator: Arc<HazardDeduplicator>,
    dispatcher: Arc<DispatchHazardAlertUseCase>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl ReportHazardUseCase {
    pub fn new(
        deduplicator: Arc<HazardDeduplicator>,
        dispatcher: Arc<DispatchHazardAlertUseCase>,
        registry: Arc<dyn ConnectionRegistry>,
    ) -> Self {
        Self {
            deduplicator,
            dispatcher,
            registry,
        }
    }

    /// 報告を処理し、報告者向けの ack を返す（HTTP 経由）
    ///
    /// 新しいレコードが作成された場合のみ周辺ユーザーへ配信する。
    pub async fn execute(
        &self,
        reporter_id: &UserId,
        report: HazardReport,
    ) -> Result<HazardAck, ReportHazardError> {
        let outcome = self.deduplicator.execute(reporter_id, report).await?;

        let ack = match outcome {
            DedupOutcome::Merged(record) => HazardAck::Merged {
                hazard_id: record.id,
                photo_url: record.photo_url,
            },
            DedupOutcome::Created(record) => {
                let notified = self.dispatcher.execute(&record, reporter_id).await;
                HazardAck::Broadcasted {
                    hazard_id: record.id,
                    photo_url: record.photo_url,
                    notified_users: notified.len(),
                }
            }
        };

        Ok(ack)
    }

    /// WebSocket 経由の報告を処理し、結果を報告者のソケットに送る
    ///
    /// ストア障害は `store_failure` エラーとして返し、接続は維持する。
    pub async fn execute_from_socket(&self, reporter_id: &UserId, report: HazardReport) {
        let reply = match self.execute(reporter_id, report).await {
            Ok(ack) => PushMessage::HazardAck(ack),
            Err(e) => {
                tracing::error!("Failed to process hazard report from '{}': {}", reporter_id, e);
                PushMessage::Error(ErrorNotice {
                    code: ErrorCode::StoreFailure,
                    message: "hazard store unavailable".to_string(),
                })
            }
        };
        self.registry.send(reporter_id, &reply).await;
    }
}
