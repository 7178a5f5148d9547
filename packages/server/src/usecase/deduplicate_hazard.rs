//! UseCase: ハザード報告の重複判定とマージ（HazardDeduplicator）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - HazardDeduplicator::execute() メソッド
//! - 50 m / 2 分の窓内の同種別報告のマージ、count と verified の遷移
//!
//! ### なぜこのテストが必要か
//! - マージか新規作成かでアラート配信の有無が決まる
//! - verified は count が 3 に達した時点で一度だけ true になり、戻らない
//! - 同時に届いた重複報告が 2 件の新規レコードにならないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規作成、2 件目・3 件目・4 件目のマージ
//! - エッジケース：3 分後の報告、別種別の報告、同時報告
//! - 異常系：ストア障害、写真の保存失敗

use std::{collections::HashMap, sync::Arc};

use roadsafe_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    BlobStore, HazardId, HazardPolicy, HazardRecord, HazardReport, HazardRepository, HazardType,
    NewHazard, RepositoryError, Timestamp, UserId, decode_base64_photo,
};

/// 重複判定の結果
#[derive(Debug, Clone, PartialEq)]
pub enum DedupOutcome {
    /// 既存レコードにマージされた（更新後のレコード）
    Merged(HazardRecord),
    /// 新しいレコードが作成された
    Created(HazardRecord),
}

impl DedupOutcome {
    pub fn record(&self) -> &HazardRecord {
        match self {
            DedupOutcome::Merged(record) | DedupOutcome::Created(record) => record,
        }
    }
}

/// ハザード報告の重複判定とマージを行う
pub struct HazardDeduplicator {
    repository: Arc<dyn HazardRepository>,
    blob_store: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
    policy: HazardPolicy,
    /// 種別ごとの直列化ロック（検索から書き込みまでを保持）
    type_locks: Mutex<HashMap<HazardType, Arc<Mutex<()>>>>,
}

impl HazardDeduplicator {
    pub fn new(
        repository: Arc<dyn HazardRepository>,
        blob_store: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock>,
        policy: HazardPolicy,
    ) -> Self {
        Self {
            repository,
            blob_store,
            clock,
            policy,
            type_locks: Mutex::new(HashMap::new()),
        }
    }

    /// 報告をマージするか新規作成する
    ///
    /// 同じ種別の報告は検索から書き込みまで直列化されるため、
    /// 同時に届いた重複報告が両方とも新規作成されることはない。
    /// 写真の保存はロックを解放してから行う。
    pub async fn execute(
        &self,
        reporter_id: &UserId,
        mut report: HazardReport,
    ) -> Result<DedupOutcome, RepositoryError> {
        let photo = report.photo.take();
        let hazard_type = report.hazard_type.clone();

        let type_lock = self.lock_for(&hazard_type).await;
        let outcome = {
            let _guard = type_lock.lock().await;
            self.merge_or_create(reporter_id, report).await
        };
        self.release_lock(&hazard_type, type_lock).await;

        match (outcome?, photo) {
            (DedupOutcome::Created(record), Some(photo)) => Ok(DedupOutcome::Created(
                self.attach_photo(record, &photo).await,
            )),
            (outcome, _) => Ok(outcome),
        }
    }

    /// 種別ロックの保持中に呼ばれる
    async fn merge_or_create(
        &self,
        reporter_id: &UserId,
        report: HazardReport,
    ) -> Result<DedupOutcome, RepositoryError> {
        let now = Timestamp::new(self.clock.now_millis());
        let since = now.minus_millis(self.policy.merge_window_millis());

        // 1. 窓内の重複候補を検索
        let duplicate = self
            .repository
            .find_duplicate(
                &report.hazard_type,
                &report.coordinate,
                since,
                self.policy.merge_distance_m,
            )
            .await?;

        // 2. マージ
        if let Some(existing) = duplicate {
            let updated = self
                .repository
                .increment(&existing.id, now, self.policy.verify_threshold)
                .await?;
            tracing::info!(
                "Report from '{}' merged into hazard '{}' (count={}, verified={})",
                reporter_id,
                updated.id,
                updated.report_count,
                updated.verified
            );
            return Ok(DedupOutcome::Merged(updated));
        }

        // 3. 新規作成（写真はまだ付けない）
        let created = self
            .repository
            .create(NewHazard {
                id: HazardId::generate(),
                hazard_type: report.hazard_type,
                description: report.description,
                coordinate: report.coordinate,
                photo_url: None,
                reporter_id: reporter_id.clone(),
                reported_at: report.reported_at,
                created_at: now,
            })
            .await?;
        tracing::info!(
            "New hazard '{}' ({}) reported by '{}'",
            created.id,
            created.hazard_type.as_str(),
            reporter_id
        );

        Ok(DedupOutcome::Created(created))
    }

    async fn lock_for(&self, hazard_type: &HazardType) -> Arc<Mutex<()>> {
        let mut locks = self.type_locks.lock().await;
        locks.entry(hazard_type.clone()).or_default().clone()
    }

    /// 待っているタスクが他にいなければ種別ロックを破棄する
    async fn release_lock(&self, hazard_type: &HazardType, type_lock: Arc<Mutex<()>>) {
        let mut locks = self.type_locks.lock().await;
        drop(type_lock);
        if locks
            .get(hazard_type)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(hazard_type);
        }
    }

    /// 写真の保存に失敗しても報告自体は写真なしで受け付ける
    async fn attach_photo(&self, record: HazardRecord, encoded: &str) -> HazardRecord {
        let bytes = match decode_base64_photo(encoded) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Discarding photo for hazard '{}': {}", record.id, e);
                return record;
            }
        };
        let reference = match self.blob_store.store(&record.id, bytes).await {
            Ok(reference) => reference,
            Err(e) => {
                tracing::warn!("Discarding photo for hazard '{}': {}", record.id, e);
                return record;
            }
        };
        match self.repository.attach_photo(&record.id, reference).await {
            Ok(updated) => updated,
            Err(e) => {
                tracing::error!("Failed to attach photo to hazard '{}': {}", record.id, e);
                record
            }
        }
    }
}
