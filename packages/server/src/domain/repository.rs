//! Repository trait 定義
//!
//! ドメイン層が必要とする外部ストア（ハザード記録・写真）のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{HazardRecord, NewHazard},
    error::{BlobError, RepositoryError},
    geo::Coordinate,
    value_object::{HazardId, HazardType, Timestamp},
};

/// Hazard Repository trait
///
/// ストアはコアから見て結果整合（eventually consistent）として扱います。
/// レコードの削除はこの trait の責務ではありません。
#[async_trait]
pub trait HazardRepository: Send + Sync {
    /// 同一種別・`since` 以降に作成・`coordinate` から `max_distance_m` 以内のレコードを 1 件返す
    ///
    /// 候補が複数ある場合は最も近いもの。距離が同じなら `created_at` が古いもの、
    /// それも同じなら id が小さいものを選ぶ。
    async fn find_duplicate(
        &self,
        hazard_type: &HazardType,
        coordinate: &Coordinate,
        since: Timestamp,
        max_distance_m: f64,
    ) -> Result<Option<HazardRecord>, RepositoryError>;

    /// 報告カウンタを 1 増やし、`last_reported_at` を `now` に更新する
    ///
    /// カウンタが `verify_threshold` 以上になれば verified にする。
    /// 全ての更新は 1 つの操作としてアトミックに行われる。
    async fn increment(
        &self,
        id: &HazardId,
        now: Timestamp,
        verify_threshold: u32,
    ) -> Result<HazardRecord, RepositoryError>;

    /// 新しいレコードを保存する（count=1, verified=false）
    async fn create(&self, hazard: NewHazard) -> Result<HazardRecord, RepositoryError>;

    /// 作成済みレコードに写真の参照を付ける
    async fn attach_photo(
        &self,
        id: &HazardId,
        photo_url: String,
    ) -> Result<HazardRecord, RepositoryError>;

    /// 保存済みレコード数
    async fn count(&self) -> Result<usize, RepositoryError>;
}

/// 写真などのバイナリを保存し、参照（公開パス）を返すストア
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn store(&self, hazard_id: &HazardId, bytes: Vec<u8>) -> Result<String, BlobError>;
}
