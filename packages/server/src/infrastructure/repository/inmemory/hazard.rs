//! InMemory Hazard Repository 実装
//!
//! ドメイン層が定義する HazardRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。

use std::{cmp::Ordering, collections::HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Coordinate, HazardId, HazardRecord, HazardRepository, HazardType, NewHazard, RepositoryError,
    Timestamp, distance,
};

/// インメモリ Hazard Repository 実装
#[derive(Default)]
pub struct InMemoryHazardRepository {
    hazards: Mutex<HashMap<HazardId, HazardRecord>>,
}

impl InMemoryHazardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト・デバッグ用: id でレコードを取得
    pub async fn get(&self, id: &HazardId) -> Option<HazardRecord> {
        self.hazards.lock().await.get(id).cloned()
    }
}

/// Nearest first; ties go to the older record, then the smaller id.
fn candidate_order(a: &(f64, &HazardRecord), b: &(f64, &HazardRecord)) -> Ordering {
    a.0.total_cmp(&b.0)
        .then_with(|| a.1.created_at.cmp(&b.1.created_at))
        .then_with(|| a.1.id.cmp(&b.1.id))
}

#[async_trait]
impl HazardRepository for InMemoryHazardRepository {
    async fn find_duplicate(
        &self,
        hazard_type: &HazardType,
        coordinate: &Coordinate,
        since: Timestamp,
        max_distance_m: f64,
    ) -> Result<Option<HazardRecord>, RepositoryError> {
        let hazards = self.hazards.lock().await;

        let nearest = hazards
            .values()
            .filter(|h| &h.hazard_type == hazard_type && h.created_at >= since)
            .map(|h| (distance(coordinate, &h.coordinate), h))
            .filter(|(d, _)| *d <= max_distance_m)
            .min_by(candidate_order)
            .map(|(_, h)| h.clone());

        Ok(nearest)
    }

    async fn increment(
        &self,
        id: &HazardId,
        now: Timestamp,
        verify_threshold: u32,
    ) -> Result<HazardRecord, RepositoryError> {
        let mut hazards = self.hazards.lock().await;
        let record = hazards
            .get_mut(id)
            .ok_or_else(|| RepositoryError::HazardNotFound(id.as_str().to_string()))?;

        record.register_report(now, verify_threshold);

        Ok(record.clone())
    }

    async fn create(&self, hazard: NewHazard) -> Result<HazardRecord, RepositoryError> {
        let record = HazardRecord::from(hazard);
        let mut hazards = self.hazards.lock().await;
        hazards.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn attach_photo(
        &self,
        id: &HazardId,
        photo_url: String,
    ) -> Result<HazardRecord, RepositoryError> {
        let mut hazards = self.hazards.lock().await;
        let record = hazards
            .get_mut(id)
            .ok_or_else(|| RepositoryError::HazardNotFound(id.as_str().to_string()))?;

        record.photo_url = Some(photo_url);

        Ok(record.clone())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.hazards.lock().await.len())
    }
}
