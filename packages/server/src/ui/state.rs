//! Shared application state.

use std::sync::Arc;

use roadsafe_shared::time::Clock;

use crate::{
    domain::{BlobStore, ConnectionRegistry, HazardPolicy, HazardRepository, TokenVerifier},
    usecase::{
        ConnectUserUseCase, DisconnectUserUseCase, DispatchHazardAlertUseCase,
        GetConnectionsUseCase, GetStatsUseCase, HazardDeduplicator, ReportHazardUseCase,
        UpdateLocationUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectUserUseCase（認証と接続のユースケース）
    pub connect_user_usecase: Arc<ConnectUserUseCase>,
    /// DisconnectUserUseCase（切断のユースケース）
    pub disconnect_user_usecase: Arc<DisconnectUserUseCase>,
    /// UpdateLocationUseCase（位置更新のユースケース）
    pub update_location_usecase: Arc<UpdateLocationUseCase>,
    /// ReportHazardUseCase（ハザード報告のユースケース）
    pub report_hazard_usecase: Arc<ReportHazardUseCase>,
    /// GetStatsUseCase（統計取得のユースケース）
    pub get_stats_usecase: Arc<GetStatsUseCase>,
    /// GetConnectionsUseCase（接続一覧取得のユースケース）
    pub get_connections_usecase: Arc<GetConnectionsUseCase>,
    /// エラー応答をソケットへ送るためのレジストリ
    pub registry: Arc<dyn ConnectionRegistry>,
}

impl AppState {
    /// Wire every use case from the collaborators.
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        repository: Arc<dyn HazardRepository>,
        blob_store: Arc<dyn BlobStore>,
        verifier: Arc<dyn TokenVerifier>,
        clock: Arc<dyn Clock>,
        policy: HazardPolicy,
    ) -> Self {
        let deduplicator = Arc::new(HazardDeduplicator::new(
            repository.clone(),
            blob_store,
            clock,
            policy,
        ));
        let dispatcher = Arc::new(DispatchHazardAlertUseCase::new(registry.clone(), &policy));

        Self {
            connect_user_usecase: Arc::new(ConnectUserUseCase::new(verifier, registry.clone())),
            disconnect_user_usecase: Arc::new(DisconnectUserUseCase::new(registry.clone())),
            update_location_usecase: Arc::new(UpdateLocationUseCase::new(registry.clone())),
            report_hazard_usecase: Arc::new(ReportHazardUseCase::new(
                deduplicator,
                dispatcher,
                registry.clone(),
            )),
            get_stats_usecase: Arc::new(GetStatsUseCase::new(repository, registry.clone())),
            get_connections_usecase: Arc::new(GetConnectionsUseCase::new(registry.clone())),
            registry,
        }
    }
}
