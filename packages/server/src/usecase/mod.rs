//! UseCase 層
//!
//! Domain のインターフェース（trait）だけに依存し、アプリケーションの
//! 操作を実装します。

pub mod connect_user;
pub mod deduplicate_hazard;
pub mod disconnect_user;
pub mod dispatch_alert;
pub mod error;
pub mod get_connections;
pub mod get_stats;
pub mod report_hazard;
pub mod update_location;

pub use connect_user::ConnectUserUseCase;
pub use deduplicate_hazard::{DedupOutcome, HazardDeduplicator};
pub use disconnect_user::DisconnectUserUseCase;
pub use dispatch_alert::DispatchHazardAlertUseCase;
pub use error::{ConnectError, GetStatsError, ReportHazardError};
pub use get_connections::GetConnectionsUseCase;
pub use get_stats::{GetStatsUseCase, Stats};
pub use report_hazard::ReportHazardUseCase;
pub use update_location::UpdateLocationUseCase;
