//! Real-time road hazard alert server.
//!
//! Run with:
//! ```not_rust
//! ROADSAFE_JWT_SECRET=secret cargo run --bin roadsafe-server
//! cargo run --bin roadsafe-server -- --host 0.0.0.0 --port 3000 --jwt-secret secret
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use roadsafe_server::{
    domain::{HazardPolicy, policy},
    infrastructure::{
        auth::JwtTokenVerifier, blob::FileSystemBlobStore, registry::InMemoryConnectionRegistry,
        repository::InMemoryHazardRepository,
    },
    ui::{AppState, Server},
};
use roadsafe_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "roadsafe-server")]
#[command(about = "Real-time road hazard alert server", long_about = None)]
struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "ROADSAFE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "ROADSAFE_PORT", default_value = "8080")]
    port: u16,

    /// HS256 secret used to verify bearer tokens
    #[arg(long, env = "ROADSAFE_JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Directory where hazard photos are stored
    #[arg(long, env = "ROADSAFE_UPLOAD_DIR", default_value = "uploads")]
    upload_dir: String,

    /// Radius in meters within which connected users are alerted
    #[arg(long, default_value_t = policy::DEFAULT_ALERT_RADIUS_M)]
    alert_radius_m: f64,

    /// Reports of the same type closer than this are merged (meters)
    #[arg(long, default_value_t = policy::DEFAULT_MERGE_DISTANCE_M)]
    merge_distance_m: f64,

    /// Reports of the same type newer than this are merged (seconds)
    #[arg(long, default_value_t = policy::DEFAULT_MERGE_WINDOW.as_secs())]
    merge_window_secs: u64,

    /// Report count at which a hazard becomes verified
    #[arg(long, default_value_t = policy::DEFAULT_VERIFY_THRESHOLD)]
    verify_threshold: u32,
}

impl ServerConfig {
    fn policy(&self) -> HazardPolicy {
        HazardPolicy {
            alert_radius_m: self.alert_radius_m,
            merge_distance_m: self.merge_distance_m,
            merge_window: Duration::from_secs(self.merge_window_secs),
            verify_threshold: self.verify_threshold,
        }
    }
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::parse();
    let policy = config.policy();
    tracing::info!(
        "Alert radius {} m, merge within {} m / {} s, verified at {} reports",
        policy.alert_radius_m,
        policy.merge_distance_m,
        config.merge_window_secs,
        policy.verify_threshold
    );

    // 1. Collaborators
    let clock = Arc::new(SystemClock);
    let registry = Arc::new(InMemoryConnectionRegistry::new(clock.clone()));
    let repository = Arc::new(InMemoryHazardRepository::new());
    let blob_store = Arc::new(FileSystemBlobStore::new(&config.upload_dir));
    let verifier = Arc::new(JwtTokenVerifier::new(&config.jwt_secret));

    // 2. UseCases
    let state = AppState::new(registry, repository, blob_store, verifier, clock, policy);

    // 3. Server
    let server = Server::new(state, &config.upload_dir);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
