//! RoadSafe field client.
//!
//! Connects to the hazard alert server with a bearer token, sends position
//! updates and hazard reports typed at the prompt, and prints alerts for
//! hazards reported nearby. Reconnects on connection loss (max 5 attempts
//! with 5 second interval); a rejected token exits immediately.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roadsafe-client -- --token <jwt>
//! ROADSAFE_TOKEN=<jwt> cargo run --bin roadsafe-client -- -u ws://10.0.0.2:8080/ws
//! ```

use clap::Parser;

use roadsafe_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "roadsafe-client")]
#[command(about = "Field client for the RoadSafe hazard alert server", long_about = None)]
struct Args {
    /// Bearer token issued for this driver
    #[arg(short = 't', long, env = "ROADSAFE_TOKEN", hide_env_values = true)]
    token: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = roadsafe_client::run_client(args.url, args.token).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
