//! RoadSafe field client.
//!
//! Streams the driver's position to the server, submits hazard reports typed
//! at a prompt and prints alerts pushed for nearby hazards.

pub mod command;
pub mod domain;
pub mod error;
pub mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
