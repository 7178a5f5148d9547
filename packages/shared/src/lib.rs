//! Utilities shared by the RoadSafe server and client binaries.

pub mod logger;
pub mod time;
