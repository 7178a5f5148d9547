//! RoadSafe hazard alert server.
//!
//! Connected drivers stream their location over a WebSocket; a hazard report
//! is deduplicated against recent nearby reports of the same type and, when
//! new, pushed to every other driver within the alert radius.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
