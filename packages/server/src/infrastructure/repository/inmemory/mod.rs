//! In-memory repository implementations.

pub mod hazard;

pub use hazard::InMemoryHazardRepository;
