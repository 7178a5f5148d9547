//! Infrastructure layer: concrete implementations of the domain's
//! collaborator traits, and the wire DTOs.

pub mod auth;
pub mod blob;
pub mod dto;
pub mod registry;
pub mod repository;
