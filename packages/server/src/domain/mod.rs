//! Domain layer: value objects, entities, geometry and the collaborator
//! traits the use cases depend on.
//!
//! Concrete implementations of the traits live in the infrastructure layer.

pub mod auth;
pub mod entity;
pub mod error;
pub mod geo;
pub mod message;
pub mod photo;
pub mod policy;
pub mod proximity;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use auth::TokenVerifier;
pub use entity::{ConnectedUser, HazardRecord, HazardReport, NewHazard};
pub use error::{AuthError, BlobError, PushError, RepositoryError, ValueObjectError};
pub use geo::{Coordinate, EARTH_RADIUS_M, distance};
pub use message::{ErrorCode, ErrorNotice, HazardAck, HazardAlert, PushMessage};
pub use photo::decode_base64_photo;
pub use policy::HazardPolicy;
pub use proximity::{ProximityMatch, ProximityQuery};
pub use registry::{ConnectionRegistry, PusherChannel};
pub use repository::{BlobStore, HazardRepository};
pub use value_object::{ConnectionId, HazardId, HazardType, Timestamp, UserId};
