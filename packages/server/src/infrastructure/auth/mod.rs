//! Token verification implementations.

pub mod jwt;

pub use jwt::{Claims, JwtTokenVerifier};
