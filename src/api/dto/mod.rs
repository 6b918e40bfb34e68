//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Links are returned as [`crate::domain::entities::Link`]
//! directly, since its JSON shape is the API contract.

pub mod health;
pub mod link;
