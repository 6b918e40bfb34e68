//! Core domain entities.
//!
//! The service has a single entity, [`Link`]; [`NewLink`] carries the fields
//! needed to insert one.

pub mod link;

pub use link::{Link, NewLink};
