//! Domain layer for MentorPulse
//!
//! Contains the mentoring platform's core vocabulary: entities, value
//! objects, and domain errors. This layer has no I/O and no external
//! collaborators.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
