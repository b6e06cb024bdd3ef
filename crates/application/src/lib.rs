//! Application layer - the digest job and its collaborator boundaries
//!
//! Contains the aggregation engine, the heartbeat throttle, the dispatch
//! orchestration, and the port definitions the infrastructure layer
//! implements.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
