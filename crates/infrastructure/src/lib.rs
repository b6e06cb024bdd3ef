//! Infrastructure layer - adapters for the digest job's collaborators
//!
//! Implements the ports defined in the application layer: the in-memory
//! platform store, the log-backed notification transport, configuration
//! loading, telemetry bootstrap, and the scheduled-task factory an external
//! scheduler drives.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod scheduled_tasks;
pub mod telemetry;

pub use adapters::TracingNotifier;
pub use config::{AppConfig, DigestConfig};
pub use persistence::InMemoryPlatform;
pub use scheduled_tasks::{MENTOR_HEARTBEAT_TASK, create_mentor_heartbeat_task};
pub use telemetry::{TelemetryConfig, init_telemetry};
