//! Persistence adapters

mod memory_platform;

pub use memory_platform::InMemoryPlatform;
