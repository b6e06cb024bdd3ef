//! Port definitions for the application layer
//!
//! Ports are the interfaces behind which the external collaborators live:
//! the platform's data store, the notification transport, and the
//! notification log. Adapters in the infrastructure layer implement them.

mod notification;
mod notification_log;
mod platform_repository;

pub use notification::{DigestKind, NotificationPort};
#[cfg(test)]
pub use notification::MockNotificationPort;
#[cfg(test)]
pub use notification_log::MockNotificationLogPort;
pub use notification_log::NotificationLogPort;
#[cfg(test)]
pub use platform_repository::MockPlatformRepository;
pub use platform_repository::PlatformRepository;
