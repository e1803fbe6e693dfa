// Service exports
pub mod notifications;

pub use notifications::{NotificationQueue, DEFAULT_TTL};
