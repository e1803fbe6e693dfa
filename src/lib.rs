//! Cancha Engine - Match lifecycle engine for the Cancha court booking app
//!
//! This library drives a match (a bookable group activity on a court at a
//! time slot) through its lifecycle: creation, eligibility-checked joins
//! and leaves, capacity-derived status, court assignment, and the
//! notifications and assignment signals those operations emit.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    evaluate, DenyReason, LifecycleError, LifecycleEvent, LifecycleSettings, MatchLifecycle,
    MatchRegistry, Outcome, RegistryError,
};
pub use models::{
    Eligibility, Match, MatchId, MatchSpec, MatchStatus, Notification, Participant,
    ScheduleSummary, Severity, TimeSlot, Visibility,
};
pub use services::NotificationQueue;
