// Core lifecycle exports
pub mod eligibility;
pub mod lifecycle;
pub mod registry;
pub mod schedule;

pub use eligibility::{evaluate, DenyReason};
pub use lifecycle::{
    LifecycleError, LifecycleEvent, LifecycleSettings, MatchLifecycle, Outcome,
    DEFAULT_ASSIGNMENT_THRESHOLD, SUPPORTED_CAPACITIES,
};
pub use registry::{MatchRegistry, RegistryError};
pub use schedule::{
    filter_by_court, refresh_from_registry, summarize, DEFAULT_RESERVED_FLAT_RATE,
};
