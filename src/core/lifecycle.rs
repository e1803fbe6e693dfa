use thiserror::Error;

use crate::core::eligibility::{self, DenyReason};
use crate::core::registry::{MatchRegistry, RegistryError};
use crate::models::{Match, MatchId, MatchSpec, Participant, Severity, Visibility};

/// Occupancy at which the owner is prompted to assign a physical
/// court. Fixed independently of capacity; the source app prompts at
/// five players regardless of match size.
pub const DEFAULT_ASSIGNMENT_THRESHOLD: u8 = 5;

/// Match sizes the booking flow supports (5v3 does not exist).
pub const SUPPORTED_CAPACITIES: [u8; 4] = [6, 8, 10, 12];

/// Tunables for the lifecycle state machine.
#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    pub assignment_threshold: u8,
    pub supported_capacities: Vec<u8>,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            assignment_threshold: DEFAULT_ASSIGNMENT_THRESHOLD,
            supported_capacities: SUPPORTED_CAPACITIES.to_vec(),
        }
    }
}

/// Events emitted by lifecycle operations for the caller to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A user-facing message to enqueue.
    Notify { message: String, severity: Severity },
    /// The match just reached the assignment threshold; the operator
    /// should be prompted to bind a court. Fire-and-forget.
    AssignmentRequired { match_id: MatchId },
}

impl LifecycleEvent {
    fn notify(message: String, severity: Severity) -> Self {
        LifecycleEvent::Notify { message, severity }
    }
}

/// Errors returned by lifecycle operations. All are recoverable,
/// caller-facing failures; none are partially applied.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("participant {0} has already joined this match")]
    AlreadyJoined(String),

    #[error("participant {0} is not a member of this match")]
    NotJoined(String),

    #[error("join denied: {0}")]
    Denied(#[from] DenyReason),
}

/// Result of a successful lifecycle operation: the updated match plus
/// the events it produced, in emission order.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub match_state: Match,
    pub events: Vec<LifecycleEvent>,
}

impl Outcome {
    /// Whether this operation crossed the assignment threshold.
    pub fn assignment_required(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, LifecycleEvent::AssignmentRequired { .. }))
    }
}

/// The state machine driving a match through its states.
///
/// Owns the registry; every operation validates first and mutates only
/// after all checks pass, returning the new state plus emitted events
/// rather than touching any ambient state.
#[derive(Debug, Default)]
pub struct MatchLifecycle {
    registry: MatchRegistry,
    settings: LifecycleSettings,
}

impl MatchLifecycle {
    pub fn new(settings: LifecycleSettings) -> Self {
        Self {
            registry: MatchRegistry::new(),
            settings,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(LifecycleSettings::default())
    }

    pub fn registry(&self) -> &MatchRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &LifecycleSettings {
        &self.settings
    }

    /// Create a match. Capacity must be one of the supported sizes;
    /// private matches receive a share token instead of being listed
    /// publicly.
    pub fn create(&mut self, spec: MatchSpec) -> Result<Outcome, LifecycleError> {
        if !self.settings.supported_capacities.contains(&spec.capacity) {
            return Err(RegistryError::InvalidSpec(format!(
                "capacity {} is not supported (expected one of {:?})",
                spec.capacity, self.settings.supported_capacities
            ))
            .into());
        }

        let m = self.registry.create(spec)?;

        let message = match m.visibility {
            Visibility::Private => format!(
                "Private match created at {} {} — share token {}",
                m.court,
                m.time,
                m.share_token.as_deref().unwrap_or_default()
            ),
            Visibility::Public => {
                format!("Match created at {} {}", m.court, m.time)
            }
        };

        tracing::info!("Created match {} ({:?}, capacity {})", m.id, m.visibility, m.capacity);

        Ok(Outcome {
            match_state: m,
            events: vec![LifecycleEvent::notify(message, Severity::Success)],
        })
    }

    /// Join a participant to a match.
    ///
    /// Fails without mutation on an unknown match, a repeat join, or an
    /// eligibility denial. On success the occupancy increment and the
    /// membership insert happen together, and crossing the assignment
    /// threshold raises `AssignmentRequired` exactly once.
    pub fn join(
        &mut self,
        match_id: MatchId,
        participant: &mut Participant,
    ) -> Result<Outcome, LifecycleError> {
        let m = self.registry.get(match_id)?;

        if participant.has_joined(match_id) {
            return Err(LifecycleError::AlreadyJoined(participant.user_id.clone()));
        }

        eligibility::evaluate(m, participant)?;

        let updated = self.registry.mutate_occupancy(match_id, 1)?;
        participant.joined_match_ids.insert(match_id);

        let mut events = vec![LifecycleEvent::notify(
            format!(
                "Joined {} at {} ({}/{} players)",
                updated.court, updated.time, updated.occupancy, updated.capacity
            ),
            Severity::Success,
        )];

        // Equality, not >=: the signal fires on the crossing join only.
        if updated.occupancy == self.settings.assignment_threshold {
            tracing::info!(
                "Match {} reached {} players, assignment required",
                match_id,
                updated.occupancy
            );
            events.push(LifecycleEvent::AssignmentRequired { match_id });
        }

        tracing::debug!(
            "Participant {} joined match {} ({}/{})",
            participant.user_id,
            match_id,
            updated.occupancy,
            updated.capacity
        );

        Ok(Outcome {
            match_state: updated,
            events,
        })
    }

    /// Remove a participant from a match. A leave by a non-member is a
    /// no-op failure (`NotJoined`), never a negative occupancy.
    pub fn leave(
        &mut self,
        match_id: MatchId,
        participant: &mut Participant,
    ) -> Result<Outcome, LifecycleError> {
        self.registry.get(match_id)?;

        if !participant.joined_match_ids.remove(&match_id) {
            return Err(LifecycleError::NotJoined(participant.user_id.clone()));
        }

        let updated = self.registry.mutate_occupancy(match_id, -1)?;

        tracing::debug!(
            "Participant {} left match {} ({}/{})",
            participant.user_id,
            match_id,
            updated.occupancy,
            updated.capacity
        );

        Ok(Outcome {
            events: vec![LifecycleEvent::notify(
                format!(
                    "Left {} at {} ({}/{} players)",
                    updated.court, updated.time, updated.occupancy, updated.capacity
                ),
                Severity::Info,
            )],
            match_state: updated,
        })
    }

    /// Bind a physical court to the match. One-way: the match is
    /// Reserved afterwards and re-assignment is rejected.
    pub fn assign_court(
        &mut self,
        match_id: MatchId,
        court_number: u16,
    ) -> Result<Outcome, LifecycleError> {
        let updated = self.registry.assign_court(match_id, court_number)?;

        tracing::info!("Match {} assigned to court {}", match_id, court_number);

        Ok(Outcome {
            events: vec![LifecycleEvent::notify(
                format!(
                    "Court {} assigned for {} at {}",
                    court_number, updated.court, updated.time
                ),
                Severity::Success,
            )],
            match_state: updated,
        })
    }
}
