use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Match, MatchId, MatchSpec, MatchStatus, Visibility};

/// Errors returned by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("match {0} not found")]
    NotFound(MatchId),

    #[error("invalid match spec: {0}")]
    InvalidSpec(String),

    #[error("match {0} already has court {1} assigned")]
    AlreadyAssigned(MatchId, u16),
}

/// Owner of all match records. Single writer per id; callers hold the
/// registry behind a lock and mutate through these methods only.
#[derive(Debug, Default)]
pub struct MatchRegistry {
    matches: HashMap<MatchId, Match>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new match. Occupancy starts at the spec's initial
    /// occupancy (0 for open slots, 1 when the creator auto-joins) and
    /// status is derived from it.
    pub fn create(&mut self, spec: MatchSpec) -> Result<Match, RegistryError> {
        if spec.capacity == 0 {
            return Err(RegistryError::InvalidSpec(
                "capacity must be positive".to_string(),
            ));
        }
        if spec.price_per_person < 0 {
            return Err(RegistryError::InvalidSpec(
                "price per person cannot be negative".to_string(),
            ));
        }
        if spec.initial_occupancy > spec.capacity {
            return Err(RegistryError::InvalidSpec(format!(
                "initial occupancy {} exceeds capacity {}",
                spec.initial_occupancy, spec.capacity
            )));
        }

        let id = Uuid::new_v4();
        let share_token = match spec.visibility {
            Visibility::Private => Some(Match::derive_share_token(id)),
            Visibility::Public => None,
        };

        let mut m = Match {
            id,
            court: spec.court,
            city: spec.city,
            time: spec.time,
            visibility: spec.visibility,
            capacity: spec.capacity,
            occupancy: spec.initial_occupancy,
            price_per_person: spec.price_per_person,
            status: MatchStatus::Active,
            eligibility: spec.eligibility,
            assigned_court_number: None,
            share_token,
            created_at: chrono::Utc::now(),
        };
        m.recompute_status();

        tracing::debug!("Created match {} at {} {}", m.id, m.court, m.time);

        self.matches.insert(id, m.clone());
        Ok(m)
    }

    pub fn get(&self, id: MatchId) -> Result<&Match, RegistryError> {
        self.matches.get(&id).ok_or(RegistryError::NotFound(id))
    }

    /// Apply an occupancy delta, clamped to `[0, capacity]`, and
    /// re-derive the status. Returns the updated match.
    pub fn mutate_occupancy(&mut self, id: MatchId, delta: i32) -> Result<Match, RegistryError> {
        let m = self
            .matches
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))?;

        let next = (m.occupancy as i32 + delta).clamp(0, m.capacity as i32);
        m.occupancy = next as u8;
        m.recompute_status();

        Ok(m.clone())
    }

    /// Administrative override (Locked/Reserved). Occupancy is untouched.
    pub fn set_status(&mut self, id: MatchId, status: MatchStatus) -> Result<Match, RegistryError> {
        if !status.is_override() {
            return Err(RegistryError::InvalidSpec(format!(
                "status {:?} is derived, not an administrative override",
                status
            )));
        }

        let m = self
            .matches
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))?;
        m.status = status;

        Ok(m.clone())
    }

    /// Bind a physical court to the match, once. Re-assignment is
    /// rejected with the first court number intact.
    pub fn assign_court(&mut self, id: MatchId, court_number: u16) -> Result<Match, RegistryError> {
        let m = self
            .matches
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))?;

        if let Some(existing) = m.assigned_court_number {
            return Err(RegistryError::AlreadyAssigned(id, existing));
        }

        m.assigned_court_number = Some(court_number);
        m.status = MatchStatus::Reserved;

        tracing::debug!("Assigned court {} to match {}", court_number, id);

        Ok(m.clone())
    }

    /// Snapshot of all matches, for listings and projections.
    pub fn snapshot(&self) -> Vec<Match> {
        self.matches.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.values()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
