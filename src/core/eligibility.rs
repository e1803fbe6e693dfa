use thiserror::Error;

use crate::models::{Match, Participant};

/// Reasons a participant may be denied entry to a match.
///
/// Variant order matches check order: capacity is checked first because
/// "full" is the most common rejection and must dominate messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DenyReason {
    #[error("match is full")]
    Full,

    #[error("ranking is below the match minimum")]
    RankingTooLow,

    #[error("age is outside the allowed range")]
    AgeOutOfRange,

    #[error("match is restricted to another gender")]
    GenderMismatch,
}

/// Decide whether a participant may join a match.
///
/// Pure predicate, short-circuiting on the first failed check:
/// capacity, then ranking, then age bounds, then gender.
pub fn evaluate(m: &Match, participant: &Participant) -> Result<(), DenyReason> {
    if m.occupancy >= m.capacity {
        return Err(DenyReason::Full);
    }

    if participant.ranking < m.eligibility.min_ranking {
        return Err(DenyReason::RankingTooLow);
    }

    if let Some(min_age) = m.eligibility.min_age {
        if participant.age < min_age {
            return Err(DenyReason::AgeOutOfRange);
        }
    }
    if let Some(max_age) = m.eligibility.max_age {
        if participant.age > max_age {
            return Err(DenyReason::AgeOutOfRange);
        }
    }

    if !m.eligibility.gender.admits(participant.gender) {
        return Err(DenyReason::GenderMismatch);
    }

    Ok(())
}
