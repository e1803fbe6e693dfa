use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Eligibility, Gender, MatchId, MatchSpec, Participant, Visibility};

/// Request to create a match.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMatchRequest {
    #[validate(length(min = 1))]
    pub court: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub time: String,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
    pub capacity: u8,
    #[serde(alias = "price_per_person", rename = "pricePerPerson")]
    pub price_per_person: i64,
    #[serde(default)]
    pub eligibility: Eligibility,
    /// Set when the creator joins their own match on creation.
    #[serde(rename = "creatorJoins", default)]
    pub creator_joins: bool,
}

fn default_visibility() -> Visibility {
    Visibility::Public
}

impl From<CreateMatchRequest> for MatchSpec {
    fn from(req: CreateMatchRequest) -> Self {
        MatchSpec {
            court: req.court,
            city: req.city,
            time: req.time,
            visibility: req.visibility,
            capacity: req.capacity,
            price_per_person: req.price_per_person,
            eligibility: req.eligibility,
            initial_occupancy: if req.creator_joins { 1 } else { 0 },
        }
    }
}

/// Participant payload carried by join/leave requests. Session state
/// lives client-side, so the membership set travels with the request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ParticipantRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    pub ranking: i32,
    pub age: u8,
    pub gender: Gender,
    #[serde(alias = "joined_match_ids", rename = "joinedMatchIds", default)]
    pub joined_match_ids: HashSet<MatchId>,
}

impl From<ParticipantRequest> for Participant {
    fn from(req: ParticipantRequest) -> Self {
        Participant {
            user_id: req.user_id,
            ranking: req.ranking,
            age: req.age,
            gender: req.gender,
            joined_match_ids: req.joined_match_ids,
        }
    }
}

/// Request to assign a physical court to a filled match.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignCourtRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "court_number", rename = "courtNumber")]
    pub court_number: u16,
}

/// Query parameters for the match listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMatchesQuery {
    pub visibility: Option<Visibility>,
    pub city: Option<String>,
}

/// Query parameters for the schedule summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleQuery {
    /// Opaque day selector; the catalogue currently spans a single day.
    pub date: Option<String>,
    /// Court name, `None` meaning all courts.
    pub court: Option<String>,
}
