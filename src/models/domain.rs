use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a match, unique and immutable once assigned.
pub type MatchId = Uuid;

/// Who can see and join a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

/// Match status. `Full` is derived from occupancy; `Locked` and
/// `Reserved` are administrative overrides set by the owner and take
/// precedence over the automatic `Active`/`Full` derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Active,
    Locked,
    Full,
    Reserved,
}

impl MatchStatus {
    /// Whether this status was set by owner action rather than derived
    /// from occupancy.
    pub fn is_override(&self) -> bool {
        matches!(self, MatchStatus::Locked | MatchStatus::Reserved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Gender restriction on a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderRule {
    Any,
    Male,
    Female,
}

impl GenderRule {
    pub fn admits(&self, gender: Gender) -> bool {
        match self {
            GenderRule::Any => true,
            GenderRule::Male => gender == Gender::Male,
            GenderRule::Female => gender == Gender::Female,
        }
    }
}

impl Default for GenderRule {
    fn default() -> Self {
        GenderRule::Any
    }
}

/// Who a match admits: minimum ranking, optional age bounds, gender rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Eligibility {
    #[serde(rename = "minRanking", default)]
    pub min_ranking: i32,
    #[serde(rename = "minAge", default)]
    pub min_age: Option<u8>,
    #[serde(rename = "maxAge", default)]
    pub max_age: Option<u8>,
    #[serde(default)]
    pub gender: GenderRule,
}

impl Default for Eligibility {
    fn default() -> Self {
        Self {
            min_ranking: 0,
            min_age: None,
            max_age: None,
            gender: GenderRule::Any,
        }
    }
}

/// A bookable group activity on a court at a time slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub court: String,
    pub city: String,
    pub time: String,
    pub visibility: Visibility,
    pub capacity: u8,
    pub occupancy: u8,
    #[serde(rename = "pricePerPerson")]
    pub price_per_person: i64,
    pub status: MatchStatus,
    #[serde(default)]
    pub eligibility: Eligibility,
    #[serde(rename = "assignedCourtNumber", default)]
    pub assigned_court_number: Option<u16>,
    #[serde(rename = "shareToken", default)]
    pub share_token: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Match {
    pub fn is_full(&self) -> bool {
        self.occupancy >= self.capacity
    }

    pub fn spots_left(&self) -> u8 {
        self.capacity.saturating_sub(self.occupancy)
    }

    /// Re-derive `status` from occupancy. Administrative overrides
    /// (Locked/Reserved) are left untouched.
    pub fn recompute_status(&mut self) {
        if self.status.is_override() {
            return;
        }
        self.status = if self.occupancy == self.capacity {
            MatchStatus::Full
        } else {
            MatchStatus::Active
        };
    }

    /// Shareable reference token for a private match, derived
    /// deterministically from the match id. Ids are unique by
    /// construction so no collision check is needed.
    pub fn derive_share_token(id: MatchId) -> String {
        let hex = id.simple().to_string();
        format!("m-{}", &hex[..8])
    }
}

/// Creation spec for a new match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSpec {
    pub court: String,
    pub city: String,
    pub time: String,
    pub visibility: Visibility,
    pub capacity: u8,
    #[serde(rename = "pricePerPerson")]
    pub price_per_person: i64,
    #[serde(default)]
    pub eligibility: Eligibility,
    /// 0 for owner-created open slots, 1 when the creator auto-joins.
    #[serde(rename = "initialOccupancy", default)]
    pub initial_occupancy: u8,
}

/// A user attempting to join matches. Participant state is owned by
/// the caller/session layer and passed by reference to lifecycle
/// operations; the engine does not persist it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub ranking: i32,
    pub age: u8,
    pub gender: Gender,
    #[serde(rename = "joinedMatchIds", default)]
    pub joined_match_ids: HashSet<MatchId>,
}

impl Participant {
    pub fn has_joined(&self, id: MatchId) -> bool {
        self.joined_match_ids.contains(&id)
    }
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient user-facing message. Created and removed, never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// State of a single court/time slot in the day's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Reserved {
        client: String,
        paid: bool,
        phone: String,
    },
    Matchmaking {
        players: u8,
        total: u8,
        price: i64,
        #[serde(rename = "matchId", default, skip_serializing_if = "Option::is_none")]
        match_id: Option<MatchId>,
    },
}

/// One entry of the day's time-slot catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: String,
    pub court: String,
    #[serde(flatten)]
    pub status: SlotStatus,
}

impl TimeSlot {
    pub fn available(time: &str, court: &str) -> Self {
        Self {
            time: time.to_string(),
            court: court.to_string(),
            status: SlotStatus::Available,
        }
    }

    pub fn reserved(time: &str, court: &str, client: &str, paid: bool, phone: &str) -> Self {
        Self {
            time: time.to_string(),
            court: court.to_string(),
            status: SlotStatus::Reserved {
                client: client.to_string(),
                paid,
                phone: phone.to_string(),
            },
        }
    }

    pub fn matchmaking(time: &str, court: &str, players: u8, total: u8, price: i64) -> Self {
        Self {
            time: time.to_string(),
            court: court.to_string(),
            status: SlotStatus::Matchmaking {
                players,
                total,
                price,
                match_id: None,
            },
        }
    }

    /// The demo day: two courts, hourly slots from 18:00 to 23:00.
    pub fn default_day() -> Vec<TimeSlot> {
        vec![
            TimeSlot::available("18:00", "Cancha 1"),
            TimeSlot::reserved("18:00", "Cancha 2", "Juan Pérez", true, "+54 9 11 1234-5678"),
            TimeSlot::matchmaking("19:00", "Cancha 1", 8, 10, 1500),
            TimeSlot::available("19:00", "Cancha 2"),
            TimeSlot::reserved("20:00", "Cancha 1", "María González", false, "+54 9 11 8765-4321"),
            TimeSlot::matchmaking("20:00", "Cancha 2", 6, 10, 1800),
            TimeSlot::available("21:00", "Cancha 1"),
            TimeSlot::reserved("21:00", "Cancha 2", "Club Los Amigos", true, "+54 9 11 5555-6666"),
            TimeSlot::matchmaking("22:00", "Cancha 1", 10, 10, 2000),
            TimeSlot::available("22:00", "Cancha 2"),
            TimeSlot::reserved("23:00", "Cancha 1", "Torneo Nocturno", true, "+54 9 11 9999-0000"),
            TimeSlot::available("23:00", "Cancha 2"),
        ]
    }
}

/// Read-only aggregation over a slot catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Occupied slots as a share of all slots, nearest integer percent.
    #[serde(rename = "occupancyRate")]
    pub occupancy_rate: u8,
    #[serde(rename = "estimatedRevenue")]
    pub estimated_revenue: i64,
    #[serde(rename = "occupiedSlots")]
    pub occupied_slots: usize,
    #[serde(rename = "totalSlots")]
    pub total_slots: usize,
}
