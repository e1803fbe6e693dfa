use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{Match, MatchId, Notification, ScheduleSummary, TimeSlot};

/// Response for lifecycle commands (create/join/leave/assign).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchActionResponse {
    #[serde(rename = "match")]
    pub match_state: Match,
    /// Updated membership set, echoed back on join/leave.
    #[serde(rename = "joinedMatchIds", skip_serializing_if = "Option::is_none")]
    pub joined_match_ids: Option<Vec<MatchId>>,
    /// Whether this operation just triggered the court-assignment
    /// threshold. Fire-and-forget; the caller decides what to do.
    #[serde(rename = "assignmentRequired")]
    pub assignment_required: bool,
}

/// Response for the match listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMatchesResponse {
    pub matches: Vec<Match>,
    pub total: usize,
}

/// Response for the schedule summary projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummaryResponse {
    pub summary: ScheduleSummary,
    pub slots: Vec<TimeSlot>,
}

/// Response for the notification listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNotificationsResponse {
    pub notifications: Vec<Notification>,
    pub count: usize,
}

/// Response for a notification dismissal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DismissNotificationResponse {
    pub id: Uuid,
    /// False when the notification had already expired or been
    /// dismissed; that race is a safe no-op, not an error.
    pub removed: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
