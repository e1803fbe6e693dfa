// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Eligibility, Gender, GenderRule, Match, MatchId, MatchSpec, MatchStatus, Notification,
    Participant, ScheduleSummary, Severity, SlotStatus, TimeSlot, Visibility,
};
pub use requests::{
    AssignCourtRequest, CreateMatchRequest, ListMatchesQuery, ParticipantRequest, ScheduleQuery,
};
pub use responses::{
    DismissNotificationResponse, ErrorResponse, HealthResponse, ListMatchesResponse,
    ListNotificationsResponse, MatchActionResponse, ScheduleSummaryResponse,
};
