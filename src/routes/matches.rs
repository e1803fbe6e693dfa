use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::core::registry::RegistryError;
use crate::core::{schedule, LifecycleError, LifecycleEvent, MatchLifecycle};
use crate::models::{
    AssignCourtRequest, CreateMatchRequest, DismissNotificationResponse, ErrorResponse,
    HealthResponse, ListMatchesQuery, ListMatchesResponse, ListNotificationsResponse,
    MatchActionResponse, MatchSpec, Participant, ParticipantRequest, ScheduleQuery,
    ScheduleSummaryResponse, Severity, TimeSlot,
};
use crate::services::NotificationQueue;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<RwLock<MatchLifecycle>>,
    pub notifications: NotificationQueue,
    pub catalogue: Arc<RwLock<Vec<TimeSlot>>>,
    pub reserved_flat_rate: i64,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches", web::post().to(create_match))
        .route("/matches", web::get().to(list_matches))
        .route("/matches/{id}", web::get().to(get_match))
        .route("/matches/{id}/join", web::post().to(join_match))
        .route("/matches/{id}/leave", web::post().to(leave_match))
        .route("/matches/{id}/assign", web::post().to(assign_court))
        .route("/schedule/summary", web::get().to(schedule_summary))
        .route("/notifications", web::get().to(list_notifications))
        .route("/notifications/{id}", web::delete().to(dismiss_notification));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn error_kind(err: &LifecycleError) -> (&'static str, u16) {
    match err {
        LifecycleError::Registry(RegistryError::NotFound(_)) => ("not_found", 404),
        LifecycleError::Registry(RegistryError::InvalidSpec(_)) => ("invalid_spec", 400),
        LifecycleError::Registry(RegistryError::AlreadyAssigned(..)) => ("already_assigned", 409),
        LifecycleError::AlreadyJoined(_) => ("already_joined", 409),
        LifecycleError::NotJoined(_) => ("not_joined", 409),
        LifecycleError::Denied(_) => ("join_denied", 409),
    }
}

/// Translate a lifecycle failure into an error response, notifying the
/// user the way every rejection surfaces in the app. Rejections emit a
/// notification without any registry mutation having happened.
async fn reject(state: &AppState, err: LifecycleError) -> HttpResponse {
    let (kind, status_code) = error_kind(&err);
    let severity = match err {
        LifecycleError::Denied(_) => Severity::Warning,
        _ => Severity::Error,
    };

    tracing::info!("Lifecycle operation rejected ({}): {}", kind, err);
    state.notifications.push(err.to_string(), severity).await;

    let mut response = HttpResponse::build(
        actix_web::http::StatusCode::from_u16(status_code)
            .unwrap_or(actix_web::http::StatusCode::BAD_REQUEST),
    );
    response.json(ErrorResponse {
        error: kind.to_string(),
        message: err.to_string(),
        status_code,
    })
}

/// Forward lifecycle events to the notification queue and surface the
/// assignment signal. Fire-and-forget: nothing here blocks the
/// operation that produced the events.
async fn dispatch_events(state: &AppState, events: &[LifecycleEvent]) -> bool {
    let mut assignment_required = false;

    for event in events {
        match event {
            LifecycleEvent::Notify { message, severity } => {
                state.notifications.push(message.clone(), *severity).await;
            }
            LifecycleEvent::AssignmentRequired { match_id } => {
                assignment_required = true;
                tracing::info!("Assignment required for match {}", match_id);
                state
                    .notifications
                    .push(
                        "Enough players gathered — assign a court".to_string(),
                        Severity::Warning,
                    )
                    .await;
            }
        }
    }

    assignment_required
}

/// Create match endpoint
///
/// POST /api/v1/matches
async fn create_match(
    state: web::Data<AppState>,
    req: web::Json<CreateMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_match request: {:?}", errors);
        return validation_error(errors);
    }

    let spec = MatchSpec::from(req.into_inner());
    let result = state.lifecycle.write().await.create(spec);

    match result {
        Ok(outcome) => {
            let assignment_required = dispatch_events(&state, &outcome.events).await;
            HttpResponse::Created().json(MatchActionResponse {
                match_state: outcome.match_state,
                joined_match_ids: None,
                assignment_required,
            })
        }
        Err(e) => reject(&state, e).await,
    }
}

/// List matches endpoint
///
/// GET /api/v1/matches?visibility=public&city=...
async fn list_matches(
    state: web::Data<AppState>,
    query: web::Query<ListMatchesQuery>,
) -> impl Responder {
    let mut matches = state.lifecycle.read().await.registry().snapshot();

    if let Some(visibility) = query.visibility {
        matches.retain(|m| m.visibility == visibility);
    }
    if let Some(city) = &query.city {
        matches.retain(|m| &m.city == city);
    }
    matches.sort_by_key(|m| m.created_at);

    let total = matches.len();
    HttpResponse::Ok().json(ListMatchesResponse { matches, total })
}

/// Get match endpoint
///
/// GET /api/v1/matches/{id}
async fn get_match(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    let result = state
        .lifecycle
        .read()
        .await
        .registry()
        .get(id)
        .map(|m| m.clone());

    match result {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => reject(&state, e.into()).await,
    }
}

/// Join match endpoint
///
/// POST /api/v1/matches/{id}/join
///
/// The participant (with their current membership set) travels in the
/// body; the updated set is echoed back.
async fn join_match(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<ParticipantRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let match_id = path.into_inner();
    let mut participant = Participant::from(req.into_inner());

    tracing::info!("Participant {} joining match {}", participant.user_id, match_id);

    let result = state
        .lifecycle
        .write()
        .await
        .join(match_id, &mut participant);

    match result {
        Ok(outcome) => {
            let assignment_required = dispatch_events(&state, &outcome.events).await;
            HttpResponse::Ok().json(MatchActionResponse {
                match_state: outcome.match_state,
                joined_match_ids: Some(participant.joined_match_ids.into_iter().collect()),
                assignment_required,
            })
        }
        Err(e) => reject(&state, e).await,
    }
}

/// Leave match endpoint
///
/// POST /api/v1/matches/{id}/leave
async fn leave_match(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<ParticipantRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let match_id = path.into_inner();
    let mut participant = Participant::from(req.into_inner());

    let result = state
        .lifecycle
        .write()
        .await
        .leave(match_id, &mut participant);

    match result {
        Ok(outcome) => {
            let assignment_required = dispatch_events(&state, &outcome.events).await;
            HttpResponse::Ok().json(MatchActionResponse {
                match_state: outcome.match_state,
                joined_match_ids: Some(participant.joined_match_ids.into_iter().collect()),
                assignment_required,
            })
        }
        Err(e) => reject(&state, e).await,
    }
}

/// Assign court endpoint
///
/// POST /api/v1/matches/{id}/assign
async fn assign_court(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<AssignCourtRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let match_id = path.into_inner();
    let court_number = req.court_number;

    let result = state
        .lifecycle
        .write()
        .await
        .assign_court(match_id, court_number);

    match result {
        Ok(outcome) => {
            let assignment_required = dispatch_events(&state, &outcome.events).await;
            HttpResponse::Ok().json(MatchActionResponse {
                match_state: outcome.match_state,
                joined_match_ids: None,
                assignment_required,
            })
        }
        Err(e) => reject(&state, e).await,
    }
}

/// Schedule summary endpoint
///
/// GET /api/v1/schedule/summary?court=Cancha%201
async fn schedule_summary(
    state: web::Data<AppState>,
    query: web::Query<ScheduleQuery>,
) -> impl Responder {
    let mut slots = state.catalogue.read().await.clone();

    {
        let lifecycle = state.lifecycle.read().await;
        schedule::refresh_from_registry(&mut slots, lifecycle.registry());
    }

    let slots = schedule::filter_by_court(&slots, query.court.as_deref());
    let summary = schedule::summarize(&slots, state.reserved_flat_rate);

    tracing::debug!(
        "Schedule summary over {} slots (court filter: {:?})",
        slots.len(),
        query.court
    );

    HttpResponse::Ok().json(ScheduleSummaryResponse { summary, slots })
}

/// List notifications endpoint
///
/// GET /api/v1/notifications
async fn list_notifications(state: web::Data<AppState>) -> impl Responder {
    let notifications = state.notifications.list().await;
    let count = notifications.len();

    HttpResponse::Ok().json(ListNotificationsResponse {
        notifications,
        count,
    })
}

/// Dismiss notification endpoint
///
/// DELETE /api/v1/notifications/{id}
///
/// Dismissing an already-expired notification is a no-op, not an error.
async fn dismiss_notification(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    let removed = state.notifications.dismiss(id).await;

    HttpResponse::Ok().json(DismissNotificationResponse { id, removed })
}
