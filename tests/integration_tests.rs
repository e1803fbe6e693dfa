// Integration tests for Cancha Engine

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use cancha_engine::core::{LifecycleEvent, MatchLifecycle};
use cancha_engine::models::{
    Eligibility, Gender, MatchSpec, MatchStatus, Participant, Severity, Visibility,
};
use cancha_engine::services::NotificationQueue;

fn create_spec(court: &str, time: &str, capacity: u8) -> MatchSpec {
    MatchSpec {
        court: court.to_string(),
        city: "Buenos Aires".to_string(),
        time: time.to_string(),
        visibility: Visibility::Public,
        capacity,
        price_per_person: 1500,
        eligibility: Eligibility {
            min_ranking: 2,
            ..Eligibility::default()
        },
        initial_occupancy: 0,
    }
}

fn create_participant(id: &str, ranking: i32) -> Participant {
    Participant {
        user_id: id.to_string(),
        ranking,
        age: 28,
        gender: Gender::Male,
        joined_match_ids: HashSet::new(),
    }
}

/// Drain lifecycle events into the queue the way the HTTP layer does.
async fn dispatch(queue: &NotificationQueue, events: &[LifecycleEvent]) -> bool {
    let mut assignment_required = false;
    for event in events {
        match event {
            LifecycleEvent::Notify { message, severity } => {
                queue.push(message.clone(), *severity).await;
            }
            LifecycleEvent::AssignmentRequired { .. } => {
                assignment_required = true;
                queue
                    .push("Enough players gathered — assign a court", Severity::Warning)
                    .await;
            }
        }
    }
    assignment_required
}

#[tokio::test]
async fn test_end_to_end_match_lifecycle() {
    let lifecycle = Arc::new(RwLock::new(MatchLifecycle::with_defaults()));
    let queue = NotificationQueue::new(Duration::from_secs(60));

    // Owner creates a match
    let outcome = lifecycle
        .write()
        .await
        .create(create_spec("Cancha El Diez", "19:00", 10))
        .unwrap();
    let match_id = outcome.match_state.id;
    dispatch(&queue, &outcome.events).await;

    // Five players join; the fifth crossing raises the assignment signal
    let mut assignment_signals = 0;
    for i in 0..5 {
        let mut p = create_participant(&format!("player-{}", i), 3);
        let outcome = lifecycle.write().await.join(match_id, &mut p).unwrap();
        if dispatch(&queue, &outcome.events).await {
            assignment_signals += 1;
        }
    }
    assert_eq!(assignment_signals, 1);

    // Owner binds the court; the match is now reserved
    let outcome = lifecycle.write().await.assign_court(match_id, 2).unwrap();
    dispatch(&queue, &outcome.events).await;

    let current = lifecycle.read().await.registry().get(match_id).unwrap().clone();
    assert_eq!(current.occupancy, 5);
    assert_eq!(current.status, MatchStatus::Reserved);
    assert_eq!(current.assigned_court_number, Some(2));

    // One success per creation and join, plus the assignment warning
    // and the court confirmation
    let notifications = queue.list().await;
    assert_eq!(notifications.len(), 8);
    assert!(notifications
        .iter()
        .any(|n| n.severity == Severity::Warning));
}

#[tokio::test]
async fn test_rejection_emits_notification_without_mutation() {
    let lifecycle = Arc::new(RwLock::new(MatchLifecycle::with_defaults()));
    let queue = NotificationQueue::new(Duration::from_secs(60));

    let match_id = lifecycle
        .write()
        .await
        .create(create_spec("Predio Central", "21:30", 10))
        .unwrap()
        .match_state
        .id;

    // Ranking 1 is below the match minimum of 2
    let mut p = create_participant("novato", 1);
    let err = lifecycle.write().await.join(match_id, &mut p).unwrap_err();

    // The caller surfaces the failure as a warning notification
    queue.push(err.to_string(), Severity::Warning).await;

    assert_eq!(
        lifecycle.read().await.registry().get(match_id).unwrap().occupancy,
        0
    );
    assert!(!p.has_joined(match_id));

    let notifications = queue.list().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Warning);
}

#[tokio::test]
async fn test_concurrent_joins_respect_capacity() {
    let lifecycle = Arc::new(RwLock::new(MatchLifecycle::with_defaults()));

    let match_id = lifecycle
        .write()
        .await
        .create(create_spec("La Bombonerita", "23:00", 6))
        .unwrap()
        .match_state
        .id;

    // Twenty callers race for six spots
    let mut handles = Vec::new();
    for i in 0..20 {
        let lifecycle = Arc::clone(&lifecycle);
        handles.push(tokio::spawn(async move {
            let mut p = create_participant(&format!("racer-{}", i), 5);
            lifecycle.write().await.join(match_id, &mut p).is_ok()
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.unwrap() {
            succeeded += 1;
        }
    }

    let current = lifecycle.read().await.registry().get(match_id).unwrap().clone();
    assert_eq!(succeeded, 6);
    assert_eq!(current.occupancy, 6);
    assert_eq!(current.status, MatchStatus::Full);
}

#[tokio::test(start_paused = true)]
async fn test_notification_dismiss_then_expiry_race() {
    let queue = NotificationQueue::new(Duration::from_secs(3));

    let n = queue.push("X", Severity::Info).await;

    // Manual dismissal one time unit in: gone immediately
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(queue.dismiss(n.id).await);
    assert!(queue.list().await.is_empty());

    // The expiry slot passes without a duplicate-removal error
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(queue.list().await.is_empty());
    assert!(!queue.dismiss(n.id).await);
}

#[tokio::test(start_paused = true)]
async fn test_notifications_expire_independently_under_load() {
    let queue = NotificationQueue::new(Duration::from_secs(3));

    for i in 0..5 {
        queue.push(format!("note {}", i), Severity::Info).await;
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    // Pushes at t=0..4 expire at t=3..7; half a tick past t=5 the
    // first three are gone and the last two remain
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(queue.list().await.len(), 2);

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(queue.list().await.is_empty());
}

#[tokio::test]
async fn test_leave_and_rejoin_cycle() {
    let lifecycle = Arc::new(RwLock::new(MatchLifecycle::with_defaults()));

    let match_id = lifecycle
        .write()
        .await
        .create(create_spec("Cancha El Diez", "19:00", 8))
        .unwrap()
        .match_state
        .id;

    let mut p = create_participant("leo", 5);

    for _ in 0..3 {
        lifecycle.write().await.join(match_id, &mut p).unwrap();
        lifecycle.write().await.leave(match_id, &mut p).unwrap();
    }

    let current = lifecycle.read().await.registry().get(match_id).unwrap().clone();
    assert_eq!(current.occupancy, 0);
    assert_eq!(current.status, MatchStatus::Active);
    assert!(!p.has_joined(match_id));
}
