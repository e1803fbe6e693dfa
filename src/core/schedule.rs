use crate::core::registry::MatchRegistry;
use crate::models::{ScheduleSummary, SlotStatus, TimeSlot};

/// Flat rate charged per reserved slot when estimating the day's
/// revenue. Configurable via [`crate::config::ScheduleSettings`].
pub const DEFAULT_RESERVED_FLAT_RATE: i64 = 15_000;

/// Keep only the slots for the given court; `None` means all courts.
pub fn filter_by_court(slots: &[TimeSlot], court: Option<&str>) -> Vec<TimeSlot> {
    match court {
        Some(name) => slots.iter().filter(|s| s.court == name).cloned().collect(),
        None => slots.to_vec(),
    }
}

/// Overwrite matchmaking slot counters from live registry state.
///
/// Slots that link a match id pick up its current occupancy, capacity
/// and price; unlinked slots keep their static values.
pub fn refresh_from_registry(slots: &mut [TimeSlot], registry: &MatchRegistry) {
    for slot in slots.iter_mut() {
        if let SlotStatus::Matchmaking {
            players,
            total,
            price,
            match_id: Some(id),
        } = &mut slot.status
        {
            if let Ok(m) = registry.get(*id) {
                *players = m.occupancy;
                *total = m.capacity;
                *price = m.price_per_person;
            }
        }
    }
}

/// Aggregate a slot catalogue into occupancy rate and estimated
/// revenue.
///
/// Occupancy rate is occupied slots over all slots, rounded to the
/// nearest integer percent. Revenue sums price × players over
/// matchmaking slots plus the flat rate per reserved slot. Pure: same
/// inputs, same outputs.
pub fn summarize(slots: &[TimeSlot], reserved_flat_rate: i64) -> ScheduleSummary {
    let total_slots = slots.len();
    let occupied_slots = slots
        .iter()
        .filter(|s| !matches!(s.status, SlotStatus::Available))
        .count();

    let occupancy_rate = if total_slots == 0 {
        0
    } else {
        ((occupied_slots as f64 / total_slots as f64) * 100.0).round() as u8
    };

    let matchmaking_revenue: i64 = slots
        .iter()
        .filter_map(|s| match &s.status {
            SlotStatus::Matchmaking { players, price, .. } => Some(price * *players as i64),
            _ => None,
        })
        .sum();

    let reserved_count = slots
        .iter()
        .filter(|s| matches!(s.status, SlotStatus::Reserved { .. }))
        .count();

    ScheduleSummary {
        occupancy_rate,
        estimated_revenue: matchmaking_revenue + reserved_flat_rate * reserved_count as i64,
        occupied_slots,
        total_slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Eligibility, MatchSpec, Visibility};

    #[test]
    fn test_default_day_summary() {
        // 7 of 12 slots occupied (58%), matchmaking revenue
        // 8*1500 + 6*1800 + 10*2000 = 42800, plus 4 reserved at 15000.
        let summary = summarize(&TimeSlot::default_day(), DEFAULT_RESERVED_FLAT_RATE);

        assert_eq!(summary.total_slots, 12);
        assert_eq!(summary.occupied_slots, 7);
        assert_eq!(summary.occupancy_rate, 58);
        assert_eq!(summary.estimated_revenue, 42_800 + 60_000);
    }

    #[test]
    fn test_summary_is_stable() {
        let day = TimeSlot::default_day();
        assert_eq!(
            summarize(&day, DEFAULT_RESERVED_FLAT_RATE),
            summarize(&day, DEFAULT_RESERVED_FLAT_RATE)
        );
    }

    #[test]
    fn test_empty_catalogue() {
        let summary = summarize(&[], DEFAULT_RESERVED_FLAT_RATE);
        assert_eq!(summary.occupancy_rate, 0);
        assert_eq!(summary.estimated_revenue, 0);
    }

    #[test]
    fn test_four_reserved_two_matchmaking() {
        let mut slots = vec![
            TimeSlot::reserved("18:00", "Cancha 1", "A", true, "1"),
            TimeSlot::reserved("19:00", "Cancha 1", "B", true, "2"),
            TimeSlot::reserved("20:00", "Cancha 1", "C", false, "3"),
            TimeSlot::reserved("21:00", "Cancha 1", "D", true, "4"),
            TimeSlot::matchmaking("18:00", "Cancha 2", 8, 10, 1500),
            TimeSlot::matchmaking("19:00", "Cancha 2", 6, 10, 1800),
        ];
        slots.extend((0..6).map(|i| TimeSlot::available(&format!("{}:00", 18 + i), "Cancha 3")));

        let summary = summarize(&slots, DEFAULT_RESERVED_FLAT_RATE);

        assert_eq!(summary.total_slots, 12);
        assert_eq!(summary.occupied_slots, 6);
        assert_eq!(summary.occupancy_rate, 50);
        // 8*1500 + 6*1800 + 4*15000
        assert_eq!(summary.estimated_revenue, 12_000 + 10_800 + 60_000);
    }

    #[test]
    fn test_filter_by_court() {
        let day = TimeSlot::default_day();
        let filtered = filter_by_court(&day, Some("Cancha 1"));

        assert_eq!(filtered.len(), 6);
        assert!(filtered.iter().all(|s| s.court == "Cancha 1"));

        assert_eq!(filter_by_court(&day, None).len(), 12);
    }

    #[test]
    fn test_refresh_from_registry_links_live_occupancy() {
        let mut registry = MatchRegistry::new();
        let m = registry
            .create(MatchSpec {
                court: "Cancha 1".to_string(),
                city: "Buenos Aires".to_string(),
                time: "19:00".to_string(),
                visibility: Visibility::Public,
                capacity: 10,
                price_per_person: 1500,
                eligibility: Eligibility::default(),
                initial_occupancy: 0,
            })
            .unwrap();
        registry.mutate_occupancy(m.id, 3).unwrap();

        let mut slots = vec![TimeSlot {
            status: SlotStatus::Matchmaking {
                players: 0,
                total: 0,
                price: 0,
                match_id: Some(m.id),
            },
            ..TimeSlot::available("19:00", "Cancha 1")
        }];

        refresh_from_registry(&mut slots, &registry);

        assert_eq!(
            slots[0].status,
            SlotStatus::Matchmaking {
                players: 3,
                total: 10,
                price: 1500,
                match_id: Some(m.id),
            }
        );
    }
}
