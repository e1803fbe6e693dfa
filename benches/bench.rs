// Criterion benchmarks for Cancha Engine

use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cancha_engine::core::schedule::{summarize, DEFAULT_RESERVED_FLAT_RATE};
use cancha_engine::core::{evaluate, MatchLifecycle};
use cancha_engine::models::{
    Eligibility, Gender, MatchSpec, Participant, TimeSlot, Visibility,
};

fn create_spec(capacity: u8) -> MatchSpec {
    MatchSpec {
        court: "Cancha El Diez".to_string(),
        city: "Buenos Aires".to_string(),
        time: "19:00".to_string(),
        visibility: Visibility::Public,
        capacity,
        price_per_person: 1500,
        eligibility: Eligibility {
            min_ranking: 2,
            min_age: Some(18),
            max_age: Some(50),
            ..Eligibility::default()
        },
        initial_occupancy: 0,
    }
}

fn create_participant(id: usize) -> Participant {
    Participant {
        user_id: format!("player-{}", id),
        ranking: 2 + (id % 5) as i32,
        age: 20 + (id % 25) as u8,
        gender: if id % 2 == 0 {
            Gender::Male
        } else {
            Gender::Female
        },
        joined_match_ids: HashSet::new(),
    }
}

fn bench_eligibility(c: &mut Criterion) {
    let mut lifecycle = MatchLifecycle::with_defaults();
    let m = lifecycle.create(create_spec(10)).unwrap().match_state;
    let p = create_participant(1);

    c.bench_function("eligibility_evaluate", |b| {
        b.iter(|| evaluate(black_box(&m), black_box(&p)));
    });
}

fn bench_join_leave_cycle(c: &mut Criterion) {
    c.bench_function("join_leave_cycle", |b| {
        let mut lifecycle = MatchLifecycle::with_defaults();
        let m = lifecycle.create(create_spec(10)).unwrap().match_state;
        let mut p = create_participant(1);

        b.iter(|| {
            lifecycle.join(black_box(m.id), &mut p).unwrap();
            lifecycle.leave(black_box(m.id), &mut p).unwrap();
        });
    });
}

fn bench_schedule_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule_summary");

    for slot_count in [12, 120, 1200] {
        let slots: Vec<TimeSlot> = (0..slot_count)
            .map(|i| match i % 3 {
                0 => TimeSlot::available(&format!("{}:00", 18 + i % 6), "Cancha 1"),
                1 => TimeSlot::reserved(
                    &format!("{}:00", 18 + i % 6),
                    "Cancha 2",
                    "Juan Pérez",
                    true,
                    "+54 9 11 1234-5678",
                ),
                _ => TimeSlot::matchmaking(&format!("{}:00", 18 + i % 6), "Cancha 1", 8, 10, 1500),
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(slot_count),
            &slots,
            |b, slots| {
                b.iter(|| summarize(black_box(slots), DEFAULT_RESERVED_FLAT_RATE));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_eligibility,
    bench_join_leave_cycle,
    bench_schedule_summary
);
criterion_main!(benches);
