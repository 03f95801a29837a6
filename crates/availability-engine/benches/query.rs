use std::hint::black_box;

use availability_engine::{
    AvailabilityQueryEngine, CalendarSnapshot, DayStatus, Query, SlotDuration, SlotMask,
    TimePreference,
};
use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};

/// 90 days where every third day has a scattered set of blocked hours.
fn busy_snapshot() -> CalendarSnapshot {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..90)
        .filter(|i| i % 3 == 0)
        .fold(CalendarSnapshot::new("bench"), |snap, i| {
            let bits = 0b0100_1000_0010_0001u16.rotate_left(i as u32);
            snap.with_day(
                start + Duration::days(i),
                DayStatus::blocked(SlotMask::from_bits(bits)),
            )
        })
}

fn bench_queries(c: &mut Criterion) {
    let engine = AvailabilityQueryEngine::new(busy_snapshot());

    let find_days = Query::find_days("2025-01-01", "2025-03-31");
    c.bench_function("find_days_90", |b| {
        b.iter(|| engine.execute(black_box(&find_days)))
    });

    let find_slots = Query::find_slots("2025-01-01", "2025-03-31").lasting(SlotDuration::HalfDay);
    c.bench_function("find_slots_half_day_90", |b| {
        b.iter(|| engine.execute(black_box(&find_slots)))
    });

    let suggest = Query::suggest_times("2025-01-01", "2025-03-31")
        .prefer(TimePreference::Afternoon)
        .limit(10);
    c.bench_function("suggest_times_90", |b| {
        b.iter(|| engine.execute(black_box(&suggest)))
    });
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
