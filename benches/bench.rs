// Criterion benchmarks for Shipmatch

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shipmatch::core::{calculate_match_score, location_similarity, Matcher};
use shipmatch::models::{ScoringWeights, Shipment, Trip, TripStatus, VehicleType};

const CITIES: [&str; 8] = [
    "الرياض", "جدة", "مكة", "الدمام", "Riyadh", "Jeddah", "Khobar", "تبوك",
];

fn create_shipment() -> Shipment {
    Shipment {
        id: "bench-shipment".to_string(),
        pickup_location: "الرياض".to_string(),
        delivery_location: "جدة".to_string(),
        weight: 800.0,
        preferred_date: NaiveDate::from_ymd_opt(2024, 6, 10),
        vehicle_type: VehicleType::Truck,
    }
}

fn create_trip(id: usize) -> Trip {
    let vehicle = match id % 3 {
        0 => VehicleType::Truck,
        1 => VehicleType::Van,
        _ => VehicleType::Pickup,
    };

    Trip {
        id: format!("trip-{}", id),
        carrier_id: format!("carrier-{}", id % 50),
        origin: CITIES[id % CITIES.len()].to_string(),
        destination: CITIES[(id + 3) % CITIES.len()].to_string(),
        available_capacity: 200.0 + (id % 20) as f64 * 150.0,
        travel_date: NaiveDate::from_ymd_opt(2024, 6, 10 + (id % 20) as u32),
        vehicle_type: vehicle,
        status: TripStatus::Active,
    }
}

fn bench_location_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("location_similarity");

    group.bench_function("exact", |b| {
        b.iter(|| location_similarity(black_box("Riyadh"), black_box("riyadh")))
    });

    group.bench_function("alias", |b| {
        b.iter(|| location_similarity(black_box("الرياض"), black_box("Riyadh")))
    });

    group.bench_function("region", |b| {
        b.iter(|| location_similarity(black_box("الخرج"), black_box("الرياض")))
    });

    group.bench_function("unrelated", |b| {
        b.iter(|| location_similarity(black_box("Atlantis"), black_box("El Dorado")))
    });

    group.finish();
}

fn bench_match_score(c: &mut Criterion) {
    let shipment = create_shipment();
    let trip = create_trip(1);
    let weights = ScoringWeights::default();

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(&shipment), black_box(&trip), black_box(&weights)))
    });
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let shipment = create_shipment();
    let matcher = Matcher::with_default_weights();

    for size in [10, 100, 1000].iter() {
        let trips: Vec<Trip> = (0..*size).map(create_trip).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| matcher.rank(black_box(&shipment), black_box(trips.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_location_similarity, bench_match_score, bench_ranking);
criterion_main!(benches);
