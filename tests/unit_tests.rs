// Unit tests for Shipmatch scoring properties

use chrono::NaiveDate;
use shipmatch::core::{
    location::location_similarity,
    scoring::{calculate_capacity_score, calculate_date_score, calculate_match_score},
};
use shipmatch::models::{ScoringWeights, Shipment, Trip, TripStatus, VehicleType};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn create_shipment() -> Shipment {
    Shipment {
        id: "shipment".to_string(),
        pickup_location: "الرياض".to_string(),
        delivery_location: "جدة".to_string(),
        weight: 800.0,
        preferred_date: Some(date("2024-06-10")),
        vehicle_type: VehicleType::Truck,
    }
}

fn create_trip() -> Trip {
    Trip {
        id: "trip".to_string(),
        carrier_id: "carrier".to_string(),
        origin: "الرياض".to_string(),
        destination: "جدة".to_string(),
        available_capacity: 1000.0,
        travel_date: Some(date("2024-06-10")),
        vehicle_type: VehicleType::Truck,
        status: TripStatus::Active,
    }
}

const LOCATIONS: &[&str] = &[
    "الرياض",
    "Riyadh",
    "جدة",
    "مكة",
    "Dammam",
    "Tabuk",
    "",
    "small village",
];
const WEIGHTS: &[f64] = &[0.0, 100.0, 500.0, 800.0, 950.0, 1200.0, 5000.0];
const CAPACITIES: &[f64] = &[0.0, -10.0, 100.0, 1000.0, 4000.0];
const VEHICLES: &[VehicleType] = &[
    VehicleType::Van,
    VehicleType::Pickup,
    VehicleType::Truck,
    VehicleType::Any,
    VehicleType::Unknown,
];

#[test]
fn test_scenario_perfect_match() {
    let (score, breakdown) =
        calculate_match_score(&create_shipment(), &create_trip(), &ScoringWeights::default());

    assert_eq!(breakdown.location, 1.0);
    assert_eq!(breakdown.capacity, 1.0);
    assert_eq!(breakdown.date, 1.0);
    assert_eq!(breakdown.vehicle, 1.0);
    assert_eq!(score, 100.0);
}

#[test]
fn test_scenario_trip_too_small() {
    let trip = Trip {
        available_capacity: 100.0,
        ..create_trip()
    };
    let (score, breakdown) =
        calculate_match_score(&create_shipment(), &trip, &ScoringWeights::default());

    assert_eq!(breakdown.capacity, 0.0);
    assert!(score <= 70.0);
}

#[test]
fn test_score_always_within_bounds() {
    let weights = ScoringWeights::default();
    for pickup in LOCATIONS {
        for origin in LOCATIONS {
            for weight in WEIGHTS {
                for capacity in CAPACITIES {
                    for vehicle in VEHICLES {
                        let shipment = Shipment {
                            pickup_location: pickup.to_string(),
                            weight: *weight,
                            vehicle_type: *vehicle,
                            ..create_shipment()
                        };
                        let trip = Trip {
                            origin: origin.to_string(),
                            available_capacity: *capacity,
                            ..create_trip()
                        };

                        let (score, _) = calculate_match_score(&shipment, &trip, &weights);
                        assert!((0.0..=100.0).contains(&score));
                    }
                }
            }
        }
    }
}

#[test]
fn test_score_is_deterministic() {
    let shipment = Shipment {
        pickup_location: "Riyadh".to_string(),
        weight: 650.0,
        ..create_shipment()
    };
    let trip = Trip {
        travel_date: Some(date("2024-06-13")),
        vehicle_type: VehicleType::Van,
        ..create_trip()
    };

    let first = calculate_match_score(&shipment, &trip, &ScoringWeights::default());
    for _ in 0..10 {
        assert_eq!(calculate_match_score(&shipment, &trip, &ScoringWeights::default()), first);
    }
}

#[test]
fn test_location_similarity_symmetric() {
    for a in LOCATIONS {
        for b in LOCATIONS {
            assert_eq!(location_similarity(a, b), location_similarity(b, a));
        }
    }
}

#[test]
fn test_capacity_zero_without_capacity() {
    for weight in WEIGHTS {
        assert_eq!(calculate_capacity_score(*weight, 0.0), 0.0);
        assert_eq!(calculate_capacity_score(*weight, -1.0), 0.0);
    }
}

#[test]
fn test_date_score_one_only_on_same_day() {
    let base = date("2024-06-10");
    let mut previous = calculate_date_score(Some(base), Some(base));
    assert_eq!(previous, 1.0);

    for days in 1..40 {
        let later = base + chrono::Duration::days(days);
        let score = calculate_date_score(Some(base), Some(later));
        assert!(score < 1.0);
        assert!(score <= previous);
        previous = score;
    }
}

#[test]
fn test_higher_sub_score_never_lowers_composite() {
    let weights = ScoringWeights::default();
    let shipment = create_shipment();

    let worse_date = Trip {
        travel_date: Some(date("2024-06-20")),
        ..create_trip()
    };
    let better_date = Trip {
        travel_date: Some(date("2024-06-11")),
        ..create_trip()
    };

    let (worse, _) = calculate_match_score(&shipment, &worse_date, &weights);
    let (better, _) = calculate_match_score(&shipment, &better_date, &weights);
    assert!(better >= worse);
}

#[test]
fn test_backend_rows_score_like_typed_values() {
    // Capitalized enums and null columns, as a REST backend returns them
    let trip: Trip = serde_json::from_value(serde_json::json!({
        "id": "trip",
        "carrier_id": "carrier",
        "origin": "الرياض",
        "destination": "جدة",
        "available_capacity": "1000",
        "travel_date": "2024-06-10",
        "vehicle_type": "Truck",
        "status": "Active"
    }))
    .unwrap();
    let (score, breakdown) =
        calculate_match_score(&create_shipment(), &trip, &ScoringWeights::default());
    assert_eq!(breakdown.vehicle, 1.0);
    assert_eq!(score, 100.0);

    let partial: Trip = serde_json::from_value(serde_json::json!({
        "id": "trip",
        "origin": null,
        "destination": "جدة",
        "available_capacity": 1000,
        "travel_date": "2024-06-10",
        "vehicle_type": "TRUCK",
        "status": "active"
    }))
    .unwrap();
    let (_, breakdown) =
        calculate_match_score(&create_shipment(), &partial, &ScoringWeights::default());
    assert_eq!(breakdown.location, 0.5);
}
