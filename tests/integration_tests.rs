// Integration tests for Shipmatch

use chrono::NaiveDate;
use shipmatch::core::{CandidateFetcher, ContactInitiator, EngineError, MatchService, Matcher};
use shipmatch::models::{ContactStatus, Shipment, Trip, TripStatus, VehicleType};
use shipmatch::services::{MemoryStore, StaticSession};
use std::sync::Arc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 8).unwrap()
}

fn create_shipment() -> Shipment {
    Shipment {
        id: "shipment-1".to_string(),
        pickup_location: "الرياض".to_string(),
        delivery_location: "جدة".to_string(),
        weight: 800.0,
        preferred_date: NaiveDate::from_ymd_opt(2024, 6, 10),
        vehicle_type: VehicleType::Truck,
    }
}

fn create_trip(
    id: &str,
    origin: &str,
    destination: &str,
    capacity: f64,
    day: u32,
    vehicle: VehicleType,
    status: TripStatus,
) -> Trip {
    Trip {
        id: id.to_string(),
        carrier_id: format!("carrier-{}", id),
        origin: origin.to_string(),
        destination: destination.to_string(),
        available_capacity: capacity,
        travel_date: NaiveDate::from_ymd_opt(2024, 6, day),
        vehicle_type: vehicle,
        status,
    }
}

fn seeded_store() -> MemoryStore {
    use TripStatus::*;
    use VehicleType::*;

    MemoryStore::new()
        .with_shipment(create_shipment())
        .with_shipper("user-1", "shipper-1")
        .with_trip(create_trip("t-perfect", "الرياض", "جدة", 1000.0, 10, Truck, Active))
        .with_trip(create_trip("t-alias", "Riyadh", "Jeddah", 1000.0, 11, Van, Active))
        .with_trip(create_trip("t-region", "الخرج", "مكة", 2000.0, 13, Pickup, Active))
        .with_trip(create_trip("t-small", "الرياض", "جدة", 100.0, 10, Truck, Active))
        .with_trip(create_trip("t-far", "تبوك", "أبها", 1000.0, 30, Van, Active))
        .with_trip(create_trip("t-inactive", "الرياض", "جدة", 1000.0, 10, Truck, Inactive))
        .with_trip(create_trip("t-past", "الرياض", "جدة", 1000.0, 7, Truck, Active))
}

fn service(store: &MemoryStore) -> MatchService {
    let store = Arc::new(store.clone());
    MatchService::new(store.clone(), CandidateFetcher::new(store), Matcher::with_default_weights())
}

#[tokio::test]
async fn test_integration_end_to_end_matching() {
    let store = seeded_store();
    let ranked = service(&store)
        .find_matches_for_id_on("shipment-1", today())
        .await
        .unwrap();

    let ids: Vec<_> = ranked.matches.iter().map(|m| m.trip.id.as_str()).collect();

    // Inactive and past trips never become candidates
    assert_eq!(ranked.total_candidates, 5);
    assert!(!ids.contains(&"t-inactive"));
    assert!(!ids.contains(&"t-past"));

    assert_eq!(ids[0], "t-perfect");
    assert_eq!(ranked.matches[0].score, 100.0);
    assert_eq!(ranked.matches[0].reasons.len(), 5);

    // Sorted descending
    for pair in ranked.matches.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    // Zero-scoring capacity is kept, only ranked lower
    let small = ranked.matches.iter().find(|m| m.trip.id == "t-small").unwrap();
    assert_eq!(small.breakdown.capacity, 0.0);
    assert!(small.score <= 70.0);
}

#[tokio::test]
async fn test_min_score_threshold_filters() {
    let store = seeded_store();
    let shared = Arc::new(store.clone());
    let service = MatchService::new(
        shared.clone(),
        CandidateFetcher::new(shared),
        Matcher::with_default_weights().with_min_score(80.0),
    );

    let ranked = service.find_matches_on(create_shipment(), today()).await.unwrap();

    assert_eq!(ranked.total_candidates, 5);
    assert!(ranked.matches.iter().all(|m| m.score >= 80.0));
    assert!(ranked.matches.iter().any(|m| m.trip.id == "t-perfect"));
}

#[tokio::test]
async fn test_no_candidates() {
    let store = MemoryStore::new().with_shipment(create_shipment());
    let ranked = service(&store)
        .find_matches_for_id_on("shipment-1", today())
        .await
        .unwrap();

    assert!(ranked.matches.is_empty());
    assert_eq!(ranked.total_candidates, 0);
}

#[tokio::test]
async fn test_unknown_shipment() {
    let store = seeded_store();
    let result = service(&store).find_matches_for_id_on("nope", today()).await;

    assert!(matches!(result, Err(EngineError::ShipmentNotFound(_))));
}

#[tokio::test]
async fn test_fetch_failure_surfaces_as_data_access() {
    let store = seeded_store();
    store.set_unavailable("connection reset");

    let result = service(&store).find_matches_on(create_shipment(), today()).await;

    assert!(matches!(result, Err(EngineError::DataAccess(_))));
}

#[tokio::test]
async fn test_contact_request_for_selected_match() {
    let store = seeded_store();
    let ranked = service(&store)
        .find_matches_for_id_on("shipment-1", today())
        .await
        .unwrap();
    let best = &ranked.matches[0];

    let initiator = ContactInitiator::new(Arc::new(store.clone()));
    let created = initiator
        .send_contact_request(
            &StaticSession::user("user-1"),
            &ranked.shipment.id,
            &best.trip.id,
            "Is there still room for 800 kg?",
        )
        .await
        .unwrap();

    assert_eq!(created.shipper_id, "shipper-1");
    assert_eq!(created.carrier_id, "carrier-t-perfect");
    assert_eq!(created.shipment_id, "shipment-1");
    assert_eq!(created.status, ContactStatus::Pending);
    assert_eq!(store.contact_requests().len(), 1);
}

#[tokio::test]
async fn test_contact_request_missing_trip_inserts_nothing() {
    let store = seeded_store();
    let initiator = ContactInitiator::new(Arc::new(store.clone()));

    let result = initiator
        .send_contact_request(&StaticSession::user("user-1"), "shipment-1", "t-missing", "hi")
        .await;

    assert!(matches!(result, Err(EngineError::TripNotFound(_))));
    assert!(store.contact_requests().is_empty());
}
