use chrono::NaiveDate;
use crate::models::{Shipment, Trip, ScoreBreakdown, ScoringWeights, VehicleType};
use crate::core::location::location_similarity;

/// Calculate the composite match score (0-100) for a trip against a shipment
///
/// Scoring formula (default weights, in points):
/// score = (
///     location_score * 40 +   # pickup/origin and delivery/destination similarity
///     capacity_score * 30 +   # how well the shipment fills the spare capacity
///     date_score * 20 +       # proximity of travel date to preferred date
///     vehicle_score * 10      # vehicle type compatibility
/// )
///
/// Pure and deterministic: it never looks at the clock.
pub fn calculate_match_score(
    shipment: &Shipment,
    trip: &Trip,
    weights: &ScoringWeights,
) -> (f64, ScoreBreakdown) {
    let breakdown = score_breakdown(shipment, trip);

    let total_score = breakdown.location * weights.location
        + breakdown.capacity * weights.capacity
        + breakdown.date * weights.date
        + breakdown.vehicle * weights.vehicle;

    (total_score.clamp(0.0, 100.0), breakdown)
}

/// Compute the four normalized sub-scores
pub fn score_breakdown(shipment: &Shipment, trip: &Trip) -> ScoreBreakdown {
    ScoreBreakdown {
        location: calculate_location_score(shipment, trip),
        capacity: calculate_capacity_score(shipment.weight, trip.available_capacity),
        date: calculate_date_score(shipment.preferred_date, trip.travel_date),
        vehicle: calculate_vehicle_score(shipment.vehicle_type, trip.vehicle_type),
    }
}

/// Average of pickup→origin and delivery→destination similarity
#[inline]
pub fn calculate_location_score(shipment: &Shipment, trip: &Trip) -> f64 {
    let pickup = location_similarity(&shipment.pickup_location, &trip.origin);
    let delivery = location_similarity(&shipment.delivery_location, &trip.destination);
    (pickup + delivery) / 2.0
}

/// Ratio of shipment weight to trip capacity, `None` when capacity is not positive
#[inline]
pub fn utilization(weight: f64, capacity: f64) -> Option<f64> {
    if capacity > 0.0 {
        Some(weight / capacity)
    } else {
        None
    }
}

/// Calculate capacity score (0-1)
///
/// Bands overlap on purpose and are evaluated top to bottom, first hit wins:
/// [0.7, 0.9] → 1.0, [0.5, 1.0] → 0.8, [0.3, 1.2] → 0.6, > 1.2 → 0.0, else 0.4.
#[inline]
pub fn calculate_capacity_score(weight: f64, capacity: f64) -> f64 {
    let Some(ratio) = utilization(weight, capacity) else {
        return 0.0;
    };

    if (0.7..=0.9).contains(&ratio) {
        1.0
    } else if (0.5..=1.0).contains(&ratio) {
        0.8
    } else if (0.3..=1.2).contains(&ratio) {
        0.6
    } else if ratio > 1.2 {
        0.0
    } else {
        0.4
    }
}

/// Absolute distance between two calendar dates in days
#[inline]
pub fn days_apart(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

/// Calculate date score (0-1) from the gap between preferred and travel date
///
/// A missing date on either side scores 0.
#[inline]
pub fn calculate_date_score(preferred: Option<NaiveDate>, travel: Option<NaiveDate>) -> f64 {
    let (Some(preferred), Some(travel)) = (preferred, travel) else {
        return 0.0;
    };

    match days_apart(preferred, travel) {
        0 => 1.0,
        1 => 0.9,
        2..=3 => 0.7,
        4..=7 => 0.5,
        8..=14 => 0.3,
        _ => 0.0,
    }
}

/// Whether two distinct vehicle types can stand in for each other
#[inline]
pub fn vehicles_compatible(a: VehicleType, b: VehicleType) -> bool {
    use VehicleType::*;
    matches!(
        (a, b),
        (Pickup, Van) | (Van, Pickup) | (Pickup, Truck) | (Truck, Pickup) | (Van, Truck) | (Truck, Van)
    )
}

/// Calculate vehicle score (0-1)
#[inline]
pub fn calculate_vehicle_score(preferred: VehicleType, actual: VehicleType) -> f64 {
    if preferred == VehicleType::Any || actual == VehicleType::Any {
        return 1.0;
    }

    if preferred == actual && preferred != VehicleType::Unknown {
        1.0
    } else if vehicles_compatible(preferred, actual) {
        0.7
    } else {
        0.3
    }
}
