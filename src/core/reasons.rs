use std::fmt;
use crate::core::location::location_similarity;
use crate::core::scoring::{days_apart, utilization};
use crate::models::{Shipment, Trip, VehicleType};

/// Pickup/delivery similarity needed before a location reason is shown
const LOCATION_REASON_THRESHOLD: f64 = 0.8;

/// Largest date gap that still earns a date reason
const DATE_REASON_MAX_DAYS: i64 = 3;

/// One human-readable justification for a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchReason {
    PickupMatches,
    DeliveryMatches,
    IdealCapacityFit,
    CapacityFits,
    SameDate,
    DatesApart(i64),
    SameVehicleType(VehicleType),
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::PickupMatches => write!(f, "Pickup location matches the trip origin"),
            MatchReason::DeliveryMatches => {
                write!(f, "Delivery location matches the trip destination")
            }
            MatchReason::IdealCapacityFit => {
                write!(f, "Shipment fills the available capacity almost perfectly")
            }
            MatchReason::CapacityFits => write!(f, "Shipment fits within the available capacity"),
            MatchReason::SameDate => write!(f, "Travel date matches your preferred date"),
            MatchReason::DatesApart(1) => write!(f, "Travel date is 1 day apart from your preferred date"),
            MatchReason::DatesApart(days) => {
                write!(f, "Travel date is {} days apart from your preferred date", days)
            }
            MatchReason::SameVehicleType(vehicle) => {
                write!(f, "Vehicle type matches your preference ({})", vehicle)
            }
        }
    }
}

/// Explain why a trip suits a shipment
///
/// Recomputes the raw similarity, utilization and date gap instead of
/// reading the composite, and emits reasons in a fixed order:
/// pickup, delivery, capacity, date, vehicle. The list may be empty.
pub fn explain(shipment: &Shipment, trip: &Trip) -> Vec<MatchReason> {
    let mut reasons = Vec::new();

    if location_similarity(&shipment.pickup_location, &trip.origin) >= LOCATION_REASON_THRESHOLD {
        reasons.push(MatchReason::PickupMatches);
    }

    if location_similarity(&shipment.delivery_location, &trip.destination)
        >= LOCATION_REASON_THRESHOLD
    {
        reasons.push(MatchReason::DeliveryMatches);
    }

    if let Some(ratio) = utilization(shipment.weight, trip.available_capacity) {
        if (0.7..=0.9).contains(&ratio) {
            reasons.push(MatchReason::IdealCapacityFit);
        } else if (0.5..=1.0).contains(&ratio) {
            reasons.push(MatchReason::CapacityFits);
        }
    }

    if let (Some(preferred), Some(travel)) = (shipment.preferred_date, trip.travel_date) {
        match days_apart(preferred, travel) {
            0 => reasons.push(MatchReason::SameDate),
            days if days <= DATE_REASON_MAX_DAYS => reasons.push(MatchReason::DatesApart(days)),
            _ => {}
        }
    }

    if shipment.vehicle_type == trip.vehicle_type && shipment.vehicle_type != VehicleType::Unknown {
        reasons.push(MatchReason::SameVehicleType(trip.vehicle_type));
    }

    reasons
}

/// Same as [`explain`], rendered as display strings
pub fn explain_text(shipment: &Shipment, trip: &Trip) -> Vec<String> {
    explain(shipment, trip).iter().map(ToString::to_string).collect()
}
