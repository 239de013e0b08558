use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Vehicle categories shared by shipments (preference) and trips (actual vehicle)
///
/// Deserialization is case-insensitive; unrecognised text becomes `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Van,
    Pickup,
    Truck,
    Any,
    /// Anything the backend sent that is not a known category
    Unknown,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Van => "van",
            VehicleType::Pickup => "pickup",
            VehicleType::Truck => "truck",
            VehicleType::Any => "any",
            VehicleType::Unknown => "unknown",
        }
    }

}

impl Default for VehicleType {
    fn default() -> Self {
        VehicleType::Any
    }
}

impl From<&str> for VehicleType {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "van" => VehicleType::Van,
            "pickup" => VehicleType::Pickup,
            "truck" => VehicleType::Truck,
            "any" => VehicleType::Any,
            _ => VehicleType::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for VehicleType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(optional_text(deserializer)?
            .map(|raw| VehicleType::from(raw.as_str()))
            .unwrap_or_default())
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a trip. Only `Active` trips are ever matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Active,
    Inactive,
    Completed,
    Unknown,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Active => "active",
            TripStatus::Inactive => "inactive",
            TripStatus::Completed => "completed",
            TripStatus::Unknown => "unknown",
        }
    }
}

impl From<&str> for TripStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "active" => TripStatus::Active,
            "inactive" => TripStatus::Inactive,
            "completed" => TripStatus::Completed,
            _ => TripStatus::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for TripStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(optional_text(deserializer)?
            .map(|raw| TripStatus::from(raw.as_str()))
            .unwrap_or(TripStatus::Unknown))
    }
}

/// Cargo a shipper needs moved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    pub id: String,
    #[serde(
        rename = "pickupLocation",
        alias = "pickup_location",
        default,
        deserialize_with = "lenient_string"
    )]
    pub pickup_location: String,
    #[serde(
        rename = "deliveryLocation",
        alias = "delivery_location",
        default,
        deserialize_with = "lenient_string"
    )]
    pub delivery_location: String,
    /// Kilograms. Garbled or missing values are coerced to 0.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weight: f64,
    #[serde(
        rename = "preferredDate",
        alias = "preferred_date",
        default,
        deserialize_with = "lenient_date"
    )]
    pub preferred_date: Option<NaiveDate>,
    /// Blank or null means no preference (`Any`)
    #[serde(rename = "vehicleType", alias = "vehicle_type", default)]
    pub vehicle_type: VehicleType,
}

/// A carrier's planned journey with spare capacity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    #[serde(
        rename = "carrierId",
        alias = "carrier_id",
        default,
        deserialize_with = "lenient_string"
    )]
    pub carrier_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub origin: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub destination: String,
    /// Kilograms. Garbled or missing values are coerced to 0.
    #[serde(
        rename = "availableCapacity",
        alias = "available_capacity",
        default,
        deserialize_with = "lenient_f64"
    )]
    pub available_capacity: f64,
    #[serde(
        rename = "travelDate",
        alias = "travel_date",
        default,
        deserialize_with = "lenient_date"
    )]
    pub travel_date: Option<NaiveDate>,
    /// Blank, null or unrecognised becomes `Unknown`
    #[serde(
        rename = "vehicleType",
        alias = "vehicle_type",
        default = "unspecified_vehicle",
        deserialize_with = "trip_vehicle"
    )]
    pub vehicle_type: VehicleType,
    pub status: TripStatus,
}

impl Trip {
    /// Whether the trip may be offered as a candidate on `today`
    pub fn is_eligible_on(&self, today: NaiveDate) -> bool {
        self.status == TripStatus::Active
            && self.travel_date.map(|date| date >= today).unwrap_or(false)
    }
}

/// The four normalized sub-scores behind a composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub location: f64,
    pub capacity: f64,
    pub date: f64,
    pub vehicle: f64,
}

/// Scored candidate trip, recomputed on every query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub trip: Trip,
    pub score: f64,
    pub reasons: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Pending,
    Accepted,
    Declined,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Accepted => "accepted",
            ContactStatus::Declined => "declined",
        }
    }
}

impl From<&str> for ContactStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "accepted" => ContactStatus::Accepted,
            "declined" => ContactStatus::Declined,
            _ => ContactStatus::Pending,
        }
    }
}

/// Contact request as handed to the store; id and timestamp are assigned there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContactRequest {
    pub shipper_id: String,
    pub carrier_id: String,
    pub shipment_id: String,
    pub trip_id: String,
    pub message: String,
    pub status: ContactStatus,
}

/// Persisted introduction between a shipper and a carrier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub id: String,
    #[serde(rename = "shipperId", alias = "shipper_id")]
    pub shipper_id: String,
    #[serde(rename = "carrierId", alias = "carrier_id")]
    pub carrier_id: String,
    #[serde(rename = "shipmentId", alias = "shipment_id")]
    pub shipment_id: String,
    #[serde(rename = "tripId", alias = "trip_id")]
    pub trip_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    pub status: ContactStatus,
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Composite score weights, in points (the defaults sum to 100)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub location: f64,
    pub capacity: f64,
    pub date: f64,
    pub vehicle: f64,
}

impl ScoringWeights {
    /// Negative weights are floored at 0
    pub fn sanitized(self) -> Self {
        Self {
            location: self.location.max(0.0),
            capacity: self.capacity.max(0.0),
            date: self.date.max(0.0),
            vehicle: self.vehicle.max(0.0),
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            location: 40.0,
            capacity: 30.0,
            date: 20.0,
            vehicle: 10.0,
        }
    }
}

/// Non-blank text, or `None` for null, blanks and non-string values
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Null becomes an empty string, numbers are kept as text
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn unspecified_vehicle() -> VehicleType {
    VehicleType::Unknown
}

fn trip_vehicle<'de, D>(deserializer: D) -> Result<VehicleType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?
        .map(|raw| VehicleType::from(raw.as_str()))
        .unwrap_or_else(unspecified_vehicle))
}

/// Accepts numbers or numeric strings; anything else becomes 0
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_number).unwrap_or(0.0))
}

pub(crate) fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => n,
        _ => {
            tracing::debug!("Coercing non-numeric value {} to 0", value);
            0.0
        }
    }
}

/// Accepts `YYYY-MM-DD` or RFC 3339; anything else becomes `None`
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => parse_date(&s),
        _ => None,
    })
}

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}
