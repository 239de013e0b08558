use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use crate::models::{ContactRequest, NewContactRequest, Shipment, Trip, TripStatus};

/// Errors that can occur when talking to the data store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Filter for candidate trip queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripFilter {
    pub status: TripStatus,
    pub travel_date_from: NaiveDate,
}

impl TripFilter {
    /// Active trips travelling on or after `today`
    pub fn candidates_on(today: NaiveDate) -> Self {
        Self {
            status: TripStatus::Active,
            travel_date_from: today,
        }
    }

    pub fn accepts(&self, trip: &Trip) -> bool {
        trip.status == self.status
            && trip
                .travel_date
                .map(|date| date >= self.travel_date_from)
                .unwrap_or(false)
    }
}

/// Data-access boundary used by the engine
///
/// Implementations perform one round trip per call and never retry.
/// `query_trips` returns rows ordered by travel date, then id.
#[async_trait]
pub trait MarketplaceStore: Send + Sync {
    async fn query_trips(&self, filter: &TripFilter) -> Result<Vec<Trip>, StoreError>;

    async fn get_shipment(&self, shipment_id: &str) -> Result<Option<Shipment>, StoreError>;

    async fn query_shipper_id_by_user(&self, user_id: &str) -> Result<Option<String>, StoreError>;

    async fn query_trip_carrier_id(&self, trip_id: &str) -> Result<Option<String>, StoreError>;

    async fn insert_contact_request(
        &self,
        record: &NewContactRequest,
    ) -> Result<ContactRequest, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

impl std::fmt::Debug for dyn MarketplaceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MarketplaceStore")
    }
}
