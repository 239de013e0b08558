use crate::services::StoreError;
use thiserror::Error;

/// Failures surfaced by the matching engine
///
/// Scoring and explaining never fail; only the store round trips and the
/// contact flow's preconditions do.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Shipper record not found for user {0}")]
    ShipperNotFound(String),

    #[error("Trip not found: {0}")]
    TripNotFound(String),

    #[error("Shipment not found: {0}")]
    ShipmentNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data access failure: {0}")]
    DataAccess(#[from] StoreError),
}

impl EngineError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::NotAuthenticated => "not_authenticated",
            EngineError::ShipperNotFound(_) => "shipper_not_found",
            EngineError::TripNotFound(_) => "trip_not_found",
            EngineError::ShipmentNotFound(_) => "shipment_not_found",
            EngineError::InvalidInput(_) => "invalid_input",
            EngineError::DataAccess(_) => "data_access_failure",
        }
    }
}
