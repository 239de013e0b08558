use serde::{Deserialize, Serialize};
use crate::models::domain::{ContactRequest, MatchResult};

/// Response for the matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    #[serde(rename = "shipmentId")]
    pub shipment_id: String,
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Response for a created contact request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequestResponse {
    pub success: bool,
    #[serde(rename = "contactRequest")]
    pub contact_request: ContactRequest,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
