use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string for the matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "shipment_id", rename = "shipmentId")]
    pub shipment_id: String,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Body of a contact request submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateContactRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "shipment_id", rename = "shipmentId")]
    pub shipment_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "trip_id", rename = "tripId")]
    pub trip_id: String,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub message: String,
}
