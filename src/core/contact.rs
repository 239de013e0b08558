use std::sync::Arc;
use crate::core::error::EngineError;
use crate::models::{ContactRequest, ContactStatus, NewContactRequest};
use crate::services::{MarketplaceStore, SessionProvider};

/// Longest message accepted on a contact request, in characters
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Creates contact requests between a shipper and the carrier owning a trip
///
/// Every precondition is checked before anything is written, so a failed
/// call never leaves a partial record behind. Repeated calls create
/// repeated requests.
#[derive(Debug, Clone)]
pub struct ContactInitiator {
    store: Arc<dyn MarketplaceStore>,
}

impl ContactInitiator {
    pub fn new(store: Arc<dyn MarketplaceStore>) -> Self {
        Self { store }
    }

    pub async fn send_contact_request(
        &self,
        session: &dyn SessionProvider,
        shipment_id: &str,
        trip_id: &str,
        message: &str,
    ) -> Result<ContactRequest, EngineError> {
        let shipment_id = shipment_id.trim();
        let trip_id = trip_id.trim();
        if shipment_id.is_empty() {
            return Err(EngineError::InvalidInput("shipmentId is required".to_string()));
        }
        if trip_id.is_empty() {
            return Err(EngineError::InvalidInput("tripId is required".to_string()));
        }

        let message = message.trim();
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(EngineError::InvalidInput(format!(
                "message must be at most {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        let user_id = session
            .current_user()
            .await
            .ok_or(EngineError::NotAuthenticated)?;

        let shipper_id = self
            .store
            .query_shipper_id_by_user(&user_id)
            .await?
            .ok_or_else(|| EngineError::ShipperNotFound(user_id.clone()))?;

        let carrier_id = self
            .store
            .query_trip_carrier_id(trip_id)
            .await?
            .ok_or_else(|| EngineError::TripNotFound(trip_id.to_string()))?;

        let record = NewContactRequest {
            shipper_id,
            carrier_id,
            shipment_id: shipment_id.to_string(),
            trip_id: trip_id.to_string(),
            message: message.to_string(),
            status: ContactStatus::Pending,
        };

        let created = self.store.insert_contact_request(&record).await.map_err(|e| {
            tracing::error!("Failed to insert contact request for trip {}: {}", trip_id, e);
            EngineError::from(e)
        })?;

        tracing::info!(
            "Contact request {} created: shipper {} -> carrier {} (shipment {}, trip {})",
            created.id,
            created.shipper_id,
            created.carrier_id,
            created.shipment_id,
            created.trip_id
        );

        Ok(created)
    }
}
