use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use crate::models::{ContactRequest, NewContactRequest, Shipment, Trip};
use super::store::{MarketplaceStore, StoreError, TripFilter};

#[derive(Debug, Default)]
struct MemoryState {
    trips: Vec<Trip>,
    shipments: HashMap<String, Shipment>,
    shippers_by_user: HashMap<String, String>,
    contact_requests: Vec<ContactRequest>,
    fail_with: Option<String>,
    trip_queries: usize,
}

/// In-process store for tests and local development
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn guard(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn with_trip(self, trip: Trip) -> Self {
        self.guard().trips.push(trip);
        self
    }

    pub fn with_shipment(self, shipment: Shipment) -> Self {
        self.guard().shipments.insert(shipment.id.clone(), shipment);
        self
    }

    pub fn with_shipper(self, user_id: &str, shipper_id: &str) -> Self {
        self.guard()
            .shippers_by_user
            .insert(user_id.to_string(), shipper_id.to_string());
        self
    }

    /// Make every subsequent call fail as if the store were unreachable
    pub fn set_unavailable(&self, reason: &str) {
        self.guard().fail_with = Some(reason.to_string());
    }

    pub fn contact_requests(&self) -> Vec<ContactRequest> {
        self.guard().contact_requests.clone()
    }

    /// Number of `query_trips` round trips served so far
    pub fn trip_queries(&self) -> usize {
        self.guard().trip_queries
    }

    fn check_available(state: &MemoryState) -> Result<(), StoreError> {
        match &state.fail_with {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MarketplaceStore for MemoryStore {
    async fn query_trips(&self, filter: &TripFilter) -> Result<Vec<Trip>, StoreError> {
        let mut state = self.lock()?;
        Self::check_available(&state)?;
        state.trip_queries += 1;

        let mut trips: Vec<Trip> = state
            .trips
            .iter()
            .filter(|trip| filter.accepts(trip))
            .cloned()
            .collect();
        trips.sort_by(|a, b| a.travel_date.cmp(&b.travel_date).then_with(|| a.id.cmp(&b.id)));

        Ok(trips)
    }

    async fn get_shipment(&self, shipment_id: &str) -> Result<Option<Shipment>, StoreError> {
        let state = self.lock()?;
        Self::check_available(&state)?;
        Ok(state.shipments.get(shipment_id).cloned())
    }

    async fn query_shipper_id_by_user(&self, user_id: &str) -> Result<Option<String>, StoreError> {
        let state = self.lock()?;
        Self::check_available(&state)?;
        Ok(state.shippers_by_user.get(user_id).cloned())
    }

    async fn query_trip_carrier_id(&self, trip_id: &str) -> Result<Option<String>, StoreError> {
        let state = self.lock()?;
        Self::check_available(&state)?;
        Ok(state
            .trips
            .iter()
            .find(|trip| trip.id == trip_id)
            .map(|trip| trip.carrier_id.clone()))
    }

    async fn insert_contact_request(
        &self,
        record: &NewContactRequest,
    ) -> Result<ContactRequest, StoreError> {
        let mut state = self.lock()?;
        Self::check_available(&state)?;

        let created = ContactRequest {
            id: uuid::Uuid::new_v4().to_string(),
            shipper_id: record.shipper_id.clone(),
            carrier_id: record.carrier_id.clone(),
            shipment_id: record.shipment_id.clone(),
            trip_id: record.trip_id.clone(),
            message: record.message.clone(),
            status: record.status,
            created_at: Utc::now(),
        };
        state.contact_requests.push(created.clone());

        Ok(created)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let state = self.lock()?;
        Ok(state.fail_with.is_none())
    }
}
