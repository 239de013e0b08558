use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use crate::models::{ContactRequest, NewContactRequest, Shipment, Trip};
use super::store::{MarketplaceStore, StoreError, TripFilter};

/// REST client for the managed backend
///
/// Speaks the PostgREST dialect: `GET /rest/v1/<table>?column=op.value`,
/// `POST /rest/v1/<table>` with `Prefer: return=representation`.
/// Handles:
/// - Querying candidate trips
/// - Looking up shipments, shippers and trip owners
/// - Inserting contact requests
pub struct BackendClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: BackendTables,
}

/// Table names in the managed backend
#[derive(Debug, Clone)]
pub struct BackendTables {
    pub trips: String,
    pub shipments: String,
    pub shippers: String,
    pub contact_requests: String,
}

impl Default for BackendTables {
    fn default() -> Self {
        Self {
            trips: "trips".to_string(),
            shipments: "shipments".to_string(),
            shippers: "shippers".to_string(),
            contact_requests: "contact_requests".to_string(),
        }
    }
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(
        base_url: String,
        api_key: String,
        timeout_secs: u64,
        tables: BackendTables,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
            tables,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    /// GET rows from a table, `params` are already PostgREST-formatted pairs
    async fn select(&self, table: &str, params: &[(&str, String)]) -> Result<Vec<Value>, StoreError> {
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}?{}", self.table_url(table), query);

        tracing::debug!("Backend select: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Backend select on {} failed: {} - {}", table, status, body);
            return Err(StoreError::ApiError(format!("Failed to query {}: {}", table, status)));
        }

        let json: Value = response.json().await?;
        match json {
            Value::Array(rows) => Ok(rows),
            _ => Err(StoreError::InvalidResponse(format!("Expected a row array from {}", table))),
        }
    }

    async fn select_one(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Option<Value>, StoreError> {
        Ok(self.select(table, params).await?.into_iter().next())
    }
}

/// Pull a string column out of a row, accepting numeric ids too
fn string_column(row: &Value, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl MarketplaceStore for BackendClient {
    async fn query_trips(&self, filter: &TripFilter) -> Result<Vec<Trip>, StoreError> {
        let params = [
            ("select", "*".to_string()),
            ("status", format!("eq.{}", filter.status.as_str())),
            ("travel_date", format!("gte.{}", filter.travel_date_from.format("%Y-%m-%d"))),
            ("order", "travel_date.asc,id.asc".to_string()),
        ];

        let rows = self.select(&self.tables.trips, &params).await?;
        let total = rows.len();

        let trips: Vec<Trip> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<Trip>(row) {
                Ok(trip) => Some(trip),
                Err(e) => {
                    tracing::warn!("Skipping malformed trip row: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Queried {} candidate trips ({} rows)", trips.len(), total);

        Ok(trips)
    }

    async fn get_shipment(&self, shipment_id: &str) -> Result<Option<Shipment>, StoreError> {
        let params = [("select", "*".to_string()), ("id", format!("eq.{}", shipment_id))];

        match self.select_one(&self.tables.shipments, &params).await? {
            Some(row) => serde_json::from_value(row).map(Some).map_err(|e| {
                StoreError::InvalidResponse(format!("Failed to parse shipment: {}", e))
            }),
            None => Ok(None),
        }
    }

    async fn query_shipper_id_by_user(&self, user_id: &str) -> Result<Option<String>, StoreError> {
        let params = [("select", "id".to_string()), ("user_id", format!("eq.{}", user_id))];

        let row = self.select_one(&self.tables.shippers, &params).await?;
        Ok(row.and_then(|r| string_column(&r, "id")))
    }

    async fn query_trip_carrier_id(&self, trip_id: &str) -> Result<Option<String>, StoreError> {
        let params = [("select", "carrier_id".to_string()), ("id", format!("eq.{}", trip_id))];

        let row = self.select_one(&self.tables.trips, &params).await?;
        Ok(row.and_then(|r| string_column(&r, "carrier_id")))
    }

    async fn insert_contact_request(
        &self,
        record: &NewContactRequest,
    ) -> Result<ContactRequest, StoreError> {
        let payload = json!({
            "shipper_id": record.shipper_id,
            "carrier_id": record.carrier_id,
            "shipment_id": record.shipment_id,
            "trip_id": record.trip_id,
            "message": record.message,
            "status": record.status.as_str(),
        });

        let response = self
            .client
            .post(self.table_url(&self.tables.contact_requests))
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }
        if !status.is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to insert contact request: {}",
                status
            )));
        }

        let json: Value = response.json().await?;
        let row = match json {
            Value::Array(rows) => rows.into_iter().next(),
            other => Some(other),
        }
        .ok_or_else(|| StoreError::InvalidResponse("Empty insert response".into()))?;

        let created: ContactRequest = serde_json::from_value(row).map_err(|e| {
            StoreError::InvalidResponse(format!("Failed to parse contact request: {}", e))
        })?;

        tracing::debug!(
            "Inserted contact request {}: shipper {} -> carrier {}",
            created.id,
            created.shipper_id,
            created.carrier_id
        );

        Ok(created)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let response = self
            .client
            .get(format!("{}/rest/v1/", self.base_url.trim_end_matches('/')))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}
