use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use crate::core::error::EngineError;
use crate::models::Trip;
use crate::services::{CandidateCache, MarketplaceStore, TripFilter};

/// Retrieves trips eligible for matching
///
/// Eligible means `active` and travelling today or later. The store filters,
/// and rows are checked again here before they reach the ranking.
#[derive(Debug, Clone)]
pub struct CandidateFetcher {
    store: Arc<dyn MarketplaceStore>,
    cache: Option<CandidateCache>,
}

impl CandidateFetcher {
    pub fn new(store: Arc<dyn MarketplaceStore>) -> Self {
        Self { store, cache: None }
    }

    pub fn with_cache(mut self, cache: CandidateCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Candidates as of the current UTC calendar day
    pub async fn fetch_candidate_trips(&self) -> Result<Vec<Trip>, EngineError> {
        self.fetch_candidate_trips_on(Utc::now().date_naive()).await
    }

    /// Candidates as of an explicit calendar day (inclusive)
    pub async fn fetch_candidate_trips_on(&self, today: NaiveDate) -> Result<Vec<Trip>, EngineError> {
        if let Some(cache) = &self.cache {
            if let Some(trips) = cache.get(today).await {
                return Ok(trips.as_ref().clone());
            }
        }

        let filter = TripFilter::candidates_on(today);
        let fetched = self.store.query_trips(&filter).await.map_err(|e| {
            tracing::error!("Failed to fetch candidate trips: {}", e);
            EngineError::from(e)
        })?;

        let fetched_count = fetched.len();
        let trips: Vec<Trip> = fetched
            .into_iter()
            .filter(|trip| trip.is_eligible_on(today))
            .collect();

        if trips.len() != fetched_count {
            tracing::warn!(
                "Store returned {} ineligible trips for {}, dropped",
                fetched_count - trips.len(),
                today
            );
        }

        if let Some(cache) = &self.cache {
            cache.insert(today, Arc::new(trips.clone())).await;
        }

        tracing::debug!("Fetched {} candidate trips for {}", trips.len(), today);

        Ok(trips)
    }
}
