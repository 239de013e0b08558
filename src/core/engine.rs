use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use crate::core::{error::EngineError, fetcher::CandidateFetcher, matcher::Matcher};
use crate::models::{MatchResult, Shipment};
use crate::services::MarketplaceStore;

/// Ranked matches for one shipment
#[derive(Debug, Clone)]
pub struct RankedMatches {
    pub shipment: Shipment,
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Fetch → score/explain → rank, end to end
#[derive(Debug, Clone)]
pub struct MatchService {
    store: Arc<dyn MarketplaceStore>,
    fetcher: CandidateFetcher,
    matcher: Matcher,
}

impl MatchService {
    pub fn new(store: Arc<dyn MarketplaceStore>, fetcher: CandidateFetcher, matcher: Matcher) -> Self {
        Self {
            store,
            fetcher,
            matcher,
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Rank today's candidates for a stored shipment
    pub async fn find_matches_for_id(&self, shipment_id: &str) -> Result<RankedMatches, EngineError> {
        self.find_matches_for_id_on(shipment_id, Utc::now().date_naive()).await
    }

    pub async fn find_matches_for_id_on(
        &self,
        shipment_id: &str,
        today: NaiveDate,
    ) -> Result<RankedMatches, EngineError> {
        let shipment_id = shipment_id.trim();
        if shipment_id.is_empty() {
            return Err(EngineError::InvalidInput("shipmentId is required".to_string()));
        }

        let shipment = self
            .store
            .get_shipment(shipment_id)
            .await?
            .ok_or_else(|| EngineError::ShipmentNotFound(shipment_id.to_string()))?;

        self.find_matches_on(shipment, today).await
    }

    /// Rank candidates for a shipment value as of `today`
    pub async fn find_matches_on(
        &self,
        shipment: Shipment,
        today: NaiveDate,
    ) -> Result<RankedMatches, EngineError> {
        let candidates = self.fetcher.fetch_candidate_trips_on(today).await?;
        let total_candidates = candidates.len();

        let matches = self.matcher.rank(&shipment, candidates);

        tracing::info!(
            "Ranked {} matches for shipment {} (from {} candidates)",
            matches.len(),
            shipment.id,
            total_candidates
        );

        Ok(RankedMatches {
            shipment,
            matches,
            total_candidates,
        })
    }
}
