use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use crate::models::Trip;

/// Short-lived in-memory cache of candidate trips, keyed by calendar day
///
/// Only fetched trips are cached. Scores are always recomputed.
#[derive(Clone)]
pub struct CandidateCache {
    trips: moka::future::Cache<NaiveDate, Arc<Vec<Trip>>>,
    ttl_secs: u64,
}

impl CandidateCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let trips = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { trips, ttl_secs }
    }

    pub async fn get(&self, day: NaiveDate) -> Option<Arc<Vec<Trip>>> {
        let hit = self.trips.get(&day).await;
        if hit.is_some() {
            tracing::trace!("Candidate cache hit: {}", day);
        }
        hit
    }

    pub async fn insert(&self, day: NaiveDate, trips: Arc<Vec<Trip>>) {
        self.trips.insert(day, trips).await;
        tracing::trace!("Candidate cache set: {}", day);
    }

    pub async fn invalidate_all(&self) {
        self.trips.invalidate_all();
        self.trips.run_pending_tasks().await;
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }
}

impl std::fmt::Debug for CandidateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateCache")
            .field("entries", &self.trips.entry_count())
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = CandidateCache::new(10, 60);
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        assert!(cache.get(day).await.is_none());

        cache.insert(day, Arc::new(vec![])).await;
        assert!(cache.get(day).await.is_some());

        cache.invalidate_all().await;
        assert!(cache.get(day).await.is_none());
    }
}
