use crate::models::{MatchResult, Shipment, Trip, ScoringWeights};
use crate::core::{reasons::explain_text, scoring::calculate_match_score};

/// Scores, explains and ranks candidate trips for a shipment
///
/// # Pipeline
/// 1. Composite score per (shipment, trip) pair
/// 2. Reasons, derived independently of the composite
/// 3. Optional minimum-score threshold
/// 4. Stable descending sort, ties keep fetch order
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    min_score: f64,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        let sanitized = weights.sanitized();
        if sanitized != weights {
            tracing::warn!("Negative scoring weights clamped to 0: {:?}", weights);
        }

        Self {
            weights: sanitized,
            min_score: 0.0,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }

    /// Drop candidates scoring strictly below `min_score`. 0 keeps everything.
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score.clamp(0.0, 100.0);
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Composite score in [0, 100]
    pub fn score(&self, shipment: &Shipment, trip: &Trip) -> f64 {
        calculate_match_score(shipment, trip, &self.weights).0
    }

    /// Human-readable reasons for a pairing
    pub fn explain(&self, shipment: &Shipment, trip: &Trip) -> Vec<String> {
        explain_text(shipment, trip)
    }

    /// Score and explain a single trip
    pub fn evaluate(&self, shipment: &Shipment, trip: Trip) -> MatchResult {
        let (score, breakdown) = calculate_match_score(shipment, &trip, &self.weights);
        let reasons = explain_text(shipment, &trip);

        MatchResult {
            trip,
            score,
            reasons,
            breakdown,
        }
    }

    /// Rank candidates descending by composite score
    ///
    /// Every candidate is scored before sorting. The sort is stable, so
    /// equal scores keep the order the candidates were fetched in.
    pub fn rank(&self, shipment: &Shipment, candidates: Vec<Trip>) -> Vec<MatchResult> {
        let total_candidates = candidates.len();

        let mut scored: Vec<MatchResult> = candidates
            .into_iter()
            .map(|trip| self.evaluate(shipment, trip))
            .filter(|result| result.score >= self.min_score)
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::debug!(
            "Ranked {} of {} candidates for shipment {}",
            scored.len(),
            total_candidates,
            shipment.id
        );

        scored
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
