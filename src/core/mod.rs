// Core algorithm exports
pub mod contact;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod location;
pub mod matcher;
pub mod reasons;
pub mod scoring;

pub use contact::ContactInitiator;
pub use engine::{MatchService, RankedMatches};
pub use error::EngineError;
pub use fetcher::CandidateFetcher;
pub use location::location_similarity;
pub use matcher::Matcher;
pub use reasons::{explain, MatchReason};
pub use scoring::calculate_match_score;
