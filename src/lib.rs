//! Shipmatch - matching and ranking engine for a logistics marketplace
//!
//! Given a shipment, the engine fetches eligible carrier trips, scores each
//! one on location, capacity, date and vehicle fit, explains the score in
//! plain language and returns the trips ranked best first. It can also
//! introduce a shipper to the carrier behind a chosen trip.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CandidateFetcher, ContactInitiator, EngineError, MatchService, Matcher, location_similarity};
pub use crate::models::{ContactRequest, MatchResult, ScoringWeights, Shipment, Trip, TripStatus, VehicleType};
pub use crate::services::{MarketplaceStore, SessionProvider, StoreError};
