// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ContactRequest, ContactStatus, MatchResult, NewContactRequest, ScoreBreakdown, ScoringWeights,
    Shipment, Trip, TripStatus, VehicleType,
};
pub use requests::{CreateContactRequest, FindMatchesQuery};
pub use responses::{ContactRequestResponse, ErrorResponse, FindMatchesResponse, HealthResponse};
