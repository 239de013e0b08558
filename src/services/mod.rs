// Service exports
pub mod backend;
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod session;
pub mod store;

pub use backend::{BackendClient, BackendTables};
pub use cache::CandidateCache;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use session::{AuthError, BearerSession, Claims, JwtAuthenticator, SessionProvider, StaticSession};
pub use store::{MarketplaceStore, StoreError, TripFilter};
