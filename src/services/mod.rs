// Service exports
pub mod cache;
pub mod marketplace;
pub mod postgres;

pub use cache::{CacheManager, CacheKey, CacheError};
pub use marketplace::{MarketplaceClient, MarketplaceError};
pub use postgres::{PostgresClient, PostgresError, Interaction, InteractionStats, ListingInteraction};
