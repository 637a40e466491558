// Hotel data reconciliation across multiple suppliers

pub mod amenity;
pub mod cache;
pub mod clean;
pub mod config;
pub mod fetcher;
pub mod hotel;
pub mod images;
pub mod merge;
pub mod normalizer;
pub mod partition;
pub mod response;
pub mod server;
pub mod service;
pub mod supplier;

// Re-export key types for convenience
pub use amenity::{AmenityNormalizer, AmenityTaxonomy, NormalizedAmenities};
pub use cache::{Cache, CacheConfig, CacheStats, CacheStatsReport, TtlCache};
pub use clean::Cleaner;
pub use config::{ConfigError, ServiceConfig};
pub use fetcher::{
    FetchError, FetcherConfig, HotelRepository, HttpTransport, SourceFetcher, SupplierTransport,
};
pub use hotel::{Hotel, Image, Images, Location};
pub use images::dedup_images;
pub use merge::{merge_hotels, MergedHotels};
pub use partition::{IdFilter, PartitionIndex};
pub use response::{
    AmenitiesRecord, HotelRecord, ImageRecord, ImagesRecord, ListHotelsResponse, LocationRecord,
};
pub use server::{build_router, AppState, HealthResponse};
pub use service::{HotelService, ListHotelsRequest, SourceCache, CACHE_KEY};
pub use supplier::{SourceBatch, SourceCollection, Supplier};
