// Query orchestration: cached supplier data -> merge -> partition -> filter -> clean

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::Cache;
use crate::clean::Cleaner;
use crate::fetcher::HotelRepository;
use crate::merge::merge_hotels;
use crate::partition::{IdFilter, PartitionIndex};
use crate::response::ListHotelsResponse;
use crate::supplier::SourceCollection;

pub const CACHE_KEY: &str = "hotels-cache-key";

pub type SourceCache = dyn Cache<Arc<SourceCollection>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListHotelsRequest {
    pub hotel_ids: Vec<String>,
    pub destination_ids: Vec<String>,
}

impl ListHotelsRequest {
    // Parse the comma separated query parameter form
    pub fn from_query(hotel_ids: Option<&str>, destination_ids: Option<&str>) -> Self {
        Self {
            hotel_ids: split_ids(hotel_ids),
            destination_ids: split_ids(destination_ids),
        }
    }
}

fn split_ids(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

pub struct HotelService {
    repository: Arc<dyn HotelRepository>,
    cache: Arc<SourceCache>,
    cache_ttl: Duration,
    cleaner: Cleaner,
}

impl HotelService {
    pub fn new(
        repository: Arc<dyn HotelRepository>,
        cache: Arc<SourceCache>,
        cache_ttl: Duration,
        cleaner: Cleaner,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl,
            cleaner,
        }
    }

    pub fn cleaner(&self) -> &Cleaner {
        &self.cleaner
    }

    pub async fn list_hotels(&self, request: &ListHotelsRequest) -> ListHotelsResponse {
        let filter = IdFilter::resolve(&request.hotel_ids, &request.destination_ids);
        let sources = self.load_sources().await;

        let merged = merge_hotels(&sources);
        let index = PartitionIndex::build(&merged);
        let selected = index.filter(&filter);

        debug!(
            ?filter,
            merged = merged.len(),
            buckets = index.bucket_count(),
            selected = selected.len(),
            "filtered merged hotels"
        );

        ListHotelsResponse {
            data: selected
                .values()
                .map(|hotel| self.cleaner.clean(hotel))
                .collect(),
        }
    }

    // Supplier data from the cache, fetching on a miss. Only the raw
    // per-supplier collection is cached so any filter can reuse it.
    async fn load_sources(&self) -> Arc<SourceCollection> {
        if let Some(cached) = self.cache.get(CACHE_KEY) {
            debug!(
                fetched_at = %cached.fetched_at(),
                stats = ?self.cache.stats(),
                "serving supplier data from cache"
            );
            return cached;
        }

        let sources = Arc::new(self.repository.list_hotels().await);
        if sources.is_empty() {
            // Nothing to serve; let the next request try the suppliers again
            info!("no supplier returned data, skipping cache population");
        } else {
            self.cache
                .set(CACHE_KEY, Arc::clone(&sources), Some(self.cache_ttl));
        }
        sources
    }
}
