// Supplier fetching: one task per supplier, each under its own deadline,
// joined before anything downstream sees the data.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use crate::hotel::Hotel;
use crate::supplier::{SourceBatch, SourceCollection, Supplier};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Supplier responded with status {status_code}")]
    HttpStatus { status_code: u16 },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Fetch task failed: {0}")]
    TaskFailed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::HttpStatus {
                status_code: status.as_u16(),
            },
            None => FetchError::NetworkError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub timeout_ms: u64,
    // Order here is the order batches are merged in
    pub suppliers: Vec<Supplier>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            suppliers: Supplier::ALL.to_vec(),
        }
    }
}

// Issues the raw request for one supplier endpoint
#[async_trait]
pub trait SupplierTransport: Send + Sync + 'static {
    async fn get(&self, path: &str) -> Result<Bytes, FetchError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl SupplierTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?)
    }
}

// Where the orchestrator gets its per-supplier data from
#[async_trait]
pub trait HotelRepository: Send + Sync + 'static {
    async fn list_hotels(&self) -> SourceCollection;
}

pub struct SourceFetcher<T> {
    transport: Arc<T>,
    config: FetcherConfig,
}

impl<T: SupplierTransport> SourceFetcher<T> {
    pub fn new(transport: T, config: FetcherConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            config,
        }
    }

    // Fetch every configured supplier concurrently. A failing supplier is
    // logged and left out; the others are unaffected.
    pub async fn fetch_all(&self) -> SourceCollection {
        let timeout = Duration::from_millis(self.config.timeout_ms);

        let handles = self.config.suppliers.iter().map(|&supplier| {
            let transport = Arc::clone(&self.transport);
            tokio::spawn(async move {
                match tokio::time::timeout(timeout, fetch_supplier(transport.as_ref(), supplier)).await {
                    Ok(result) => result,
                    Err(_) => Err(FetchError::Timeout(timeout.as_millis() as u64)),
                }
            })
        });
        let outcomes = join_all(handles).await;

        let mut batches = Vec::with_capacity(outcomes.len());
        for (&supplier, outcome) in self.config.suppliers.iter().zip(outcomes) {
            let result = outcome.unwrap_or_else(|e| Err(FetchError::TaskFailed(e.to_string())));
            match result {
                Ok(hotels) => batches.push(SourceBatch { supplier, hotels }),
                Err(e) => warn!(%supplier, error = %e, "dropping supplier from this fetch"),
            }
        }

        let collection = SourceCollection::new(batches);
        info!(
            suppliers = collection.batches().len(),
            configured = self.config.suppliers.len(),
            hotels = collection.hotel_count(),
            "fetched supplier data"
        );
        collection
    }
}

async fn fetch_supplier<T: SupplierTransport + ?Sized>(
    transport: &T,
    supplier: Supplier,
) -> Result<Vec<Hotel>, FetchError> {
    let body = transport.get(supplier.path()).await?;
    supplier
        .decode(&body)
        .map_err(|e| FetchError::DecodeError(e.to_string()))
}

#[async_trait]
impl<T: SupplierTransport> HotelRepository for SourceFetcher<T> {
    async fn list_hotels(&self) -> SourceCollection {
        self.fetch_all().await
    }
}
