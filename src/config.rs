// Service configuration, fixed at process start

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::cache::CacheConfig;
use crate::fetcher::FetcherConfig;
use crate::supplier::Supplier;

pub const DEFAULT_BASE_URL: &str = "https://5f2be0b4ffc88500167b85a0.mockapi.io/suppliers/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown supplier: {0}")]
    UnknownSupplier(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub bind_addr: SocketAddr,
    pub cache_ttl_seconds: u64,
    pub fetch_timeout_ms: u64,
    pub suppliers: Vec<Supplier>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cache_ttl_seconds: 3600,
            fetch_timeout_ms: 10_000,
            suppliers: Supplier::ALL.to_vec(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetch_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.suppliers.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "suppliers",
                reason: "at least one supplier is required".to_string(),
            });
        }
        for (i, supplier) in self.suppliers.iter().enumerate() {
            if self.suppliers[..i].contains(supplier) {
                return Err(ConfigError::InvalidValue {
                    field: "suppliers",
                    reason: format!("{} listed more than once", supplier),
                });
            }
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            default_ttl_seconds: self.cache_ttl_seconds,
        }
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout_ms: self.fetch_timeout_ms,
            suppliers: self.suppliers.clone(),
        }
    }
}
