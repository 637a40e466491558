use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hotel_merge::config::DEFAULT_BASE_URL;
use hotel_merge::{
    build_router, Cache, Cleaner, HotelService, HttpTransport, ServiceConfig, SourceCache,
    SourceCollection, SourceFetcher, Supplier, TtlCache,
};

#[derive(Parser, Debug)]
#[command(name = "hotel-merge")]
#[command(about = "Merges hotel data from several suppliers behind one JSON endpoint")]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "HOTEL_MERGE_BIND")]
    bind: SocketAddr,

    /// Base URL the supplier paths are appended to
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "HOTEL_MERGE_BASE_URL")]
    base_url: String,

    /// How long fetched supplier data is reused
    #[arg(long, default_value_t = 3600, env = "HOTEL_MERGE_CACHE_TTL_SECONDS")]
    cache_ttl_seconds: u64,

    /// Per-supplier request timeout
    #[arg(long, default_value_t = 10_000, env = "HOTEL_MERGE_FETCH_TIMEOUT_MS")]
    fetch_timeout_ms: u64,

    /// Suppliers to query, in merge order
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_value = "patagonia,paperflies,acme",
        env = "HOTEL_MERGE_SUPPLIERS"
    )]
    suppliers: Vec<Supplier>,
}

impl From<Args> for ServiceConfig {
    fn from(args: Args) -> Self {
        ServiceConfig {
            base_url: args.base_url,
            bind_addr: args.bind,
            cache_ttl_seconds: args.cache_ttl_seconds,
            fetch_timeout_ms: args.fetch_timeout_ms,
            suppliers: args.suppliers,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_merge=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from(Args::parse());
    config.validate().context("invalid configuration")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.base_url,
        suppliers = ?config.suppliers,
        cache_ttl_seconds = config.cache_ttl_seconds,
        fetch_timeout_ms = config.fetch_timeout_ms,
        "starting hotel-merge"
    );

    let fetcher = SourceFetcher::new(
        HttpTransport::new(config.base_url.clone()),
        config.fetcher_config(),
    );
    let cache: Arc<SourceCache> =
        Arc::new(TtlCache::<Arc<SourceCollection>>::new(config.cache_config()));
    let service = HotelService::new(
        Arc::new(fetcher),
        cache,
        config.cache_ttl(),
        Cleaner::default(),
    );
    let app = build_router(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
