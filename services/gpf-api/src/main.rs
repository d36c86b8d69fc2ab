//! Geodata platform WMS proxy and capability browser.

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use gpf_api::{config::ServiceConfig, router, state::AppState};

#[derive(Parser, Debug)]
#[command(name = "gpf-api")]
#[command(about = "WMS proxy and capability browser for the geodata platform")]
struct Args {
    /// Listen address
    #[arg(short, long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory of cached capability documents
    #[arg(long, env = "CAPABILITIES_CACHE_DIR", default_value = "./cache/capabilities")]
    cache_dir: PathBuf,

    /// Validity of a cached capability document, in seconds
    #[arg(long, env = "CAPABILITIES_CACHE_TTL_SECS", default_value_t = 43_200)]
    cache_ttl_secs: u64,

    /// Base URL substituted for {geoapiUrl} in server URLs
    #[arg(long, env = "GEOAPI_URL", default_value = "https://geoapi.fr")]
    geoapi_url: String,

    /// WMS endpoint GetMap requests are forwarded to
    #[arg(long, env = "UPSTREAM_WMS_URL", default_value = "https://data.geopf.fr/wms-r/wms")]
    upstream_wms_url: String,

    /// Timeout of upstream HTTP requests, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 60)]
    request_timeout_secs: u64,
}

impl Args {
    fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            cache_dir: self.cache_dir.clone(),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            geoapi_url: self.geoapi_url.clone(),
            upstream_wms_url: self.upstream_wms_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics exporter initialized");

    let config = args.service_config();
    info!(
        cache_dir = %config.cache_dir.display(),
        cache_ttl_secs = config.cache_ttl.as_secs(),
        upstream = %config.upstream_wms_url,
        "Starting geodata platform proxy"
    );

    let state = Arc::new(AppState::new(config)?);
    let app = router(state, prometheus_handle);

    let addr: SocketAddr = args.listen.parse()?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
