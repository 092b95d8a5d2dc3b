//! Backend entry-point: loads settings, connects to MongoDB, and serves the
//! item and clock-in endpoints until shutdown.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pantry::inbound::http::health::HealthState;
use pantry::outbound::persistence::MongoStore;
use server::{AppSettings, ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load settings")?;
    let store_config = settings.store_config()?;
    let bind_addr = settings.bind_addr()?;

    let store = MongoStore::connect(store_config)
        .await
        .wrap_err("failed to connect to MongoDB")?;
    info!(project = settings.project_name(), %bind_addr, "starting HTTP server");

    let outcome = serve(&settings, &store, bind_addr).await;
    store.close().await;
    outcome
}

async fn serve(
    settings: &AppSettings,
    store: &MongoStore,
    bind_addr: std::net::SocketAddr,
) -> Result<()> {
    let config = ServerConfig::new(bind_addr).with_swagger_ui(settings.debug);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), build_http_state(store), config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("HTTP server failed")
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("pantry")
        .endpoint("/metrics")
        .build()
        .map_err(|err| color_eyre::eyre::eyre!("configure Prometheus metrics: {err}"))
}
