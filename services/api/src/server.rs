use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use psy_screen::config::AppConfig;
use psy_screen::error::AppError;
use psy_screen::interpretation::InterpretationCascade;
use psy_screen::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = load_catalog(&config.catalog)?;
    let cascade = InterpretationCascade::from_config(&config.providers)?;
    if config.providers.configured_count() == 0 {
        warn!("no interpretation provider configured; serving static interpretations only");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: Arc::new(catalog),
        cascade: Arc::new(cascade),
    };

    let providers = app_state.cascade.provider_kinds();
    let app = router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, ?providers, "psy-screen service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
