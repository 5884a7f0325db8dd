use metrics_exporter_prometheus::PrometheusHandle;
use psy_screen::catalog::Catalog;
use psy_screen::config::CatalogConfig;
use psy_screen::error::AppError;
use psy_screen::interpretation::InterpretationCascade;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) cascade: Arc<InterpretationCascade>,
}

/// Catalog from `CATALOG_PATH` when set, otherwise the built-in questionnaires.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<Catalog, AppError> {
    match &config.path {
        Some(path) => {
            let catalog = Catalog::from_path(path)?;
            info!(path = %path.display(), tests = catalog.tests().len(), "loaded catalog file");
            Ok(catalog)
        }
        None => Ok(Catalog::builtin()),
    }
}
