use caregivers::config::AppConfig;
use caregivers::error::AppError;
use caregivers::navigation::RouteTable;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) routes: Arc<RouteTable>,
}

/// Navigation table under `base`, or under the configured base when none is given.
pub(crate) fn route_table(base: Option<String>) -> Result<RouteTable, AppError> {
    let base = match base {
        Some(base) => base,
        None => AppConfig::load()?.navigation.base_path,
    };
    Ok(RouteTable::with_base(&base)?)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
