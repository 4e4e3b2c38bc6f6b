use crate::cli::ServeArgs;
use crate::demo::seed_marketplace;
use crate::infra::AppState;
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use caregivers::config::AppConfig;
use caregivers::error::AppError;
use caregivers::marketplace::{InMemoryMarketplace, MarketplaceService};
use caregivers::navigation::RouteTable;
use caregivers::telemetry;
use chrono::Local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let routes = RouteTable::with_base(&config.navigation.base_path)?;
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        routes: Arc::new(routes),
    };

    let repository = Arc::new(InMemoryMarketplace::default());
    let marketplace = Arc::new(MarketplaceService::new(repository));
    if args.seed {
        let seeded = seed_marketplace(marketplace.as_ref(), Local::now().date_naive())?;
        info!(
            caregivers = seeded.caregivers.len(),
            families = seeded.families.len(),
            job_posts = seeded.job_posts.len(),
            "sample marketplace loaded"
        );
    }

    let app = with_marketplace_routes(marketplace)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, base = %config.navigation.base_path, "caregivers platform API ready");

    axum::serve(listener, app).await?;
    Ok(())
}
