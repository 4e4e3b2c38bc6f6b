use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use caregivers::marketplace::{marketplace_router, MarketplaceRepository, MarketplaceService};
use caregivers::navigation::{Resolution, RouteEntry, RouteTable};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ResolveRequest {
    pub(crate) path: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct NavigationListing {
    pub(crate) base: String,
    pub(crate) routes: Vec<RouteView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RouteView {
    pub(crate) path: &'static str,
    pub(crate) name: &'static str,
    pub(crate) view: &'static str,
    pub(crate) href: String,
}

impl RouteView {
    fn new(table: &RouteTable, entry: &RouteEntry) -> Self {
        Self {
            path: entry.path,
            name: entry.name,
            view: entry.view.component(),
            href: table.href(entry.view),
        }
    }
}

pub(crate) fn with_marketplace_routes<R>(service: Arc<MarketplaceService<R>>) -> axum::Router
where
    R: MarketplaceRepository + 'static,
{
    marketplace_router(service)
        .route("/", axum::routing::get(root))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/navigation", axum::routing::get(navigation_endpoint))
        .route(
            "/api/v1/navigation/resolve",
            axum::routing::get(resolve_endpoint),
        )
}

pub(crate) async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Caregivers Platform API is running" }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn navigation_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<NavigationListing> {
    let table = state.routes.as_ref();
    Json(NavigationListing {
        base: table.base().to_string(),
        routes: table
            .entries()
            .iter()
            .map(|entry| RouteView::new(table, entry))
            .collect(),
    })
}

pub(crate) async fn resolve_endpoint(
    Extension(state): Extension<AppState>,
    Query(request): Query<ResolveRequest>,
) -> Response {
    let table = state.routes.as_ref();
    match table.resolve(&request.path) {
        Resolution::Matched(entry) => {
            (StatusCode::OK, Json(RouteView::new(table, &entry))).into_response()
        }
        Resolution::NotFound { path } => {
            (StatusCode::NOT_FOUND, Json(json!({ "path": path }))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use caregivers::marketplace::InMemoryMarketplace;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app_state(base: &str, ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            routes: Arc::new(RouteTable::with_base(base).expect("valid base")),
        }
    }

    fn app(state: AppState) -> axum::Router {
        let service = Arc::new(MarketplaceService::new(Arc::new(
            InMemoryMarketplace::default(),
        )));
        with_marketplace_routes(service).layer(Extension(state))
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn navigation_endpoint_lists_six_views_under_the_base() {
        let Json(listing) = navigation_endpoint(Extension(app_state("/portal", true))).await;

        assert_eq!(listing.base, "/portal/");
        assert_eq!(listing.routes.len(), 6);
        let jobs = listing
            .routes
            .iter()
            .find(|route| route.name == "jobs")
            .expect("jobs route listed");
        assert_eq!(jobs.view, "JobBoardView");
        assert_eq!(jobs.href, "/portal/jobs");
    }

    #[tokio::test]
    async fn resolve_endpoint_reports_unknown_locations() {
        let state = app_state("/", true);

        let found = resolve_endpoint(
            Extension(state.clone()),
            Query(ResolveRequest {
                path: "/Messages/?thread=4".to_string(),
            }),
        )
        .await;
        assert_eq!(found.status(), StatusCode::OK);
        assert_eq!(json_body(found).await["view"], "MessagesView");

        let missing = resolve_endpoint(
            Extension(state),
            Query(ResolveRequest {
                path: "/settings".to_string(),
            }),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(missing).await, json!({ "path": "/settings" }));
    }

    #[tokio::test]
    async fn readiness_reflects_the_startup_flag() {
        let response = app(app_state("/", false))
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["status"], "initializing");
    }

    #[tokio::test]
    async fn root_and_marketplace_share_one_router() {
        let router = app(app_state("/", true));

        let root = router
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(
            json_body(root).await["message"],
            "Caregivers Platform API is running"
        );

        let families = router
            .oneshot(Request::get("/families").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(families.status(), StatusCode::OK);
        assert_eq!(json_body(families).await, json!([]));
    }

    #[tokio::test]
    async fn resolve_route_decodes_the_query_string() {
        let response = app(app_state("/", true))
            .oneshot(
                Request::get("/api/v1/navigation/resolve?path=%2Fjobs%3Fpage%3D2")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["name"], "jobs");
        assert_eq!(body["path"], "/jobs");
    }
}
