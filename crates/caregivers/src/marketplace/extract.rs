//! Request extractors whose rejections use the marketplace's `{"detail": ...}` error body.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::router::detail_response;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(MarketplaceRejection))]
pub(crate) struct Payload<T>(pub(crate) T);

/// Numeric record id taken from the path.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(MarketplaceRejection))]
pub(crate) struct RecordId<T>(pub(crate) T);

/// Query-string filters of a list endpoint.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(MarketplaceRejection))]
pub(crate) struct Filters<T>(pub(crate) T);

/// A request the router could not decode. Body errors keep axum's status (422 for a
/// well-formed body with missing or mistyped fields, 400 for broken JSON, 415 for a wrong
/// content type); undecodable path segments and query strings answer 422.
#[derive(Debug)]
pub(crate) struct MarketplaceRejection {
    status: StatusCode,
    detail: String,
}

impl From<JsonRejection> for MarketplaceRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for MarketplaceRejection {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for MarketplaceRejection {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for MarketplaceRejection {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status, detail = %self.detail, "request rejected");
        detail_response(self.status, self.detail)
    }
}
