use crate::infra::{AppState, RulesPreview, RulesPreviewRequest};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde_json::json;
use volume_discount::config::MetafieldConfig;
use volume_discount::discount::{self, CartInput, CartLinesDiscountsGenerateRunResult};

/// Discount endpoints that need no server state beyond the metafield location.
pub fn discount_router(metafield: MetafieldConfig) -> Router {
    Router::new()
        .route("/api/v1/discounts/run", post(run_endpoint))
        .route("/api/v1/discounts/rules/preview", post(preview_endpoint))
        .route("/api/v1/discounts/input-query", get(input_query_endpoint))
        .layer(Extension(metafield))
}

pub(crate) fn with_discount_routes(metafield: MetafieldConfig) -> Router {
    discount_router(metafield)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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
        json!({ "status": "ready", "metafield": state.metafield.qualified() })
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

pub(crate) async fn run_endpoint(
    Json(input): Json<CartInput>,
) -> Json<CartLinesDiscountsGenerateRunResult> {
    Json(discount::run(&input))
}

pub(crate) async fn preview_endpoint(
    Json(request): Json<RulesPreviewRequest>,
) -> Json<RulesPreview> {
    Json(RulesPreview::from_value(request.value.as_deref()))
}

pub(crate) async fn input_query_endpoint(
    Extension(metafield): Extension<MetafieldConfig>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/graphql")],
        discount::input_query(&metafield),
    )
}
