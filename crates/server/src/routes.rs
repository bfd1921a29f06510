pub mod companies;

use axum::{response::IntoResponse, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::{metrics, openapi::ApiDoc, state::ServerState};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> impl IntoResponse {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: the companies collection plus health,
/// metrics and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    metrics::init();

    // 集合端点同时接受带/不带尾部斜杠的路径
    let companies_routes = Router::new()
        .route("/companies/", get(companies::list).post(companies::create))
        .route("/companies", get(companies::list).post(companies::create));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/api-docs/openapi.json", get(openapi_json));

    companies_routes
        .with_state(state)
        .merge(ops)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
