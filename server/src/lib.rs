pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod query;
pub mod raw_sql;
pub mod schema;
pub mod seed;
pub mod store;
pub mod telemetry;

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware;
use axum::Router;
use config::Settings;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
pub type AppState = Arc<db::DbPool>;

/// Build the full application: API routes, OpenAPI docs, and the static
/// frontend for every other path.
pub fn app(pool: AppState, settings: &Settings) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .nest("/api/recipes", api::recipes::router())
        .merge(swagger_ui)
        .fallback_service(ServeDir::new(&settings.static_dir))
        .with_state(pool)
        .layer(middleware::from_fn_with_state(
            settings.track_db_query_count,
            telemetry::db_query_count_header_middleware,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
        .layer(middleware::from_fn(telemetry::query_counting_middleware))
        .layer(CorsLayer::permissive())
}
