//! Middleware stack for the API server
//!
//! Request IDs, tracing, timeouts, compression and CORS.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    Router,
};
use mood_common::CorsConfig;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upper bound for a whole request before answering 503
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Apply the middleware stack to the router
///
/// Outermost first: request ID, propagation, tracing, timeout, compression, CORS.
pub fn apply_middleware(
    router: Router<AppState>,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    router
        .layer(create_cors_layer(cors_config, is_production))
        .layer(CompressionLayer::new())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    header::HeaderName::from_static(REQUEST_ID_HEADER),
                    MakeRequestUuid,
                ))
                .layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
                    REQUEST_ID_HEADER,
                )))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<Body>| {
                            let request_id = request
                                .headers()
                                .get(REQUEST_ID_HEADER)
                                .and_then(|v| v.to_str().ok())
                                .unwrap_or("unknown");

                            tracing::info_span!(
                                "http_request",
                                method = %request.method(),
                                uri = %request.uri(),
                                request_id = %request_id,
                            )
                        })
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::SERVICE_UNAVAILABLE,
                    REQUEST_TIMEOUT,
                )),
        )
}

/// Create CORS layer from configuration
///
/// Configured origins are always honoured. With none configured, development
/// allows any origin and production blocks cross-origin browsers.
fn create_cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            header::RETRY_AFTER,
        ]);

    if !config.allowed_origins.is_empty() {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                origin.parse::<HeaderValue>().ok().or_else(|| {
                    tracing::warn!("Invalid CORS origin: {}", origin);
                    None
                })
            })
            .collect();

        tracing::info!("CORS: Allowing {} configured origins", origins.len());
        base_layer.allow_origin(AllowOrigin::list(origins))
    } else if is_production {
        tracing::warn!(
            "CORS: No allowed origins configured in production mode. \
             Requests from browsers will be blocked."
        );
        base_layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
    } else {
        tracing::warn!(
            "CORS: Allowing any origin (development mode). \
             Configure CORS_ALLOWED_ORIGINS for production."
        );
        base_layer.allow_origin(Any)
    }
}
