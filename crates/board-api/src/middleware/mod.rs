//! Middleware stack for the API server
//!
//! Provides logging, request ID generation, CORS, rate limiting, the upload
//! body limit and the ad mutation guard.

mod guard;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, Request, StatusCode},
    Router,
};
use board_common::{CorsConfig, RateLimitConfig};
use board_service::validation::MAX_IMAGE_SIZE;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::state::AppState;

pub use guard::require_ad_mutation_rights;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Largest accepted request body: one maximal image plus multipart framing
pub const MAX_BODY_SIZE: usize = MAX_IMAGE_SIZE + 1024 * 1024;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn trace_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> tracing::Span + Clone,
    DefaultOnRequest,
    DefaultOnResponse,
> {
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
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

fn request_id_header() -> header::HeaderName {
    header::HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Body limit, CORS, timeout, tracing and request ids, innermost first
fn with_common_layers(router: Router<AppState>, cors: CorsLayer) -> Router<AppState> {
    router
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(cors)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            REQUEST_TIMEOUT,
        ))
        .layer(trace_layer())
        .layer(PropagateRequestIdLayer::new(request_id_header()))
        .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
}

/// Stack without rate limiting and with permissive CORS
pub fn apply_middleware(router: Router<AppState>) -> Router<AppState> {
    with_common_layers(router, cors_layer(&CorsConfig::default(), false))
}

/// Full stack: configured CORS plus a global rate limit outermost
pub fn apply_middleware_with_config(
    router: Router<AppState>,
    rate_limit_config: &RateLimitConfig,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    let router = with_common_layers(router, cors_layer(cors_config, is_production));

    // One token every 1000/rps milliseconds
    let period_ms = (1000 / u64::from(rate_limit_config.requests_per_second.max(1))).max(1);
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(period_ms)
        .burst_size(rate_limit_config.burst)
        .key_extractor(GlobalKeyExtractor)
        .finish();

    match governor_conf {
        Some(config) => router.layer(GovernorLayer {
            config: Arc::new(config),
        }),
        None => {
            warn!(
                burst = rate_limit_config.burst,
                "Rate limiter disabled: burst size must be positive"
            );
            router
        }
    }
}

fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id_header(),
        ])
        .expose_headers([request_id_header()]);

    if config.allowed_origins.is_empty() {
        if is_production {
            warn!("No CORS origins configured, browser requests will be rejected");
            return layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()));
        }
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    info!(count = origins.len(), "CORS origins configured");
    layer.allow_origin(AllowOrigin::list(origins))
}
