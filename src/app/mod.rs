pub mod config;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::panic_response;
use crate::handlers::{health::health_handler, payphone::prepare_payment};
use crate::services::{PaymentGateway, PrepareService, TransactionIdGenerator};

pub fn build_router<G, I>(
    service: Arc<PrepareService<G, I>>,
    cors_allow_origins: &str,
) -> anyhow::Result<Router>
where
    G: PaymentGateway + 'static,
    I: TransactionIdGenerator + 'static,
{
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/payphone/prepare", post(prepare_payment::<G, I>))
        .with_state(service)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(cors_allow_origins)?)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}

/// `*` allows any origin; otherwise a comma-separated list of origins.
pub fn cors_layer(origins: &str) -> anyhow::Result<CorsLayer> {
    let origins = origins.trim();
    if origins.is_empty() || origins == "*" {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins: Vec<HeaderValue> = origins
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin {s:?}: {e}"))
        })
        .collect::<anyhow::Result<_>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}
