//! HTTP boundary of the mock gateway.
//!
//! Routes mirror the real gateway's paths so clients only need a different
//! base URL. Handlers validate input, call the `PaymentGateway` and map
//! business failures onto HTTP status codes.

pub mod error;
pub mod handlers;

use crate::application::engine::PaymentGateway;
use crate::error::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub type SharedGateway = Arc<PaymentGateway>;

/// Builds the router with every route plus the CORS and request-tracing layers.
pub fn router(gateway: SharedGateway) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/api/merchant/payment-channel",
            get(handlers::get_payment_channels),
        )
        .route("/api/transaction/create", post(handlers::create_transaction))
        .route(
            "/api/transaction/detail",
            get(handlers::get_transaction_detail),
        )
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/reset", post(handlers::reset_data))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(gateway)
}

/// Serves the router on `listener` until `shutdown` completes.
pub async fn serve<F>(listener: TcpListener, gateway: SharedGateway, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
