use super::SharedGateway;
use crate::application::response::ApiResponse;
use crate::domain::channel::PaymentChannel;
use crate::domain::stats::StatsSnapshot;
use crate::domain::transaction::{CreateTransactionRequest, TransactionRecord, TransactionView};
use crate::error::{GatewayError, Result};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    #[serde(default)]
    pub reference: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        message: "Mock payment gateway is running",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

/// POST /api/transaction/create
///
/// 200 on success, 503 when the gateway simulates an outage.
pub async fn create_transaction(
    State(gateway): State<SharedGateway>,
    payload: std::result::Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionView>>)> {
    let Json(request) = payload.map_err(|rejection| {
        GatewayError::ValidationError(format!(
            "Invalid request format: {}",
            rejection.body_text()
        ))
    })?;
    request.validate()?;

    let response = gateway.create_transaction(request).await?;
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    Ok((status, Json(response)))
}

/// GET /api/transaction/detail?reference=<reference>
///
/// 400 for a missing reference, 404 when it is unknown. The reference is
/// matched exactly, surrounding whitespace included.
pub async fn get_transaction_detail(
    State(gateway): State<SharedGateway>,
    Query(query): Query<DetailQuery>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionRecord>>)> {
    let reference = query.reference.as_str();
    if reference.is_empty() {
        return Err(GatewayError::ValidationError(
            "Payment reference is required".to_string(),
        ));
    }

    let response = gateway.get_transaction_detail(reference).await?;
    debug!(reference, found = response.success, "transaction detail");
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(response)))
}

/// GET /api/merchant/payment-channel
pub async fn get_payment_channels(
    State(gateway): State<SharedGateway>,
) -> Json<ApiResponse<Vec<PaymentChannel>>> {
    Json(gateway.get_payment_channels().await)
}

/// GET /api/stats
pub async fn get_stats(
    State(gateway): State<SharedGateway>,
) -> Result<Json<ApiResponse<StatsSnapshot>>> {
    Ok(Json(gateway.get_stats().await?))
}

/// POST /api/reset
pub async fn reset_data(State(gateway): State<SharedGateway>) -> Result<Json<ApiResponse<()>>> {
    Ok(Json(gateway.reset_data().await?))
}
