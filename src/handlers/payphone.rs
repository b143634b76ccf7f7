use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::PrepareError;
use crate::models::payment::{PreparationRequest, PrepareResponse};
use crate::services::{PaymentGateway, PrepareService, TransactionIdGenerator};

/// `POST /api/payphone/prepare`
///
/// Replies with the gateway's own status code. A body that is not JSON is read
/// as an empty request, so it fails amount validation like any other bad input.
pub async fn prepare_payment<G, I>(
    State(service): State<Arc<PrepareService<G, I>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<PrepareResponse>), PrepareError>
where
    G: PaymentGateway + 'static,
    I: TransactionIdGenerator + 'static,
{
    let request = match payload {
        Ok(Json(body)) => PreparationRequest::from_body(body),
        Err(e) => {
            warn!("Unreadable prepare body: {}", e);
            PreparationRequest::default()
        }
    };

    let response = service.prepare(request).await?;
    let status = StatusCode::from_u16(response.http_status)
        .map_err(|e| PrepareError::Internal(format!("gateway status {}: {}", response.http_status, e)))?;

    info!("Prepare answered with status {}", status);
    Ok((status, Json(response)))
}
