use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

const INTERNAL_ERROR: &str = "Error interno";

/// Failures talking to the gateway. A reply with an error status is not one of
/// these; it is passed through as-is.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to gateway failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("gateway response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("amountUSD inválido")]
    InvalidAmount,
    #[error("PAYPHONE_STORE_ID no válido en .env (debe ser UUID completo)")]
    InvalidStoreId { value: Option<String> },
    #[error("PAYPHONE_TOKEN no existe en .env")]
    MissingToken,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("{0}")]
    Internal(String),
}

impl PrepareError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PrepareError::InvalidAmount => StatusCode::BAD_REQUEST,
            PrepareError::InvalidStoreId { .. }
            | PrepareError::MissingToken
            | PrepareError::Gateway(_)
            | PrepareError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PrepareError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            PrepareError::InvalidStoreId { value } => {
                let mut body = json!({ "error": self.to_string() });
                if let Some(value) = value {
                    body["value"] = json!(value);
                }
                body
            }
            PrepareError::Gateway(_) | PrepareError::Internal(_) => json!({
                "error": INTERNAL_ERROR,
                "details": self.to_string(),
            }),
            PrepareError::InvalidAmount | PrepareError::MissingToken => json!({
                "error": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Turns a handler panic into the same `Error interno` body as any other fault.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };

    PrepareError::Internal(details).into_response()
}
