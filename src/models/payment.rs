use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CURRENCY: &str = "USD";
pub const DEFAULT_REFERENCE: &str = "Pago de prueba";

/// Body of `POST /api/payphone/prepare`.
///
/// Fields are kept as raw JSON: `amountUSD` may arrive as a number or a numeric
/// string and is only interpreted during validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreparationRequest {
    #[serde(rename = "amountUSD", default)]
    pub amount_usd: Option<Value>,
    #[serde(default)]
    pub reference: Option<Value>,
}

impl PreparationRequest {
    /// Anything that is not a JSON object reads as an empty request.
    pub fn from_body(body: Value) -> Self {
        serde_json::from_value(body).unwrap_or_default()
    }

    /// Falls back to [`DEFAULT_REFERENCE`] for absent, null, `false`, `0` and
    /// empty values. Other non-string values are forwarded as their JSON text.
    pub fn reference_or_default(&self) -> String {
        match &self.reference {
            None | Some(Value::Null) | Some(Value::Bool(false)) => DEFAULT_REFERENCE.to_string(),
            Some(Value::String(reference)) if reference.is_empty() => DEFAULT_REFERENCE.to_string(),
            Some(Value::String(reference)) => reference.clone(),
            Some(Value::Number(number)) if number.as_f64() == Some(0.0) => DEFAULT_REFERENCE.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

// Payload enviado ao PayPhone (button/Prepare)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayPayload {
    pub amount: u64,
    #[serde(rename = "amountWithoutTax")]
    pub amount_without_tax: u64,
    pub currency: String,
    #[serde(rename = "clientTransactionId")]
    pub client_transaction_id: String,
    #[serde(rename = "storeId")]
    pub store_id: String,
    pub reference: String,
    #[serde(rename = "responseUrl")]
    pub response_url: String,

    // Same values under the capitalized names; the gateway's expected casing is unconfirmed.
    #[serde(rename = "StoreId")]
    pub store_id_alias: String,
    #[serde(rename = "ResponseUrl")]
    pub response_url_alias: String,
}

impl GatewayPayload {
    pub fn new(
        amount: u64,
        client_transaction_id: String,
        store_id: String,
        reference: String,
        response_url: String,
    ) -> Self {
        Self {
            amount,
            amount_without_tax: amount,
            currency: CURRENCY.to_string(),
            client_transaction_id,
            store_id_alias: store_id.clone(),
            store_id,
            reference,
            response_url_alias: response_url.clone(),
            response_url,
        }
    }
}

/// What the gateway answered, before it is mapped onto our own response.
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub status: u16,
    pub body: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrepareResponse {
    #[serde(rename = "httpStatus")]
    pub http_status: u16,
    #[serde(rename = "requestSent")]
    pub request_sent: GatewayPayload,
    #[serde(rename = "responseReceived")]
    pub response_received: Value,
}
