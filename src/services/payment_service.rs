use crate::app::config::Config;
use crate::error::PrepareError;
use crate::models::payment::{GatewayPayload, PreparationRequest, PrepareResponse};
use crate::services::payphone_client::PaymentGateway;
use crate::services::transaction_id::TransactionIdGenerator;
use crate::utils::money::{parse_amount, to_minor_units};
use tracing::{error, info, warn};

/// Store ids shorter than this are assumed to be truncated configuration.
pub const MIN_STORE_ID_LEN: usize = 10;

pub struct PrepareService<G, I> {
    config: Config,
    gateway: G,
    id_generator: I,
}

impl<G, I> PrepareService<G, I>
where
    G: PaymentGateway,
    I: TransactionIdGenerator,
{
    pub fn new(config: Config, gateway: G, id_generator: I) -> Self {
        Self {
            config,
            gateway,
            id_generator,
        }
    }

    /// Validates the request, builds the gateway payload and forwards it.
    ///
    /// Validation and configuration failures return before the gateway is
    /// contacted. Once the gateway answers, its status is kept even when it is
    /// an error status.
    pub async fn prepare(&self, request: PreparationRequest) -> Result<PrepareResponse, PrepareError> {
        let payload = self.build_payload(&request)?;
        let token = self.token()?;

        info!(
            "Preparing PayPhone transaction {} for {} cents",
            payload.client_transaction_id, payload.amount
        );
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => info!("PAYLOAD ENVIADO A PAYPHONE:\n{}", json),
            Err(e) => warn!("Could not render payload for logging: {}", e),
        }

        let reply = self.gateway.prepare(token, &payload).await.map_err(|e| {
            error!("PayPhone call for {} failed: {}", payload.client_transaction_id, e);
            PrepareError::from(e)
        })?;

        info!("RESPUESTA PAYPHONE ({}): {}", reply.status, reply.body);

        Ok(PrepareResponse {
            http_status: reply.status,
            request_sent: payload,
            response_received: reply.body,
        })
    }

    /// Checks amount and store id, in that order, and assembles the payload.
    pub fn build_payload(&self, request: &PreparationRequest) -> Result<GatewayPayload, PrepareError> {
        let amount = parse_amount(request.amount_usd.as_ref())
            .and_then(to_minor_units)
            .ok_or_else(|| {
                warn!("Rejected amountUSD: {:?}", request.amount_usd);
                PrepareError::InvalidAmount
            })?;

        let store_id = self.store_id()?;

        Ok(GatewayPayload::new(
            amount,
            self.id_generator.next_id(),
            store_id.to_string(),
            request.reference_or_default(),
            self.config.response_url.clone(),
        ))
    }

    fn store_id(&self) -> Result<&str, PrepareError> {
        match self.config.store_id.as_deref() {
            Some(store_id) if store_id.trim().chars().count() >= MIN_STORE_ID_LEN => Ok(store_id),
            value => {
                error!("PAYPHONE_STORE_ID is missing or too short");
                Err(PrepareError::InvalidStoreId {
                    value: value.map(str::to_string),
                })
            }
        }
    }

    fn token(&self) -> Result<&str, PrepareError> {
        self.config.token.as_deref().ok_or_else(|| {
            error!("PAYPHONE_TOKEN is not set");
            PrepareError::MissingToken
        })
    }
}
