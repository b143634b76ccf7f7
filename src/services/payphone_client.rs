use crate::error::GatewayError;
use crate::models::payment::{GatewayPayload, GatewayReply};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};
use url::Url;

/// Outbound side of the prepare flow.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn prepare(&self, token: &str, payload: &GatewayPayload) -> Result<GatewayReply, GatewayError>;
}

pub struct PayPhoneClient {
    client: Client,
    prepare_url: Url,
}

impl PayPhoneClient {
    // No timeout on purpose: the call waits for whatever the transport does.
    pub fn new(prepare_url: Url) -> Result<Self, GatewayError> {
        let client = Client::builder().build()?;

        Ok(Self { client, prepare_url })
    }
}

#[async_trait]
impl PaymentGateway for PayPhoneClient {
    async fn prepare(&self, token: &str, payload: &GatewayPayload) -> Result<GatewayReply, GatewayError> {
        let response = self
            .client
            .post(self.prepare_url.clone())
            .header("Content-Type", "application/json")
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).map_err(|e| {
            warn!("PayPhone answered {} with a non-JSON body ({} bytes)", status, bytes.len());
            GatewayError::Decode(e)
        })?;

        info!("HTTP STATUS PAYPHONE: {}", status);
        Ok(GatewayReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    fn payload() -> GatewayPayload {
        GatewayPayload::new(
            2500,
            "TXN-42".to_string(),
            "0b5c2f6e-1111-2222-3333-444455556666".to_string(),
            "Pedido 42".to_string(),
            "http://localhost:3000/retorno.html".to_string(),
        )
    }

    async fn spawn_gateway(app: Router) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/api/button/Prepare")).unwrap()
    }

    #[tokio::test]
    async fn test_sends_bearer_token_and_payload() {
        let app = Router::new().route(
            "/api/button/Prepare",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                Json(json!({
                    "authorization": headers["authorization"].to_str().unwrap(),
                    "contentType": headers["content-type"].to_str().unwrap(),
                    "received": body,
                }))
            }),
        );
        let client = PayPhoneClient::new(spawn_gateway(app).await).unwrap();

        let reply = client.prepare("tok-123", &payload()).await.unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["authorization"], "Bearer tok-123");
        assert_eq!(reply.body["contentType"], "application/json");
        assert_eq!(reply.body["received"]["amount"], 2500);
        assert_eq!(reply.body["received"]["storeId"], reply.body["received"]["StoreId"]);
        assert_eq!(reply.body["received"]["responseUrl"], reply.body["received"]["ResponseUrl"]);
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let app = Router::new().route(
            "/api/button/Prepare",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"message": "Token inválido", "errorCode": 401})),
                )
            }),
        );
        let client = PayPhoneClient::new(spawn_gateway(app).await).unwrap();

        let reply = client.prepare("bad", &payload()).await.unwrap();

        assert_eq!(reply.status, 401);
        assert_eq!(reply.body["errorCode"], 401);
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let app = Router::new().route("/api/button/Prepare", post(|| async { "<html>oops</html>" }));
        let client = PayPhoneClient::new(spawn_gateway(app).await).unwrap();

        let err = client.prepare("tok", &payload()).await.unwrap_err();

        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/api/button/Prepare")).unwrap();
        let client = PayPhoneClient::new(url).unwrap();

        let err = client.prepare("tok", &payload()).await.unwrap_err();

        assert!(matches!(err, GatewayError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }
}
