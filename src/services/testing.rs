//! Stand-ins for the gateway and id generator used by unit tests.

use crate::app::config::Config;
use crate::error::GatewayError;
use crate::models::payment::{GatewayPayload, GatewayReply};
use crate::services::payphone_client::PaymentGateway;
use crate::services::transaction_id::TransactionIdGenerator;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

pub const STORE_ID: &str = "0b5c2f6e-1111-2222-3333-444455556666";

pub fn config(token: Option<&str>, store_id: Option<&str>) -> Config {
    Config {
        server_port: 3001,
        token: token.map(str::to_string),
        store_id: store_id.map(str::to_string),
        response_url: "http://localhost:3000/retorno.html".to_string(),
        prepare_url: Url::parse("http://127.0.0.1:1/api/button/Prepare").unwrap(),
        cors_allow_origins: "*".to_string(),
    }
}

pub struct FixedId;

impl TransactionIdGenerator for FixedId {
    fn next_id(&self) -> String {
        "TXN-TEST".to_string()
    }
}

/// Answers every call with a canned reply and remembers what it was sent.
/// Clones share the same record, so a test can keep one after handing the
/// other to a service.
#[derive(Clone)]
pub struct RecordingGateway {
    reply: GatewayReply,
    calls: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<(String, GatewayPayload)>>>,
}

impl RecordingGateway {
    pub fn replying(status: u16, body: Value) -> Self {
        Self {
            reply: GatewayReply { status, body },
            calls: Arc::new(AtomicUsize::new(0)),
            last: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<(String, GatewayPayload)> {
        self.last.lock().unwrap().clone()
    }
}

impl Default for RecordingGateway {
    fn default() -> Self {
        Self::replying(200, json!({"paymentId": "X"}))
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn prepare(&self, token: &str, payload: &GatewayPayload) -> Result<GatewayReply, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((token.to_string(), payload.clone()));
        Ok(self.reply.clone())
    }
}
