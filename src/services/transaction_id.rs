use chrono::Utc;

/// Source of `clientTransactionId` values.
pub trait TransactionIdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// `TXN-<unix millis>`. Two requests in the same millisecond get the same id.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampIdGenerator;

impl TransactionIdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> String {
        format!("TXN-{}", Utc::now().timestamp_millis())
    }
}
