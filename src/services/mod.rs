pub mod payment_service;
pub mod payphone_client;
pub mod transaction_id;

#[cfg(test)]
pub mod testing;

pub use payment_service::PrepareService;
pub use payphone_client::{PayPhoneClient, PaymentGateway};
pub use transaction_id::{TimestampIdGenerator, TransactionIdGenerator};
