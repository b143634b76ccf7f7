pub mod health;
pub mod payphone;
