use std::env;

use anyhow::Context;
use url::Url;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_RESPONSE_URL: &str = "http://localhost:3000/retorno.html";
pub const DEFAULT_PREPARE_URL: &str = "https://pay.payphonetodoesposible.com/api/button/Prepare";

/// Process-wide settings, read once at startup and never mutated.
///
/// `token` and `store_id` stay optional here: their absence is reported per
/// request as a configuration error instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub token: Option<String>,
    pub store_id: Option<String>,
    pub response_url: String,
    pub prepare_url: Url,
    pub cors_allow_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prepare_url = lookup("PAYPHONE_PREPARE_URL")
            .unwrap_or_else(|| DEFAULT_PREPARE_URL.to_string());
        let prepare_url = Url::parse(&prepare_url)
            .with_context(|| format!("PAYPHONE_PREPARE_URL is not a valid URL: {prepare_url:?}"))?;

        Ok(Self {
            server_port: lookup("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            token: lookup("PAYPHONE_TOKEN").filter(|token| !token.is_empty()),
            store_id: lookup("PAYPHONE_STORE_ID"),
            response_url: lookup("RESPONSE_URL")
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_RESPONSE_URL.to_string()),
            prepare_url,
            cors_allow_origins: lookup("CORS_ALLOW_ORIGINS").unwrap_or_else(|| "*".to_string()),
        })
    }
}
