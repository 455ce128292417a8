use std::env;
use std::str::FromStr;

use crate::ingest::ConflictPolicy;

pub const DEFAULT_API_URL: &str = "https://cloud-api.yandex.net/v1/disk/public/resources";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub api_url: String,
    pub page_limit: u32,
    pub conflict_policy: ConflictPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .ok_or_else(|| "DATABASE_URL must be set".to_string())?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            api_url: lookup("YANDEX_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            page_limit: lookup("YANDEX_PAGE_LIMIT")
                .unwrap_or_else(|| "100".to_string())
                .parse()
                .map_err(|_| "YANDEX_PAGE_LIMIT must be a valid u32".to_string())?,
            conflict_policy: lookup("INGEST_CONFLICT_POLICY")
                .map(|v| ConflictPolicy::from_str(&v))
                .unwrap_or(Ok(ConflictPolicy::default()))?,
        })
    }
}
