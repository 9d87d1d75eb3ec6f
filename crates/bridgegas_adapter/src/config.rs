#![forbid(unsafe_code)]

use std::env;
use std::net::SocketAddr;

pub const ENV_HTTP_BIND: &str = "BRIDGEGAS_HTTP_BIND";
pub const ENV_WHITELIST_READ_SECRET: &str = "BRIDGEGAS_WHITELIST_READ_SECRET";
pub const ENV_LOG_JSON: &str = "BRIDGEGAS_LOG_JSON";

const DEFAULT_HTTP_BIND: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub bind: SocketAddr,
    /// Shared secret for reading the whitelist. `None` denies every read.
    pub whitelist_read_secret: Option<String>,
    pub log_json: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            whitelist_read_secret: None,
            log_json: false,
        }
    }
}

impl AdapterConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_env_var_map(|key| env::var(key).ok())
    }

    pub fn from_env_var_map<F>(get: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = get(ENV_HTTP_BIND)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_HTTP_BIND.to_string());
        let bind: SocketAddr = bind_raw
            .parse()
            .map_err(|err| format!("invalid {ENV_HTTP_BIND} '{bind_raw}': {err}"))?;

        let whitelist_read_secret = get(ENV_WHITELIST_READ_SECRET)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let log_json = match get(ENV_LOG_JSON) {
            Some(v) => parse_bool(ENV_LOG_JSON, &v)?,
            None => false,
        };

        Ok(Self {
            bind,
            whitelist_read_secret,
            log_json,
        })
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" | "" => Ok(false),
        _ => Err(format!("invalid {key} '{raw}': expected true/false")),
    }
}
