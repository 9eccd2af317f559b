use std::net::SocketAddr;
use std::str::FromStr;

use serde::Serialize;

/// Application-level constants
pub const APP_NAME: &str = "PharmaTrace";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Value of the `system` field in QR payloads; external scanners key on it.
pub const SYSTEM_ID: &str = "PharmaTrace";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "pharmatrace=info,tower_http=warn"
}

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8088";
const DEFAULT_VERIFY_URL: &str = "http://localhost:3000/verify";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Days before expiry at which a usable batch is flagged near expiry.
pub const DEFAULT_NEAR_EXPIRY_DAYS: u32 = 30;

/// Runtime configuration, read from `PHARMATRACE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifierConfig {
    /// Base URL of the records REST collaborator.
    pub api_base_url: String,
    /// Where the verification API listens.
    pub bind_addr: SocketAddr,
    /// Public page a scanned QR code opens.
    pub verify_base_url: String,
    pub request_timeout_secs: u64,
    /// Near-expiry window in days; 0 disables the flag.
    pub near_expiry_days: u32,
    /// Display fallbacks when the blockchain status endpoint is unreachable.
    pub network: Option<String>,
    pub contract_address: Option<String>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.into(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8088)),
            verify_base_url: DEFAULT_VERIFY_URL.into(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            near_expiry_days: DEFAULT_NEAR_EXPIRY_DAYS,
            network: None,
            contract_address: None,
        }
    }
}

impl VerifierConfig {
    /// Build from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparsable values fall back to
    /// defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_base_url: text("PHARMATRACE_API_URL").unwrap_or(defaults.api_base_url),
            bind_addr: parsed(text("PHARMATRACE_BIND"), "PHARMATRACE_BIND", defaults.bind_addr),
            verify_base_url: text("PHARMATRACE_VERIFY_URL").unwrap_or(defaults.verify_base_url),
            request_timeout_secs: parsed(
                text("PHARMATRACE_TIMEOUT_SECS"),
                "PHARMATRACE_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            near_expiry_days: parsed(
                text("PHARMATRACE_NEAR_EXPIRY_DAYS"),
                "PHARMATRACE_NEAR_EXPIRY_DAYS",
                defaults.near_expiry_days,
            ),
            network: text("PHARMATRACE_NETWORK"),
            contract_address: text("PHARMATRACE_CONTRACT"),
        }
    }
}

fn parsed<T: FromStr>(value: Option<String>, key: &str, default: T) -> T {
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparsable configuration value");
            default
        }),
        None => default,
    }
}
