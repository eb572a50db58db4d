//! Hosting platform API client

mod client;
mod error;
mod http;
mod retry;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};

/// Default API endpoint.
pub const DEFAULT_API_URL: &str = "https://terminus.pantheon.io/api";
/// Client identifier sent with verification triggers.
pub const DEFAULT_CLIENT_ID: &str = "domain-verify-cli";
/// Transport retries for idempotent reads.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`PlatformClient`].
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// API base URL, without trailing slash.
    pub api_url: String,
    /// Session token sent as a bearer token. Never logged in full.
    pub session_token: Option<String>,
    /// Identifier reported with verification triggers.
    pub client_id: String,
    /// Transport retries for idempotent reads (site lookup, domain listing).
    pub max_retries: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_token: None,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// reqwest-backed implementation of [`EnvironmentResolver`](crate::EnvironmentResolver)
/// and [`DomainApi`](crate::DomainApi).
pub struct PlatformClient {
    pub(crate) client: Client,
    pub(crate) config: PlatformConfig,
}

impl PlatformClient {
    pub fn new(config: PlatformConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client()?,
            config,
        })
    }

    pub(crate) fn api_url(&self) -> &str {
        self.config.api_url.trim_end_matches('/')
    }
}

/// 创建带超时配置的 HTTP Client
fn create_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: "platform".to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}
