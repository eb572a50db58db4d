use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{ChallengeType, Domain, Environment, SiteEnv};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP 状态码
    pub status_code: u16,
    /// 原始错误消息（响应体）
    pub message: String,
    /// `Retry-After` 响应头（秒）
    pub retry_after: Option<u64>,
}

impl RawApiError {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            retry_after: None,
        }
    }

    #[must_use]
    pub fn with_retry_after(mut self, retry_after: Option<u64>) -> Self {
        self.retry_after = retry_after;
        self
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射 404 等错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 域名（用于 `DomainNotFound`）
    pub domain: Option<String>,
    /// 站点环境（用于 `EnvironmentNotFound`）
    pub site_env: Option<String>,
}

/// 错误映射 Trait（内部使用）
/// 将原始 HTTP 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            status_code: Some(raw.status_code),
            raw_message: raw.message,
        }
    }
}

/// Maps a `site.env` identifier to a request-capable environment.
#[async_trait]
pub trait EnvironmentResolver: Send + Sync {
    /// Resolve the environment, failing with
    /// [`ProviderError::EnvironmentNotFound`] for unknown sites or environments.
    async fn resolve(&self, site_env: &SiteEnv) -> Result<Environment>;
}

/// Read and trigger operations on an environment's domains.
#[async_trait]
pub trait DomainApi: Send + Sync {
    /// List every domain attached to the environment, challenges included.
    async fn list_domains(&self, env: &Environment) -> Result<Vec<Domain>>;

    /// Fetch the current snapshot of one domain.
    ///
    /// Fails with [`ProviderError::DomainNotFound`] when the domain has not been
    /// added to the environment.
    async fn get_domain(&self, env: &Environment, domain: &str) -> Result<Domain>;

    /// Ask the platform to start evaluating `challenge_type` asynchronously.
    ///
    /// Fails with [`ProviderError::DomainNotFound`] when the domain has not been
    /// added to the environment.
    async fn verify_ownership(
        &self,
        env: &Environment,
        domain: &str,
        challenge_type: ChallengeType,
    ) -> Result<()>;
}
