//! Platform error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::PlatformClient;

/// HTTP status → unified error.
/// 404 is context-dependent: an unknown domain when a domain is in context,
/// otherwise an unknown site environment. 429 and gateway errors are transient.
impl ProviderErrorMapper for PlatformClient {
    fn provider_name(&self) -> &'static str {
        "platform"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.status_code {
            401 => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: non_empty(raw.message),
            },
            403 => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: non_empty(raw.message),
            },
            404 => match (context.domain, context.site_env) {
                (Some(domain), _) => ProviderError::DomainNotFound {
                    provider: self.provider_name().to_string(),
                    domain,
                    raw_message: non_empty(raw.message),
                },
                (None, Some(site_env)) => ProviderError::EnvironmentNotFound {
                    provider: self.provider_name().to_string(),
                    site_env,
                    raw_message: non_empty(raw.message),
                },
                (None, None) => self.unknown_error(raw),
            },
            429 => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: raw.retry_after,
                raw_message: non_empty(raw.message),
            },
            502..=504 => ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: format!("HTTP {}: {}", raw.status_code, truncate_for_log(&raw.message)),
            },
            _ => self.unknown_error(raw),
        }
    }
}

fn non_empty(message: String) -> Option<String> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformConfig;

    fn client() -> PlatformClient {
        PlatformClient::new(PlatformConfig::default()).unwrap()
    }

    fn domain_ctx() -> ErrorContext {
        ErrorContext {
            domain: Some("example.com".to_string()),
            site_env: Some("mysite.live".to_string()),
        }
    }

    #[test]
    fn unauthorized_is_invalid_credentials() {
        let err = client().map_error(RawApiError::new(401, ""), ErrorContext::default());
        assert!(matches!(
            err,
            ProviderError::InvalidCredentials { raw_message: None, .. }
        ));
    }

    #[test]
    fn forbidden_is_permission_denied() {
        let err = client().map_error(RawApiError::new(403, "no access"), ErrorContext::default());
        assert!(matches!(
            err,
            ProviderError::PermissionDenied { raw_message: Some(m), .. } if m == "no access"
        ));
    }

    #[test]
    fn not_found_with_domain_context() {
        let err = client().map_error(RawApiError::new(404, "Not Found"), domain_ctx());
        assert!(matches!(
            err,
            ProviderError::DomainNotFound { domain, .. } if domain == "example.com"
        ));
    }

    #[test]
    fn not_found_with_site_env_context() {
        let ctx = ErrorContext {
            domain: None,
            site_env: Some("mysite.live".to_string()),
        };
        let err = client().map_error(RawApiError::new(404, ""), ctx);
        assert!(matches!(
            err,
            ProviderError::EnvironmentNotFound { site_env, .. } if site_env == "mysite.live"
        ));
    }

    #[test]
    fn not_found_without_context_is_unknown() {
        let err = client().map_error(RawApiError::new(404, "gone"), ErrorContext::default());
        assert!(matches!(
            err,
            ProviderError::Unknown { status_code: Some(404), .. }
        ));
    }

    #[test]
    fn server_error_is_unknown() {
        let err = client().map_error(RawApiError::new(500, "boom"), domain_ctx());
        assert!(matches!(
            err,
            ProviderError::Unknown { status_code: Some(500), raw_message, .. } if raw_message == "boom"
        ));
    }

    #[test]
    fn too_many_requests_keeps_retry_after() {
        let raw = RawApiError::new(429, "slow down").with_retry_after(Some(7));
        let err = client().map_error(raw, domain_ctx());
        assert!(err.is_retryable());
        assert!(matches!(
            err,
            ProviderError::RateLimited { retry_after: Some(7), .. }
        ));
    }

    #[test]
    fn gateway_errors_are_network_errors() {
        for status in [502, 503, 504] {
            let err = client().map_error(RawApiError::new(status, "upstream"), domain_ctx());
            assert!(
                matches!(&err, ProviderError::NetworkError { detail, .. } if detail.starts_with(&format!("HTTP {status}"))),
                "unexpected error for {status}: {err:?}"
            );
        }
    }
}
