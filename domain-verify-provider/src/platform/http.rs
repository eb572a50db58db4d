//! Platform HTTP 请求方法
//!
//! Every request goes through [`PlatformClient::send`], which returns the body
//! of a 2xx response and maps anything else through the error mapper.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::{mask_secret, truncate_for_log};

use super::retry::Backoff;
use super::PlatformClient;

impl PlatformClient {
    /// Attach the bearer token, if one is configured.
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.session_token {
            Some(token) => {
                log::debug!("[platform] Using session token {}", mask_secret(token));
                builder.bearer_auth(token)
            }
            None => builder,
        }
    }

    /// 执行 GET 请求并解析 JSON
    ///
    /// `retry` enables transport retries; only the caller knows whether the
    /// read belongs to a retry budget of its own.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        context: &ErrorContext,
        retry: bool,
    ) -> Result<T> {
        let request = self.authorized(self.client.get(url).query(query));
        let max_retries = if retry { self.config.max_retries } else { 0 };

        let body = self.send_with_retry(request, context, max_retries).await?;
        serde_json::from_str(&body).map_err(|e| {
            log::debug!("[platform] Undecodable body from {url}: {}", truncate_for_log(&body));
            ProviderError::ParseError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// 执行 POST 表单请求，忽略响应体
    pub(crate) async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        context: &ErrorContext,
    ) -> Result<()> {
        let request = self.authorized(self.client.post(url).form(form));
        self.send(request, context).await.map(drop)
    }

    /// Resend transient failures up to `max_retries` times.
    async fn send_with_retry(
        &self,
        request: RequestBuilder,
        context: &ErrorContext,
        max_retries: u32,
    ) -> Result<String> {
        let backoff = Backoff::default();
        let mut retry = 0;

        loop {
            if retry >= max_retries {
                return self.send(request, context).await;
            }
            let Some(attempt) = request.try_clone() else {
                // streaming bodies cannot be resent
                return self.send(request, context).await;
            };

            match self.send(attempt, context).await {
                Err(e) if e.is_retryable() => {
                    let delay = backoff.delay(&e, retry);
                    retry += 1;
                    log::debug!(
                        "[platform] Retry {retry}/{max_retries} in {}ms: {e}",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    /// Send once; 2xx yields the body, anything else a mapped error.
    ///
    /// Failures are logged at debug level only: callers decide whether an
    /// error is worth showing.
    async fn send(&self, request: RequestBuilder, context: &ErrorContext) -> Result<String> {
        let response = request.send().await.map_err(|e| {
            let detail = e.to_string();
            let provider = self.provider_name().to_string();
            if e.is_timeout() {
                ProviderError::Timeout { provider, detail }
            } else {
                ProviderError::NetworkError { provider, detail }
            }
        })?;

        let status = response.status();
        log::debug!("[platform] {} {}", status.as_u16(), response.url());

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: format!("failed to read response body: {e}"),
            })?;

        if status.is_success() {
            log::debug!("[platform] body: {}", truncate_for_log(&body));
            return Ok(body);
        }

        let raw = RawApiError::new(status.as_u16(), body).with_retry_after(retry_after);
        let err = self.map_error(raw, context.clone());
        log::debug!("[platform] {err}");
        Err(err)
    }
}
