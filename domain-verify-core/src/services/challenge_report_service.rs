//! Challenge report service

use std::sync::Arc;

use domain_verify_provider::SiteEnv;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::ChallengeReportRow;

/// Tabulates the preauthorization challenges of an environment's custom domains.
pub struct ChallengeReportService {
    ctx: Arc<ServiceContext>,
}

impl ChallengeReportService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// One row per custom domain, sorted by domain name.
    ///
    /// Platform-managed domains are skipped. An environment without custom
    /// domains yields an empty report and a warning. Resolver and API errors
    /// are returned unchanged.
    pub async fn list_challenges(&self, site_env: &SiteEnv) -> CoreResult<Vec<ChallengeReportRow>> {
        let env = self.ctx.resolve(site_env).await?;
        let domains = self.ctx.domain_api.list_domains(&env).await?;

        let total = domains.len();
        let mut rows: Vec<ChallengeReportRow> = domains
            .iter()
            .filter(|d| d.is_custom())
            .map(ChallengeReportRow::from_domain)
            .collect();

        log::debug!(
            "{site_env}: {} custom domain(s) out of {total}",
            rows.len()
        );

        if rows.is_empty() {
            self.ctx
                .notifier
                .warning(&format!("There are no custom domains on {site_env}."));
            return Ok(rows);
        }

        rows.sort_by(|a, b| a.domain.cmp(&b.domain));
        Ok(rows)
    }
}
