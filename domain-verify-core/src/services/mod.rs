//! Business logic services

mod challenge_report_service;
mod diagnosis;
mod verification_service;

pub use challenge_report_service::ChallengeReportService;
pub use verification_service::VerificationService;

use std::sync::Arc;

use domain_verify_provider::{DomainApi, Environment, EnvironmentResolver, SiteEnv};

use crate::error::CoreResult;
use crate::traits::Notifier;
use crate::types::GuidanceConfig;

/// Service context, holding every injected dependency.
///
/// The front end builds this once and shares it between services.
pub struct ServiceContext {
    /// Turns `site.env` into a request-capable environment
    pub resolver: Arc<dyn EnvironmentResolver>,
    /// Remote domain API
    pub domain_api: Arc<dyn DomainApi>,
    /// User-facing output
    pub notifier: Arc<dyn Notifier>,
    /// Wording for guidance messages
    pub guidance: GuidanceConfig,
}

impl ServiceContext {
    #[must_use]
    pub fn new(
        resolver: Arc<dyn EnvironmentResolver>,
        domain_api: Arc<dyn DomainApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            resolver,
            domain_api,
            notifier,
            guidance: GuidanceConfig::default(),
        }
    }

    #[must_use]
    pub fn with_guidance(mut self, guidance: GuidanceConfig) -> Self {
        self.guidance = guidance;
        self
    }

    /// Resolve an environment through the injected resolver.
    pub async fn resolve(&self, site_env: &SiteEnv) -> CoreResult<Environment> {
        Ok(self.resolver.resolve(site_env).await?)
    }
}
