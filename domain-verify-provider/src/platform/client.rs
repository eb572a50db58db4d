//! `EnvironmentResolver` / `DomainApi` 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{DomainApi, EnvironmentResolver, ErrorContext, ProviderErrorMapper};
use crate::types::{ChallengeType, Domain, Environment, SiteEnv};

use super::PlatformClient;
use super::types::{EnvironmentMap, SiteLookup};

/// Query string asking for ACME v2 challenge data.
const ACME_VERSION_QUERY: [(&str, &str); 1] = [("acme_version", "2")];

#[async_trait]
impl EnvironmentResolver for PlatformClient {
    async fn resolve(&self, site_env: &SiteEnv) -> Result<Environment> {
        let context = ErrorContext {
            domain: None,
            site_env: Some(site_env.to_string()),
        };

        let lookup_url = format!(
            "{}/site-names/{}",
            self.api_url(),
            urlencoding::encode(&site_env.site)
        );
        let site: SiteLookup = self.get_json(&lookup_url, &[], &context, true).await?;

        let site_url = format!("{}/sites/{}", self.api_url(), site.id);
        let environments: EnvironmentMap = self
            .get_json(&format!("{site_url}/environments"), &[], &context, true)
            .await?;

        if !environments.contains_key(&site_env.env) {
            return Err(ProviderError::EnvironmentNotFound {
                provider: self.provider_name().to_string(),
                site_env: site_env.to_string(),
                raw_message: Some(format!(
                    "environment '{}' does not exist on site '{}'",
                    site_env.env, site_env.site
                )),
            });
        }

        log::debug!("[platform] Resolved {site_env} to site {}", site.id);

        Ok(Environment {
            site_env: site_env.clone(),
            url: format!("{site_url}/environments/{}", site_env.env),
        })
    }
}

#[async_trait]
impl DomainApi for PlatformClient {
    async fn list_domains(&self, env: &Environment) -> Result<Vec<Domain>> {
        let context = ErrorContext {
            domain: None,
            site_env: Some(env.site_env.to_string()),
        };
        self.get_json(&env.domains_url(), &ACME_VERSION_QUERY, &context, true)
            .await
    }

    async fn get_domain(&self, env: &Environment, domain: &str) -> Result<Domain> {
        let context = ErrorContext {
            domain: Some(domain.to_string()),
            site_env: Some(env.site_env.to_string()),
        };
        self.get_json(&env.domain_url(domain), &ACME_VERSION_QUERY, &context, false)
            .await
    }

    async fn verify_ownership(
        &self,
        env: &Environment,
        domain: &str,
        challenge_type: ChallengeType,
    ) -> Result<()> {
        let context = ErrorContext {
            domain: Some(domain.to_string()),
            site_env: Some(env.site_env.to_string()),
        };
        let url = format!("{}/verify-ownership", env.domain_url(domain));
        let form = [
            ("challenge_type", challenge_type.as_str()),
            ("client", self.config.client_id.as_str()),
        ];
        self.post_form(&url, &form, &context).await
    }
}
