//! # domain-verify-provider
//!
//! Client library for a hosting platform's custom-domain API: listing an
//! environment's domains, reading a domain's ACME preauthorization challenges
//! and ownership status, and asking the platform to (re)verify ownership.
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | Resolve `site.env` | `GET /site-names/{site}`, `GET /sites/{id}/environments` |
//! | List domains | `GET {env}/domains?acme_version=2` |
//! | Fetch domain | `GET {env}/domains/{domain}?acme_version=2` |
//! | Trigger verification | `POST {env}/domains/{domain}/verify-ownership` |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_verify_provider::{
//!     DomainApi, EnvironmentResolver, PlatformClient, PlatformConfig, SiteEnv,
//! };
//!
//! # async fn example() -> domain_verify_provider::Result<()> {
//! let client = PlatformClient::new(PlatformConfig {
//!     session_token: Some("session-token".to_string()),
//!     ..PlatformConfig::default()
//! })?;
//!
//! let env = client.resolve(&SiteEnv::parse("my-site.live")?).await?;
//! let domain = client.get_domain(&env, "example.com").await?;
//! println!("{:?}", domain.ownership_status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`ProviderError`]. An unregistered domain surfaces as
//! [`ProviderError::DomainNotFound`], an unknown site or environment as
//! [`ProviderError::EnvironmentNotFound`].
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `rustls` | Use rustls for TLS | Yes |
//! | `native-tls` | Use the platform-native TLS backend | No |

mod error;
mod platform;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};
pub use platform::{
    DEFAULT_API_URL, DEFAULT_CLIENT_ID, DEFAULT_MAX_RETRIES, PlatformClient, PlatformConfig,
};
pub use traits::{DomainApi, EnvironmentResolver};
pub use types::{
    ChallengeRecord, ChallengeType, Domain, DomainStatusEntry, DomainType, Environment,
    OwnershipStatus, PreprovisionProblem, PreprovisionResult, SiteEnv, VerificationStatus,
};
pub use utils::log_sanitizer::mask_secret;
