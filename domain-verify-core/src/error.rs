//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use domain_verify_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The domain is not registered on the environment
    #[error("The domain {domain} has not been added to {site_env}. Use the command {add_command} to add it.")]
    DomainNotFound {
        domain: String,
        site_env: String,
        /// Command that registers the domain
        add_command: String,
    },

    /// The platform could not compute an ownership status while polling
    #[error("Due to an error, we are temporarily unable to verify domain ownership.")]
    StatusUnavailable,

    /// Terminal verification failure, emitted after any diagnosis output
    #[error("{0}")]
    VerificationFailed(String),

    /// The run was aborted by the caller
    #[error("Verification cancelled")]
    Cancelled,

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::DomainNotFound { .. } | Self::VerificationFailed(_) | Self::Cancelled => true,
            Self::StatusUnavailable => false,
            Self::Provider(e) => e.is_expected(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
