//! Domain Verify Core Library
//!
//! Business logic for custom-domain ownership verification:
//! - Challenge Reporter (`ChallengeReportService`): tabulates the ACME
//!   preauthorization challenges of every custom domain on an environment
//! - Verification Orchestrator (`VerificationService`): triggers ownership
//!   verification and polls until the platform confirms it, diagnosing failures
//!
//! The remote API, the environment resolver and user-facing output are
//! injected through traits, so the workflow runs the same against the real
//! platform client and against test doubles.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{ChallengeReportService, ServiceContext, VerificationService};
pub use traits::{LogNotifier, Notifier};
pub use types::{
    ChallengeReportRow, GuidanceConfig, PollPolicy, VerificationOutcome, VerificationState,
};
pub use utils::abort::{AbortHandle, AbortSignal, abort_pair};
