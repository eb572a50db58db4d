//! Core types

mod report;
mod verification;

pub use report::{ChallengeReportRow, NOT_AVAILABLE};
pub use verification::{GuidanceConfig, PollPolicy, VerificationOutcome, VerificationState};
