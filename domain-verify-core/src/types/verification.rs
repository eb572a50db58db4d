use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Default documentation link shown after a failed verification.
pub const DEFAULT_DOCS_URL: &str = "https://pantheon.io/docs/guides/launch/domains";
/// Default support contact named after a failed verification.
pub const DEFAULT_SUPPORT_CONTACT: &str = "Pantheon Support";
/// Default program name used in command suggestions.
pub const DEFAULT_PROGRAM: &str = "domain-verify";

/// Bounds of the verification poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Maximum number of status fetches after the initial check.
    pub max_attempts: u32,
    /// Fixed wait before every fetch.
    pub interval: Duration,
    /// Fetch errors tolerated before the last one is returned.
    pub max_fetch_failures: u32,
    /// Snapshots without an ownership status tolerated before giving up.
    pub max_unavailable_polls: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 15,
            interval: Duration::from_secs(10),
            max_fetch_failures: 3,
            max_unavailable_polls: 10,
        }
    }
}

/// Wording used in guidance messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidanceConfig {
    /// Program name prefixed to suggested commands.
    pub program: String,
    /// Documentation link used when the platform does not provide one.
    pub docs_url: String,
    /// Who to contact for help.
    pub support_contact: String,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            docs_url: DEFAULT_DOCS_URL.to_string(),
            support_contact: DEFAULT_SUPPORT_CONTACT.to_string(),
        }
    }
}

impl GuidanceConfig {
    /// The command that registers `domain` on `site_env`.
    pub fn add_domain_command(&self, site_env: &impl fmt::Display, domain: &str) -> String {
        format!("{} domain:add {site_env} {domain}", self.program)
    }
}

/// States of one verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationState {
    Initial,
    /// Terminal: the platform already confirmed ownership.
    AlreadyVerified,
    /// No verification running (status failed or absent); one must be triggered.
    NotStarted,
    /// A verification is already running; only poll.
    InProgress,
    Polling,
    /// Terminal.
    Success,
    /// Terminal: every poll attempt was used without success.
    Exhausted,
    /// Terminal: the domain is not registered on the environment.
    MissingDomain,
}

impl VerificationState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::AlreadyVerified | Self::Success | Self::Exhausted | Self::MissingDomain
        )
    }
}

impl fmt::Display for VerificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initial => "INITIAL",
            Self::AlreadyVerified => "ALREADY_VERIFIED",
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Polling => "POLLING",
            Self::Success => "SUCCESS",
            Self::Exhausted => "EXHAUSTED",
            Self::MissingDomain => "MISSING_DOMAIN",
        };
        f.write_str(name)
    }
}

/// Successful end of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Ownership was already confirmed; nothing was triggered or polled.
    AlreadyVerified,
    /// Ownership was confirmed on poll number `attempts`.
    Verified { attempts: u32 },
}
