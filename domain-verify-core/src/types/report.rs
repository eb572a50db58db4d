use domain_verify_provider::{ChallengeRecord, ChallengeType, Domain};
use serde::Serialize;

/// Placeholder for fields the platform did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// One line of the challenge report, one per custom domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeReportRow {
    pub domain: String,
    /// Value of the domain's `https` status entry.
    pub status: String,
    pub http_status: String,
    pub http_key: String,
    pub http_token: String,
    pub dns_status: String,
    pub dns_key: String,
    pub dns_token: String,
}

impl ChallengeReportRow {
    /// Build a row from a domain snapshot, filling gaps with [`NOT_AVAILABLE`].
    pub fn from_domain(domain: &Domain) -> Self {
        let http = domain.challenge(ChallengeType::Http01);
        let dns = domain.challenge(ChallengeType::Dns01);

        Self {
            domain: domain.id.clone(),
            status: or_na(domain.https_status()),
            http_status: field(http, |c| c.status.as_deref()),
            http_key: field(http, |c| c.verification_key.as_deref()),
            http_token: field(http, |c| c.token.as_deref()),
            dns_status: field(dns, |c| c.status.as_deref()),
            dns_key: field(dns, |c| c.verification_key.as_deref()),
            dns_token: field(dns, |c| c.token.as_deref()),
        }
    }
}

fn field(
    record: Option<&ChallengeRecord>,
    get: impl Fn(&ChallengeRecord) -> Option<&str>,
) -> String {
    or_na(record.and_then(get))
}

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
