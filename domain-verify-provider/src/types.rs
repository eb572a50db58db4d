use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ProviderError;

// ============ Site Environment ============

/// A `site-name.env` identifier as typed by the user.
///
/// The environment name is everything after the last `.`, so site names
/// containing dots are not supported (the platform forbids them anyway).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteEnv {
    /// Site machine name (e.g., `"my-site"`).
    pub site: String,
    /// Environment name (e.g., `"live"`, `"dev"`).
    pub env: String,
}

impl SiteEnv {
    /// Parse a `site.env` identifier.
    pub fn parse(raw: &str) -> Result<Self, ProviderError> {
        let invalid = |detail: &str| ProviderError::InvalidParameter {
            provider: "platform".to_string(),
            param: "site_env".to_string(),
            detail: format!("{detail}: '{raw}' (expected `site-name.env`)"),
        };

        let (site, env) = raw
            .trim()
            .rsplit_once('.')
            .ok_or_else(|| invalid("missing environment"))?;

        if site.is_empty() || env.is_empty() {
            return Err(invalid("empty site or environment"));
        }

        Ok(Self {
            site: site.to_string(),
            env: env.to_string(),
        })
    }
}

impl fmt::Display for SiteEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.site, self.env)
    }
}

impl FromStr for SiteEnv {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A resolved site environment: the identifier plus the base URL of its domain API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// The identifier this environment was resolved from.
    pub site_env: SiteEnv,
    /// Base URL for the environment, e.g. `https://host/api/sites/<id>/environments/live`.
    pub url: String,
}

impl Environment {
    /// URL of a single domain resource, with the domain name percent-encoded.
    pub fn domain_url(&self, domain: &str) -> String {
        format!(
            "{}/domains/{}",
            self.url.trim_end_matches('/'),
            urlencoding::encode(domain)
        )
    }

    /// URL of the domain collection.
    pub fn domains_url(&self) -> String {
        format!("{}/domains", self.url.trim_end_matches('/'))
    }
}

// ============ Challenge Types ============

/// Which ACME preauthorization proof is being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChallengeType {
    /// Publish a DNS TXT record.
    #[serde(rename = "dns-01")]
    Dns01,
    /// Serve a token file over HTTP.
    #[serde(rename = "http-01")]
    Http01,
}

impl ChallengeType {
    /// The wire identifier (`"dns-01"` / `"http-01"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dns01 => "dns-01",
            Self::Http01 => "http-01",
        }
    }
}

impl fmt::Display for ChallengeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChallengeType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dns-01" => Ok(Self::Dns01),
            "http-01" => Ok(Self::Http01),
            other => Err(ProviderError::InvalidParameter {
                provider: "platform".to_string(),
                param: "challenge_type".to_string(),
                detail: format!("unsupported challenge type: {other}"),
            }),
        }
    }
}

/// Snapshot of one preauthorization challenge as reported by the platform.
///
/// Every field is optional; absent values are rendered as `N/A` by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    /// Free-form challenge status (`pending`, `valid`, ...).
    #[serde(default)]
    pub status: Option<String>,
    /// Name the caller must publish (TXT record name or token file path).
    #[serde(default)]
    pub verification_key: Option<String>,
    /// Token the caller must publish.
    #[serde(default)]
    pub token: Option<String>,
    /// Value the platform will check for.
    #[serde(default)]
    pub verification_value: Option<String>,
}

impl ChallengeRecord {
    /// The value the platform checks against, falling back to the raw token.
    pub fn published_value(&self) -> Option<&str> {
        self.verification_value
            .as_deref()
            .or(self.token.as_deref())
    }
}

// ============ Ownership Status ============

/// The platform's verdict on domain-control verification.
///
/// Serialized as the raw status string; unrecognized values are preserved in
/// [`Other`](Self::Other) and an empty string means "not yet computed".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerificationStatus {
    Success,
    Failed,
    InProgress,
    /// Verification cannot currently run (typically the CA rate limit was hit).
    Unavailable,
    #[default]
    NotComputed,
    Other(String),
}

impl VerificationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::InProgress => "in_progress",
            Self::Unavailable => "unavailable",
            Self::NotComputed => "",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for VerificationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "success" => Self::Success,
            "failed" => Self::Failed,
            "in_progress" => Self::InProgress,
            "unavailable" => Self::Unavailable,
            "" => Self::NotComputed,
            _ => Self::Other(value),
        }
    }
}

impl From<VerificationStatus> for String {
    fn from(value: VerificationStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured description of the last failed preprovisioning attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprovisionProblem {
    #[serde(rename = "PantheonTitle", default)]
    pub title: Option<String>,
    #[serde(rename = "PantheonDetail", default)]
    pub detail: Option<String>,
    #[serde(rename = "PantheonActionItem", default)]
    pub action_item: Option<String>,
    /// ACME problem type URN, e.g. `urn:ietf:params:acme:error:dns`.
    #[serde(rename = "ProblemType", default)]
    pub problem_type: Option<String>,
    /// Raw problem detail as returned by the certificate authority.
    #[serde(rename = "Detail", default)]
    pub raw_detail: Option<String>,
    #[serde(rename = "PantheonDocsLink", default)]
    pub docs_link: Option<String>,
    #[serde(rename = "SupportReference", default)]
    pub support_reference: Option<String>,
}

/// Result of automated verification ahead of certificate issuance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprovisionResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: VerificationStatus,
    #[serde(default)]
    pub last_preprovision_problem: Option<PreprovisionProblem>,
}

/// Ownership verification sub-resource of a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: VerificationStatus,
    /// Human-readable explanation, set when `status` is `unavailable`.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub preprovision_result: Option<PreprovisionResult>,
}

impl OwnershipStatus {
    /// Status of the preprovision result, [`VerificationStatus::NotComputed`] when missing.
    pub fn preprovision_status(&self) -> VerificationStatus {
        self.preprovision_result
            .as_ref()
            .map(|r| r.status.clone())
            .unwrap_or_default()
    }

    /// The last recorded problem, if any.
    pub fn last_problem(&self) -> Option<&PreprovisionProblem> {
        self.preprovision_result
            .as_ref()
            .and_then(|r| r.last_preprovision_problem.as_ref())
    }
}

// ============ Domain ============

/// Kind of domain attached to an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DomainType {
    /// A domain added by the site owner.
    Custom,
    /// Platform-managed domain kinds (e.g. `platform`), kept verbatim.
    Other(String),
}

impl Default for DomainType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for DomainType {
    fn from(value: String) -> Self {
        if value == "custom" {
            Self::Custom
        } else {
            Self::Other(value)
        }
    }
}

impl From<DomainType> for String {
    fn from(value: DomainType) -> Self {
        match value {
            DomainType::Custom => "custom".to_string(),
            DomainType::Other(s) => s,
        }
    }
}

/// One entry of a domain's status list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainStatusEntry {
    /// Status category, e.g. `"https"` or `"dns"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

/// A domain resource as returned by the platform (`acme_version=2`).
///
/// A fresh fetch always replaces a previous snapshot; nothing is merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Fully-qualified domain name.
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub domain_type: DomainType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Vec<DomainStatusEntry>,
    #[serde(
        rename = "acme_preauthorization_challenges",
        default,
        deserialize_with = "null_as_default"
    )]
    pub challenges: BTreeMap<String, ChallengeRecord>,
    #[serde(default)]
    pub ownership_status: Option<OwnershipStatus>,
}

impl Domain {
    pub fn is_custom(&self) -> bool {
        self.domain_type == DomainType::Custom
    }

    /// The challenge record for `challenge_type`, if the platform issued one.
    pub fn challenge(&self, challenge_type: ChallengeType) -> Option<&ChallengeRecord> {
        self.challenges.get(challenge_type.as_str())
    }

    /// The value currently published for `challenge_type`.
    pub fn challenge_value(&self, challenge_type: ChallengeType) -> Option<&str> {
        self.challenge(challenge_type)
            .and_then(ChallengeRecord::published_value)
    }

    /// The value of the status entry whose type is `https`.
    pub fn https_status(&self) -> Option<&str> {
        self.status
            .iter()
            .find(|entry| entry.kind == "https")
            .map(|entry| entry.status.as_str())
    }
}

/// Treat an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
