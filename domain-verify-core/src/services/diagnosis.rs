//! Failure diagnosis after an exhausted verification run

use domain_verify_provider::{ChallengeType, Domain, SiteEnv, VerificationStatus};

use crate::traits::Notifier;
use crate::types::GuidanceConfig;

/// Explains why verification did not succeed, using the last fetched snapshot.
pub(crate) struct Diagnosis<'a> {
    pub notifier: &'a dyn Notifier,
    pub guidance: &'a GuidanceConfig,
}

impl Diagnosis<'_> {
    /// Emit problem details, guidance, the rate-limit warning and any
    /// challenge-rotation warnings, in that order.
    pub fn report(
        &self,
        site_env: &SiteEnv,
        domain: &str,
        challenge_type: ChallengeType,
        snapshot: &Domain,
        initial_value: Option<&str>,
    ) {
        self.report_problem(snapshot);
        self.report_unavailable(snapshot);
        self.report_rotation(site_env, domain, challenge_type, snapshot, initial_value);
    }

    fn report_problem(&self, snapshot: &Domain) {
        let problem = snapshot
            .ownership_status
            .as_ref()
            .and_then(|s| s.last_problem());

        let mut docs_url = self.guidance.docs_url.as_str();
        let mut support_ref = String::new();

        if let Some(problem) = problem {
            if let Some(link) = non_empty(problem.docs_link.as_deref()) {
                docs_url = link;
            }
            if let Some(reference) = non_empty(problem.support_reference.as_deref()) {
                support_ref = format!(" with reference \"{reference}\"");
            }

            for line in [&problem.title, &problem.detail, &problem.action_item] {
                if let Some(line) = non_empty(line.as_deref()) {
                    self.notifier.notice(line);
                }
            }

            let raw: Vec<&str> = [&problem.problem_type, &problem.raw_detail]
                .into_iter()
                .filter_map(|v| non_empty(v.as_deref()))
                .collect();
            if !raw.is_empty() {
                self.notifier.notice("");
                let mut message = String::from("Raw verification result:");
                for part in raw {
                    message.push('\n');
                    message.push_str(part);
                }
                self.notifier.notice(&message);
            }
        } else {
            self.notifier
                .notice("Double-check that your challenge is being served correctly.");
        }

        self.notifier
            .notice(&format!("See {docs_url} for assistance"));
        self.notifier.notice(&format!(
            "or contact {}{support_ref}.",
            self.guidance.support_contact
        ));
    }

    /// The platform reports `unavailable` once the CA's rate limit has been hit.
    fn report_unavailable(&self, snapshot: &Domain) {
        let Some(status) = &snapshot.ownership_status else {
            return;
        };
        if status.status == VerificationStatus::Unavailable {
            if let Some(message) = non_empty(status.message.as_deref()) {
                self.notifier.warning(message);
            }
        }
    }

    fn report_rotation(
        &self,
        site_env: &SiteEnv,
        domain: &str,
        challenge_type: ChallengeType,
        snapshot: &Domain,
        initial_value: Option<&str>,
    ) {
        let Some(current) = snapshot.challenge_value(challenge_type) else {
            return;
        };
        if Some(current) == initial_value {
            return;
        }

        log::debug!("{domain}: {challenge_type} challenge rotated during verification");
        self.notifier.warning("The old challenge cannot be tried again.");
        match challenge_type {
            ChallengeType::Dns01 => self.notifier.warning(&format!(
                "Please update your DNS to serve the new challenge below:\n{current}"
            )),
            ChallengeType::Http01 => self.notifier.warning(&format!(
                "Please run `{} domain:dns:challenge {site_env} --filter='domain={domain}'` again to obtain a new challenge file.",
                self.guidance.program
            )),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
