//! Ownership verification service

use std::sync::Arc;

use domain_verify_provider::{
    ChallengeType, Domain, Environment, OwnershipStatus, ProviderError, SiteEnv,
    VerificationStatus,
};

use crate::error::{CoreError, CoreResult};
use crate::services::diagnosis::Diagnosis;
use crate::services::ServiceContext;
use crate::types::{PollPolicy, VerificationOutcome, VerificationState};
use crate::utils::abort::AbortSignal;

const NOT_SUCCESSFUL: &str = "Ownership verification was not successful.";
const MISSING_DOMAIN: &str = "Cannot verify challenge for missing domain.";

/// Drives one domain through trigger, poll and diagnosis.
pub struct VerificationService {
    ctx: Arc<ServiceContext>,
    policy: PollPolicy,
}

/// Per-run bookkeeping; nothing survives between runs.
struct VerificationAttempt<'a> {
    domain: &'a str,
    challenge_type: ChallengeType,
    state: VerificationState,
}

impl<'a> VerificationAttempt<'a> {
    fn new(domain: &'a str, challenge_type: ChallengeType) -> Self {
        Self {
            domain,
            challenge_type,
            state: VerificationState::Initial,
        }
    }

    fn transition(&mut self, next: VerificationState) {
        debug_assert!(
            !self.state.is_terminal(),
            "transition from terminal state {} to {next}",
            self.state
        );
        if self.state != next {
            log::debug!(
                "[{} {}] {} -> {next}",
                self.domain,
                self.challenge_type,
                self.state
            );
            self.state = next;
        }
    }
}

impl VerificationService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self::with_policy(ctx, PollPolicy::default())
    }

    #[must_use]
    pub fn with_policy(ctx: Arc<ServiceContext>, policy: PollPolicy) -> Self {
        Self { ctx, policy }
    }

    /// Verify ownership of `domain` with `challenge_type`.
    ///
    /// A domain the platform already verified returns immediately. A failed or
    /// missing ownership status triggers a new verification first; one already
    /// in progress is only polled. Exhausting the poll budget runs the failure
    /// diagnosis before returning [`CoreError::VerificationFailed`].
    pub async fn verify_challenge(
        &self,
        site_env: &SiteEnv,
        domain: &str,
        challenge_type: ChallengeType,
        abort: &AbortSignal,
    ) -> CoreResult<VerificationOutcome> {
        abort.check()?;
        let env = self.ctx.resolve(site_env).await?;
        let mut attempt = VerificationAttempt::new(domain, challenge_type);

        let snapshot = match self.ctx.domain_api.get_domain(&env, domain).await {
            Ok(snapshot) => snapshot,
            Err(ProviderError::DomainNotFound { .. }) => {
                attempt.transition(VerificationState::MissingDomain);
                return Err(CoreError::DomainNotFound {
                    domain: domain.to_string(),
                    site_env: site_env.to_string(),
                    add_command: self.ctx.guidance.add_domain_command(site_env, domain),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let initial_value = snapshot.challenge_value(challenge_type).map(str::to_string);

        match initial_status(&snapshot) {
            VerificationStatus::Success => {
                attempt.transition(VerificationState::AlreadyVerified);
                self.ctx
                    .notifier
                    .notice(&format!("Ownership verification for {domain} is complete!"));
                return Ok(VerificationOutcome::AlreadyVerified);
            }
            VerificationStatus::Failed => {
                attempt.transition(VerificationState::NotStarted);
                abort.check()?;
                self.trigger(&env, site_env, domain, challenge_type, &mut attempt)
                    .await?;
                self.ctx
                    .notifier
                    .notice(&format!("The challenge for {domain} is being verified..."));
            }
            VerificationStatus::InProgress => {
                attempt.transition(VerificationState::InProgress);
            }
            other => {
                log::debug!("{domain}: initial status '{}', polling", other.as_str());
            }
        }

        self.poll(
            &env,
            site_env,
            &mut attempt,
            snapshot,
            initial_value.as_deref(),
            abort,
        )
        .await
    }

    async fn trigger(
        &self,
        env: &Environment,
        site_env: &SiteEnv,
        domain: &str,
        challenge_type: ChallengeType,
        attempt: &mut VerificationAttempt<'_>,
    ) -> CoreResult<()> {
        match self
            .ctx
            .domain_api
            .verify_ownership(env, domain, challenge_type)
            .await
        {
            Ok(()) => Ok(()),
            Err(ProviderError::DomainNotFound { .. }) => {
                attempt.transition(VerificationState::MissingDomain);
                let command = self.ctx.guidance.add_domain_command(site_env, domain);
                self.ctx.notifier.notice(&format!(
                    "The domain {domain} has not been added to this site and environment. Use the command {command} to add it."
                ));
                Err(CoreError::VerificationFailed(MISSING_DOMAIN.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn poll(
        &self,
        env: &Environment,
        site_env: &SiteEnv,
        attempt: &mut VerificationAttempt<'_>,
        mut last_snapshot: Domain,
        initial_value: Option<&str>,
        abort: &AbortSignal,
    ) -> CoreResult<VerificationOutcome> {
        let domain = attempt.domain;
        let mut fetch_failures = 0u32;
        let mut unavailable_polls = 0u32;

        for poll in 1..=self.policy.max_attempts {
            abort.sleep(self.policy.interval).await?;
            attempt.transition(VerificationState::Polling);

            let snapshot = match self.ctx.domain_api.get_domain(env, domain).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    fetch_failures += 1;
                    if fetch_failures > self.policy.max_fetch_failures {
                        log::debug!("{domain}: giving up after {fetch_failures} failed fetches");
                        return Err(e.into());
                    }
                    log::warn!(
                        "{domain}: status fetch failed (poll {poll}/{}): {e}",
                        self.policy.max_attempts
                    );
                    continue;
                }
            };

            let Some(status) = snapshot
                .ownership_status
                .as_ref()
                .map(OwnershipStatus::preprovision_status)
            else {
                unavailable_polls += 1;
                last_snapshot = snapshot;
                if unavailable_polls > self.policy.max_unavailable_polls {
                    return Err(CoreError::StatusUnavailable);
                }
                log::debug!("{domain}: ownership status not computed yet (poll {poll})");
                continue;
            };

            log::debug!("{domain}: poll {poll} status '{}'", status.as_str());

            if status == VerificationStatus::Success {
                attempt.transition(VerificationState::Success);
                self.ctx.notifier.notice("Ownership verification is complete!");
                self.ctx.notifier.notice(
                    "Your HTTPS certificate will be deployed to Pantheon's Global CDN shortly.",
                );
                return Ok(VerificationOutcome::Verified { attempts: poll });
            }

            last_snapshot = snapshot;
        }

        attempt.transition(VerificationState::Exhausted);
        Diagnosis {
            notifier: self.ctx.notifier.as_ref(),
            guidance: &self.ctx.guidance,
        }
        .report(
            site_env,
            domain,
            attempt.challenge_type,
            &last_snapshot,
            initial_value,
        );

        Err(CoreError::VerificationFailed(NOT_SUCCESSFUL.to_string()))
    }
}

/// An absent ownership status means the platform could not evaluate it in
/// time; a fresh verification is started rather than waiting on it.
fn initial_status(snapshot: &Domain) -> VerificationStatus {
    snapshot
        .ownership_status
        .as_ref()
        .map_or(VerificationStatus::Failed, OwnershipStatus::preprovision_status)
}
