//! 测试辅助模块
//!
//! Scripted doubles for the injected collaborators plus domain fixtures.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use domain_verify_provider::{
    ChallengeRecord, ChallengeType, Domain, DomainApi, DomainStatusEntry, DomainType,
    Environment, EnvironmentResolver, OwnershipStatus, PreprovisionProblem, PreprovisionResult,
    ProviderError, Result as ProviderResult, SiteEnv, VerificationStatus,
};
use tokio::sync::Mutex;

use crate::services::ServiceContext;
use crate::traits::Notifier;

// ===== StaticResolver =====

/// Resolves every `site.env` to a fixed fake URL.
pub struct StaticResolver;

#[async_trait]
impl EnvironmentResolver for StaticResolver {
    async fn resolve(&self, site_env: &SiteEnv) -> ProviderResult<Environment> {
        Ok(Environment {
            site_env: site_env.clone(),
            url: format!("https://api.test/sites/{}/environments/{}", site_env.site, site_env.env),
        })
    }
}

// ===== MockDomainApi =====

/// Replays queued `get_domain` results; the last queued result repeats forever.
pub struct MockDomainApi {
    get_results: Mutex<VecDeque<ProviderResult<Domain>>>,
    listed: Mutex<ProviderResult<Vec<Domain>>>,
    trigger_error: Mutex<Option<ProviderError>>,
    triggered: Mutex<Vec<ChallengeType>>,
    get_calls: AtomicUsize,
}

impl MockDomainApi {
    pub fn new() -> Self {
        Self {
            get_results: Mutex::new(VecDeque::new()),
            listed: Mutex::new(Ok(Vec::new())),
            trigger_error: Mutex::new(None),
            triggered: Mutex::new(Vec::new()),
            get_calls: AtomicUsize::new(0),
        }
    }

    pub async fn push_domain(&self, domain: Domain) {
        self.get_results.lock().await.push_back(Ok(domain));
    }

    pub async fn push_error(&self, error: ProviderError) {
        self.get_results.lock().await.push_back(Err(error));
    }

    pub async fn set_listed(&self, domains: Vec<Domain>) {
        *self.listed.lock().await = Ok(domains);
    }

    pub async fn set_list_error(&self, error: ProviderError) {
        *self.listed.lock().await = Err(error);
    }

    pub async fn set_trigger_error(&self, error: ProviderError) {
        *self.trigger_error.lock().await = Some(error);
    }

    pub async fn triggered(&self) -> Vec<ChallengeType> {
        self.triggered.lock().await.clone()
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomainApi for MockDomainApi {
    async fn list_domains(&self, _env: &Environment) -> ProviderResult<Vec<Domain>> {
        self.listed.lock().await.clone()
    }

    async fn get_domain(&self, _env: &Environment, domain: &str) -> ProviderResult<Domain> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let mut queue = self.get_results.lock().await;
        let next = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        next.unwrap_or_else(|| Err(not_found(domain)))
    }

    async fn verify_ownership(
        &self,
        _env: &Environment,
        _domain: &str,
        challenge_type: ChallengeType,
    ) -> ProviderResult<()> {
        self.triggered.lock().await.push(challenge_type);
        match self.trigger_error.lock().await.clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ===== RecordingNotifier =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Notice(String),
    Warning(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: StdMutex<Vec<Message>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::Notice(s) => Some(s),
                Message::Warning(_) => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::Warning(s) => Some(s),
                Message::Notice(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notice(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(Message::Notice(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(Message::Warning(message.to_string()));
    }
}

// ===== Harness =====

pub struct TestHarness {
    pub api: Arc<MockDomainApi>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            api: Arc::new(MockDomainApi::new()),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    pub fn ctx(&self) -> Arc<ServiceContext> {
        Arc::new(ServiceContext::new(
            Arc::new(StaticResolver),
            self.api.clone(),
            self.notifier.clone(),
        ))
    }
}

// ===== Fixtures =====

pub fn not_found(domain: &str) -> ProviderError {
    ProviderError::DomainNotFound {
        provider: "mock".to_string(),
        domain: domain.to_string(),
        raw_message: None,
    }
}

pub fn network_error() -> ProviderError {
    ProviderError::NetworkError {
        provider: "mock".to_string(),
        detail: "connection reset".to_string(),
    }
}

pub fn custom_domain(name: &str) -> Domain {
    Domain {
        id: name.to_string(),
        domain_type: DomainType::Custom,
        status: vec![DomainStatusEntry {
            kind: "https".to_string(),
            status: "action_required".to_string(),
        }],
        challenges: Default::default(),
        ownership_status: None,
    }
}

pub fn platform_domain(name: &str) -> Domain {
    Domain {
        domain_type: DomainType::Other("platform".to_string()),
        ..custom_domain(name)
    }
}

/// `name` with a preprovision result of `status`.
pub fn domain_with_status(name: &str, status: VerificationStatus) -> Domain {
    let mut domain = custom_domain(name);
    domain.ownership_status = Some(OwnershipStatus {
        status: status.clone(),
        message: None,
        preprovision_result: Some(PreprovisionResult {
            status,
            last_preprovision_problem: None,
        }),
    });
    domain
}

pub fn with_challenge(mut domain: Domain, challenge_type: ChallengeType, value: &str) -> Domain {
    domain.challenges.insert(
        challenge_type.as_str().to_string(),
        ChallengeRecord {
            status: Some("pending".to_string()),
            verification_key: Some(format!("key-{value}")),
            token: Some(format!("token-{value}")),
            verification_value: Some(value.to_string()),
        },
    );
    domain
}

pub fn with_problem(mut domain: Domain, problem: PreprovisionProblem) -> Domain {
    if let Some(result) = domain
        .ownership_status
        .as_mut()
        .and_then(|s| s.preprovision_result.as_mut())
    {
        result.last_preprovision_problem = Some(problem);
    }
    domain
}
