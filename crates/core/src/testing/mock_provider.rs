//! Mock provider for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::provider::{Provider, ProviderError, ProviderKind};
use crate::resolver::{Candidate, ResolutionRequest};

/// Mock implementation of the [`Provider`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable candidate lists, either a fixed set or a per-call
///   queue of responses
/// - Track search requests for assertions
/// - Simulate authentication and transient failures
pub struct MockProvider {
    name: String,
    kind: ProviderKind,
    active: AtomicBool,
    /// Per-call responses, consumed front to back.
    queued: Mutex<VecDeque<Result<Vec<Candidate>, ProviderError>>>,
    /// Returned when the queue is empty.
    default_results: Mutex<Vec<Candidate>>,
    /// Recorded search requests.
    requests: Mutex<Vec<ResolutionRequest>>,
}

impl MockProvider {
    pub fn new(name: &str, kind: ProviderKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            active: AtomicBool::new(true),
            queued: Mutex::new(VecDeque::new()),
            default_results: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Set the candidates returned when no queued response is pending.
    pub fn set_results(&self, results: Vec<Candidate>) {
        *self.default_results.lock().unwrap() = results;
    }

    /// Queue one response; queued responses take precedence over the
    /// default results and are consumed in order.
    pub fn push_response(&self, response: Result<Vec<Candidate>, ProviderError>) {
        self.queued.lock().unwrap().push_back(response);
    }

    /// Mark the provider active or inactive.
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    /// Number of searches performed.
    pub fn search_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Recorded search requests.
    pub fn recorded_requests(&self) -> Vec<ResolutionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    async fn search(
        &self,
        request: &ResolutionRequest,
    ) -> Result<Vec<Candidate>, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(response) = self.queued.lock().unwrap().pop_front() {
            return response;
        }

        Ok(self.default_results.lock().unwrap().clone())
    }
}
