//! Test utilities for StudyScout
//!
//! Provides a scripted in-memory provider so gateway and tutor logic can be
//! exercised without a network.

use crate::error::{Result, StudyScoutError};
use crate::providers::{CompletionResponse, GenerationRequest, Provider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Provider that replays queued outcomes and records every request
///
/// `Ok(text)` entries become successful completions carrying `text`;
/// `Err(message)` entries become provider errors. Once the queue is empty
/// every call fails.
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<std::result::Result<String, String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    delay: Duration,
}

impl ScriptedProvider {
    /// Creates a provider that answers immediately
    pub fn new(outcomes: Vec<std::result::Result<String, String>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    /// Makes every call wait `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<CompletionResponse> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(request.clone());
        let outcome = self
            .outcomes
            .lock()
            .expect("outcomes lock poisoned")
            .pop_front();

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match outcome {
            Some(Ok(text)) => Ok(CompletionResponse::text(text)),
            Some(Err(message)) => Err(StudyScoutError::Provider(message).into()),
            None => Err(StudyScoutError::Provider("script exhausted".to_string()).into()),
        }
    }

    fn model(&self) -> String {
        "scripted".to_string()
    }
}
