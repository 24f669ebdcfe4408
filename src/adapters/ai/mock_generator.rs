//! Mock text generator for testing.
//!
//! Configurable mock implementation of the TextGenerator port, allowing
//! tests to run without calling the real backend.
//!
//! # Features
//!
//! - Pre-configured responses (consumed in order)
//! - Error injection for fallback testing
//! - Simulated latency
//! - Prompt capture for verification

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::generation::GenerationPrompt;
use crate::ports::{GeneratorError, TextGenerator};

/// A configured mock outcome.
#[derive(Debug, Clone)]
enum MockOutcome {
    Success(String),
    Error(GeneratorError),
}

/// Mock text generator, bound to a named model tier.
#[derive(Debug, Clone)]
pub struct MockTextGenerator {
    model: String,
    /// Outcomes consumed in order; repeats the last one when exhausted.
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    /// Captured prompts for verification.
    prompts: Arc<Mutex<Vec<GenerationPrompt>>>,
    /// Simulated latency per request.
    delay: Duration,
}

impl MockTextGenerator {
    /// Creates a new mock bound to a model tier name.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Queues a successful completion.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Success(text.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: GeneratorError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this generator.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Returns all captured prompts.
    pub fn prompts(&self) -> Vec<GenerationPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_outcome(&self) -> MockOutcome {
        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.len() > 1 {
            outcomes.pop_front().unwrap()
        } else {
            outcomes
                .front()
                .cloned()
                .unwrap_or_else(|| MockOutcome::Success("{}".to_string()))
        }
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, GeneratorError> {
        self.prompts.lock().unwrap().push(prompt.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_outcome() {
            MockOutcome::Success(text) => Ok(text),
            MockOutcome::Error(error) => Err(error),
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}
