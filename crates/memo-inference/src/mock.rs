//! Mock generation backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use memo_inference::mock::MockGenerationBackend;
//!
//! let backend = MockGenerationBackend::new()
//!     .with_fixed_response("Test response")
//!     .with_response_for("Translate", "BONJOUR");
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use memo_core::{GenerationBackend, Result, UpstreamError};

#[derive(Debug, Default)]
struct MockConfig {
    default_response: String,
    /// (prompt substring, response) pairs checked in insertion order.
    mapped_responses: Vec<(String, String)>,
    failure: Option<UpstreamError>,
}

/// Deterministic [`GenerationBackend`] that records every prompt it sees.
#[derive(Clone)]
pub struct MockGenerationBackend {
    config: Arc<MockConfig>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockGenerationBackend {
    /// Create a new mock backend with an empty default response.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig {
                default_response: "Mock response".to_string(),
                ..MockConfig::default()
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response used when no mapping matches.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        self.config_mut().default_response = response.into();
        self
    }

    /// Respond with `response` whenever the prompt contains `needle`.
    pub fn with_response_for(
        mut self,
        needle: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.config_mut()
            .mapped_responses
            .push((needle.into(), response.into()));
        self
    }

    /// Make every generation call fail with the given upstream error.
    pub fn with_failure(mut self, failure: UpstreamError) -> Self {
        self.config_mut().failure = Some(failure);
        self
    }

    /// All prompts passed to `generate`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of generation calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn config_mut(&mut self) -> &mut MockConfig {
        Arc::get_mut(&mut self.config).expect("configure the mock before cloning it")
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if let Some(ref failure) = self.config.failure {
            return Err(failure.clone().into());
        }

        for (needle, response) in &self.config.mapped_responses {
            if prompt.contains(needle.as_str()) {
                return Ok(response.clone());
            }
        }
        Ok(self.config.default_response.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
