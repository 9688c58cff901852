//! # memo-inference
//!
//! LLM backend abstraction for memo's AI-assisted features.
//!
//! This crate provides:
//! - An OpenAI-compatible chat-completions client implementing
//!   `memo_core::GenerationBackend`
//! - An upstream error taxonomy (auth, rate limit, timeout, malformed)
//! - Prompt construction and response handling for translation and
//!   free-text-to-structured-note extraction
//! - A deterministic mock backend for tests (feature `mock`)
//!
//! # Example
//!
//! ```rust,no_run
//! use memo_core::GenerationBackend;
//! use memo_inference::LlmClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = LlmClient::from_env().unwrap();
//!     let reply = client.generate("Say hello").await.unwrap();
//!     println!("{reply}");
//! }
//! ```

pub mod assist;
pub mod client;
pub mod error;
pub mod types;

// Mock generation backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use memo_core::*;

pub use assist::{extract, translate, FALLBACK_TITLE};
pub use client::{LlmClient, LlmConfig};
pub use types::ChatMessage;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerationBackend;
