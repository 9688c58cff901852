//! # memo-core
//!
//! Core types, traits, and abstractions for memo.
//!
//! This crate provides:
//! - The `Error` enum shared by every crate in the workspace
//! - Data model types for notes and share links
//! - Repository traits implemented by the persistence layer
//! - The `GenerationBackend` trait implemented by the inference layer
//! - The built-in note template catalog

pub mod error;
pub mod models;
pub mod templates;
pub mod traits;

pub use error::{Error, Result, UpstreamError};
pub use models::{
    AdvancedSearchRequest, CreateNoteRequest, CreateShareRequest, GeneratedNote, Note, Principal,
    ReorderRequest, SharedLink, SharedLinkSummary, SharedNoteView, SortKey, UpdateNoteRequest,
};
pub use templates::{Template, TemplateOverrides, TemplateSummary};
pub use traits::{GenerationBackend, NoteRepository, ShareRepository};
