//! In-memory backend for repolayer.
//!
//! This crate provides [`MemoryBackend`], a collection backend that keeps its
//! documents in process memory behind an async read-write lock. It exists for
//! development and tests: it honors the same contract as the MongoDB backend,
//! including identifier assignment on insert, field-merge updates, and a
//! small aggregation subset, and it counts operations so tests can verify
//! whether the store was reached at all.

pub mod pipeline;
pub mod store;

pub use store::{MemoryBackend, MemorySession};
