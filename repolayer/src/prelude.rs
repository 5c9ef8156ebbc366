//! Convenient re-exports of commonly used types from repolayer.
//!
//! ```ignore
//! use repolayer::prelude::*;
//! ```

pub use repolayer_core::{
    backend::{CollectionBackend, DeleteOutcome, InsertOutcome, UpdateOutcome},
    context::TxnContext,
    document::{UserRecord, parse_identifier},
    error::{BackendError, BackendResult, RepositoryError, RepositoryResult},
    repository::Repository,
};

pub use crate::{config::Config, registry::Registry};
