//! Error types and result aliases for repository operations.
//!
//! Every repository operation resolves to one of the kinds in
//! [`RepositoryError`]. Use [`RepositoryResult<T>`] as the return type for
//! fallible operations.

use thiserror::Error;

/// The uniform error taxonomy every repository operation normalizes into.
///
/// The taxonomy is deliberately flat: callers see a stable kind and a
/// human-readable message, never a nested cause chain. Transport layers map
/// [`RepositoryError::kind`] to protocol status codes.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The supplied identifier string does not decode to a canonical
    /// 12-byte object identifier. Raised before any store call is issued.
    #[error("invalid document identifier: {0}")]
    InvalidIdentifier(String),
    /// No document matched the identifier, either on lookup or on delete.
    #[error("document not found")]
    NotFound,
    /// The underlying write failed (duplicate key, connectivity, serialization).
    #[error("error inserting document: {0}")]
    Insert(String),
    /// A read against the store failed for any reason other than zero matches.
    #[error("error querying documents: {0}")]
    Query(String),
    /// The partial field-set update failed at the store.
    #[error("error updating document: {0}")]
    Update(String),
    /// The delete failed at the store.
    #[error("error deleting document: {0}")]
    Delete(String),
    /// A multi-document read completed but yielded zero documents.
    #[error("no documents in result")]
    EmptyResult,
    /// Establishing the shared store connection failed.
    #[error("store connection failed: {0}")]
    Connection(String),
}

impl RepositoryError {
    /// Stable machine-checkable kind string for transport-level mapping.
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryError::InvalidIdentifier(_) => "invalid_identifier",
            RepositoryError::NotFound => "not_found",
            RepositoryError::Insert(_) => "insert_error",
            RepositoryError::Query(_) => "query_error",
            RepositoryError::Update(_) => "update_error",
            RepositoryError::Delete(_) => "delete_error",
            RepositoryError::EmptyResult => "empty_result",
            RepositoryError::Connection(_) => "connection_error",
        }
    }
}

/// A specialized `Result` type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Store-level failure reported by a [`CollectionBackend`](crate::backend::CollectionBackend).
///
/// Backends reduce driver errors to a message; the repository wraps that
/// message into the per-operation [`RepositoryError`] kind, so the original
/// cause is carried but never exposed verbatim as a typed cause chain.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct BackendError(String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A specialized `Result` type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
