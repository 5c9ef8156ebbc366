//! Storage backend seam for the generic repository.
//!
//! [`CollectionBackend`] is the trait a concrete store implements for one
//! bound collection. The repository layers its error policy on top of these
//! primitives; backends only translate each call into a store operation and
//! report raw outcomes.
//!
//! Implementations must be thread-safe (`Send + Sync`) and support concurrent
//! calls from independent tasks; the repository itself introduces no locks.

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};
use serde::Serialize;
use std::fmt::Debug;

use crate::error::BackendResult;

/// Result of inserting one document.
///
/// `inserted_id` is the identifier the store assigned (or the one the
/// document supplied).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub inserted_id: Bson,
}

/// Result of a partial field-set update.
///
/// A zero `matched_count` is a valid outcome, not an error: the repository
/// reports "no such document" through these counts rather than failing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Result of deleting at most one document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

/// Abstract interface a store implements for one bound collection.
///
/// A backend instance is bound to exactly one collection at construction and
/// never rebound. Every operation optionally runs inside an in-flight unit of
/// work (`Session`); `None` means the backend executes the call detached.
///
/// Multi-document reads must fully materialize their results before returning
/// and release any underlying cursor on every exit path, including decode
/// failures.
#[async_trait]
pub trait CollectionBackend: Send + Sync + Debug {
    /// Opaque handle for an in-flight unit of work against the store.
    type Session: Send;

    /// Inserts one document as-is. The store assigns an identifier when the
    /// document does not carry one.
    async fn insert_one(
        &self,
        document: Document,
        session: Option<&mut Self::Session>,
    ) -> BackendResult<InsertOutcome>;

    /// Looks up a single document by identifier equality.
    async fn find_by_id(
        &self,
        id: ObjectId,
        session: Option<&mut Self::Session>,
    ) -> BackendResult<Option<Document>>;

    /// Applies `fields` as a field-merge update: only the named fields are
    /// replaced, absent fields stay untouched.
    async fn set_fields(
        &self,
        id: ObjectId,
        fields: Document,
        session: Option<&mut Self::Session>,
    ) -> BackendResult<UpdateOutcome>;

    /// Deletes at most one document matching the identifier.
    async fn delete_by_id(
        &self,
        id: ObjectId,
        session: Option<&mut Self::Session>,
    ) -> BackendResult<DeleteOutcome>;

    /// Returns every document in the collection in store-default order.
    async fn find_all(
        &self,
        session: Option<&mut Self::Session>,
    ) -> BackendResult<Vec<Document>>;

    /// Executes a caller-supplied ordered pipeline of aggregation stages.
    async fn aggregate(
        &self,
        pipeline: Vec<Document>,
        session: Option<&mut Self::Session>,
    ) -> BackendResult<Vec<Document>>;
}
