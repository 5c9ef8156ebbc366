//! The generic repository: CRUD and aggregation over one bound collection.

use bson::Document;
use tracing::debug;

use crate::{
    backend::{CollectionBackend, DeleteOutcome, InsertOutcome, UpdateOutcome},
    context::TxnContext,
    document::parse_identifier,
    error::{RepositoryError, RepositoryResult},
};

/// Generic data-access component over one bound [`CollectionBackend`].
///
/// The repository owns its backend (and through it, the collection handle)
/// exclusively; the binding happens at construction and is never changed.
/// Every operation accepts a [`TxnContext`] and normalizes store-level
/// outcomes into the [`RepositoryError`] taxonomy:
///
/// - identifier strings are rejected before any store call when malformed
/// - a zero-match lookup or delete is [`RepositoryError::NotFound`]
/// - a multi-document read yielding nothing is [`RepositoryError::EmptyResult`]
/// - a zero-match update is reported through [`UpdateOutcome`], not an error
#[derive(Debug)]
pub struct Repository<B: CollectionBackend> {
    backend: B,
}

impl<B: CollectionBackend> Repository<B> {
    /// Binds a repository to its backend. The backend is already bound to one
    /// collection; this pairing is permanent.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Inserts one document as-is. The store assigns an identifier when the
    /// document does not supply one.
    pub async fn create(
        &self,
        document: Document,
        ctx: TxnContext<'_, B::Session>,
    ) -> RepositoryResult<InsertOutcome> {
        self.backend
            .insert_one(document, ctx.session())
            .await
            .map_err(|e| {
                debug!(error = %e, "insert failed");
                RepositoryError::Insert(e.to_string())
            })
    }

    /// Returns the single document matching the identifier.
    pub async fn find_one(
        &self,
        id: &str,
        ctx: TxnContext<'_, B::Session>,
    ) -> RepositoryResult<Document> {
        let id = parse_identifier(id)?;

        self.backend
            .find_by_id(id, ctx.session())
            .await
            .map_err(|e| {
                debug!(error = %e, "lookup failed");
                RepositoryError::Query(e.to_string())
            })?
            .ok_or(RepositoryError::NotFound)
    }

    /// Applies `fields` as a partial field-set update: only the named fields
    /// are replaced, everything else stays untouched.
    ///
    /// Whether the identifier matched anything is reported by the outcome's
    /// counts; a zero-match update is not an error.
    pub async fn update(
        &self,
        id: &str,
        fields: Document,
        ctx: TxnContext<'_, B::Session>,
    ) -> RepositoryResult<UpdateOutcome> {
        let id = parse_identifier(id)?;

        self.backend
            .set_fields(id, fields, ctx.session())
            .await
            .map_err(|e| {
                debug!(error = %e, "update failed");
                RepositoryError::Update(e.to_string())
            })
    }

    /// Deletes at most one document matching the identifier.
    ///
    /// A zero deleted-count is reported as [`RepositoryError::NotFound`] even
    /// though the store call itself succeeded, so deleting the same
    /// identifier twice yields success then an error.
    pub async fn delete(
        &self,
        id: &str,
        ctx: TxnContext<'_, B::Session>,
    ) -> RepositoryResult<DeleteOutcome> {
        let id = parse_identifier(id)?;

        let outcome = self
            .backend
            .delete_by_id(id, ctx.session())
            .await
            .map_err(|e| {
                debug!(error = %e, "delete failed");
                RepositoryError::Delete(e.to_string())
            })?;

        if outcome.deleted_count == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(outcome)
    }

    /// Returns every document in the collection, fully materialized, in
    /// store-default order.
    ///
    /// An empty collection is reported as [`RepositoryError::EmptyResult`]:
    /// callers treat "collection empty" identically to "query failed".
    pub async fn find_all(
        &self,
        ctx: TxnContext<'_, B::Session>,
    ) -> RepositoryResult<Vec<Document>> {
        let documents = self
            .backend
            .find_all(ctx.session())
            .await
            .map_err(|e| {
                debug!(error = %e, "scan failed");
                RepositoryError::Query(e.to_string())
            })?;

        if documents.is_empty() {
            return Err(RepositoryError::EmptyResult);
        }

        Ok(documents)
    }

    /// Executes a caller-supplied ordered pipeline of aggregation stages.
    /// Same empty-result policy as [`Repository::find_all`].
    pub async fn aggregate(
        &self,
        pipeline: Vec<Document>,
        ctx: TxnContext<'_, B::Session>,
    ) -> RepositoryResult<Vec<Document>> {
        let documents = self
            .backend
            .aggregate(pipeline, ctx.session())
            .await
            .map_err(|e| {
                debug!(error = %e, "aggregation failed");
                RepositoryError::Query(e.to_string())
            })?;

        if documents.is_empty() {
            return Err(RepositoryError::EmptyResult);
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BackendError, BackendResult};
    use async_trait::async_trait;
    use bson::{Bson, doc, oid::ObjectId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub backend with canned responses that records whether it was called.
    #[derive(Debug, Default)]
    struct StubBackend {
        calls: AtomicUsize,
        fail: bool,
        found: Option<Document>,
        many: Vec<Document>,
        matched: u64,
        deleted: u64,
    }

    impl StubBackend {
        fn record(&self) -> BackendResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(BackendError::new("stub failure"));
            }
            Ok(())
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CollectionBackend for StubBackend {
        type Session = ();

        async fn insert_one(
            &self,
            _document: Document,
            _session: Option<&mut ()>,
        ) -> BackendResult<InsertOutcome> {
            self.record()?;
            Ok(InsertOutcome { inserted_id: Bson::ObjectId(ObjectId::new()) })
        }

        async fn find_by_id(
            &self,
            _id: ObjectId,
            _session: Option<&mut ()>,
        ) -> BackendResult<Option<Document>> {
            self.record()?;
            Ok(self.found.clone())
        }

        async fn set_fields(
            &self,
            _id: ObjectId,
            _fields: Document,
            _session: Option<&mut ()>,
        ) -> BackendResult<UpdateOutcome> {
            self.record()?;
            Ok(UpdateOutcome { matched_count: self.matched, modified_count: self.matched })
        }

        async fn delete_by_id(
            &self,
            _id: ObjectId,
            _session: Option<&mut ()>,
        ) -> BackendResult<DeleteOutcome> {
            self.record()?;
            Ok(DeleteOutcome { deleted_count: self.deleted })
        }

        async fn find_all(&self, _session: Option<&mut ()>) -> BackendResult<Vec<Document>> {
            self.record()?;
            Ok(self.many.clone())
        }

        async fn aggregate(
            &self,
            _pipeline: Vec<Document>,
            _session: Option<&mut ()>,
        ) -> BackendResult<Vec<Document>> {
            self.record()?;
            Ok(self.many.clone())
        }
    }

    fn hex() -> String {
        ObjectId::new().to_hex()
    }

    #[tokio::test]
    async fn malformed_identifiers_never_reach_the_store() {
        let repo = Repository::new(StubBackend::default());

        assert_eq!(
            repo.find_one("bogus", TxnContext::Detached).await.unwrap_err().kind(),
            "invalid_identifier"
        );
        assert_eq!(
            repo.update("bogus", doc! { "email": "x" }, TxnContext::Detached)
                .await
                .unwrap_err()
                .kind(),
            "invalid_identifier"
        );
        assert_eq!(
            repo.delete("bogus", TxnContext::Detached).await.unwrap_err().kind(),
            "invalid_identifier"
        );

        assert_eq!(repo.backend().calls(), 0);
    }

    #[tokio::test]
    async fn find_one_maps_zero_matches_to_not_found() {
        let repo = Repository::new(StubBackend::default());
        let err = repo.find_one(&hex(), TxnContext::Detached).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
        assert_eq!(repo.backend().calls(), 1);
    }

    #[tokio::test]
    async fn find_one_returns_the_matching_document() {
        let repo = Repository::new(StubBackend {
            found: Some(doc! { "email": "ann@x.com" }),
            ..Default::default()
        });
        let found = repo.find_one(&hex(), TxnContext::Detached).await.unwrap();
        assert_eq!(found, doc! { "email": "ann@x.com" });
    }

    #[tokio::test]
    async fn zero_match_update_is_reported_by_the_outcome_not_an_error() {
        let repo = Repository::new(StubBackend { matched: 0, ..Default::default() });
        let outcome = repo
            .update(&hex(), doc! { "email": "x" }, TxnContext::Detached)
            .await
            .unwrap();
        assert_eq!(outcome.matched_count, 0);
    }

    #[tokio::test]
    async fn zero_count_delete_is_not_found_despite_store_success() {
        let repo = Repository::new(StubBackend { deleted: 0, ..Default::default() });
        let err = repo.delete(&hex(), TxnContext::Detached).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
        // the store was reached; the error comes from the count policy
        assert_eq!(repo.backend().calls(), 1);
    }

    #[tokio::test]
    async fn delete_succeeds_when_a_document_was_removed() {
        let repo = Repository::new(StubBackend { deleted: 1, ..Default::default() });
        let outcome = repo.delete(&hex(), TxnContext::Detached).await.unwrap();
        assert_eq!(outcome.deleted_count, 1);
    }

    #[tokio::test]
    async fn empty_reads_are_errors() {
        let repo = Repository::new(StubBackend::default());

        let err = repo.find_all(TxnContext::Detached).await.unwrap_err();
        assert!(matches!(err, RepositoryError::EmptyResult));

        let err = repo
            .aggregate(vec![doc! { "$match": { "email": "x" } }], TxnContext::Detached)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::EmptyResult));
    }

    #[tokio::test]
    async fn backend_failures_map_to_the_operation_kind() {
        let repo = Repository::new(StubBackend { fail: true, ..Default::default() });
        let id = hex();

        assert_eq!(
            repo.create(doc! {}, TxnContext::Detached).await.unwrap_err().kind(),
            "insert_error"
        );
        assert_eq!(
            repo.find_one(&id, TxnContext::Detached).await.unwrap_err().kind(),
            "query_error"
        );
        assert_eq!(
            repo.update(&id, doc! {}, TxnContext::Detached).await.unwrap_err().kind(),
            "update_error"
        );
        assert_eq!(
            repo.delete(&id, TxnContext::Detached).await.unwrap_err().kind(),
            "delete_error"
        );
        assert_eq!(
            repo.find_all(TxnContext::Detached).await.unwrap_err().kind(),
            "query_error"
        );
        assert_eq!(
            repo.aggregate(vec![], TxnContext::Detached).await.unwrap_err().kind(),
            "query_error"
        );
    }

    #[tokio::test]
    async fn active_context_is_handed_to_the_backend() {
        let repo = Repository::new(StubBackend { deleted: 1, ..Default::default() });
        let mut session = ();
        repo.delete(&hex(), TxnContext::Active(&mut session)).await.unwrap();
        assert_eq!(repo.backend().calls(), 1);
    }

    #[tokio::test]
    async fn outcomes_serialize_for_the_transport_layer() {
        let repo = Repository::new(StubBackend { matched: 1, ..Default::default() });
        let outcome = repo
            .update(&hex(), doc! { "email": "x" }, TxnContext::Detached)
            .await
            .unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["matchedCount"], 1);
    }
}
