//! In-memory collection backend.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};
use mea::rwlock::RwLock;

use repolayer_core::{
    backend::{CollectionBackend, DeleteOutcome, InsertOutcome, UpdateOutcome},
    error::{BackendError, BackendResult},
};

use crate::pipeline::run_pipeline;

/// Session handle for the in-memory backend.
///
/// Memory operations are individually atomic under the store lock, so the
/// session carries no state; it exists so the active-context branch of the
/// repository is exercisable without a live server.
#[derive(Debug, Default)]
pub struct MemorySession;

/// Thread-safe in-memory collection backend.
///
/// Documents live in a `Vec` behind an async read-write lock; iteration order
/// is insertion order, which stands in for the store-default ordering of the
/// real backend. The handle is cloneable and clones share the same data.
///
/// Every trait call bumps an operation counter readable through
/// [`MemoryBackend::op_count`], which lets tests assert not just what a
/// repository returned but whether the store was consulted at all.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    documents: Arc<RwLock<Vec<Document>>>,
    ops: Arc<AtomicUsize>,
}

impl MemoryBackend {
    /// Creates an empty backend bound to its own anonymous collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of backend operations issued so far, across all clones.
    pub fn op_count(&self) -> usize {
        self.ops.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.ops.fetch_add(1, Ordering::SeqCst);
    }
}

fn document_id(document: &Document) -> Option<&Bson> {
    document.get("_id")
}

#[async_trait]
impl CollectionBackend for MemoryBackend {
    type Session = MemorySession;

    async fn insert_one(
        &self,
        mut document: Document,
        _session: Option<&mut MemorySession>,
    ) -> BackendResult<InsertOutcome> {
        self.touch();

        let id = match document_id(&document) {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        let mut documents = self.documents.write().await;
        if documents.iter().any(|doc| document_id(doc) == Some(&id)) {
            return Err(BackendError::new(format!("duplicate key: {id}")));
        }
        documents.push(document);

        Ok(InsertOutcome { inserted_id: id })
    }

    async fn find_by_id(
        &self,
        id: ObjectId,
        _session: Option<&mut MemorySession>,
    ) -> BackendResult<Option<Document>> {
        self.touch();

        let id = Bson::ObjectId(id);
        let documents = self.documents.read().await;

        Ok(documents
            .iter()
            .find(|doc| document_id(doc) == Some(&id))
            .cloned())
    }

    async fn set_fields(
        &self,
        id: ObjectId,
        fields: Document,
        _session: Option<&mut MemorySession>,
    ) -> BackendResult<UpdateOutcome> {
        self.touch();

        let id = Bson::ObjectId(id);

        // identifiers are immutable once assigned; setting _id to anything
        // but its current value is a store error, as in the real backend
        if let Some(new_id) = fields.get("_id") {
            if *new_id != id {
                return Err(BackendError::new(
                    "performing an update on the path '_id' would modify the immutable field '_id'",
                ));
            }
        }

        let mut documents = self.documents.write().await;

        let Some(target) = documents
            .iter_mut()
            .find(|doc| document_id(doc) == Some(&id))
        else {
            return Ok(UpdateOutcome { matched_count: 0, modified_count: 0 });
        };

        let before = target.clone();
        for (field, value) in fields {
            if field == "_id" {
                continue;
            }
            target.insert(field, value);
        }

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: u64::from(*target != before),
        })
    }

    async fn delete_by_id(
        &self,
        id: ObjectId,
        _session: Option<&mut MemorySession>,
    ) -> BackendResult<DeleteOutcome> {
        self.touch();

        let id = Bson::ObjectId(id);
        let mut documents = self.documents.write().await;

        match documents.iter().position(|doc| document_id(doc) == Some(&id)) {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteOutcome { deleted_count: 1 })
            }
            None => Ok(DeleteOutcome { deleted_count: 0 }),
        }
    }

    async fn find_all(
        &self,
        _session: Option<&mut MemorySession>,
    ) -> BackendResult<Vec<Document>> {
        self.touch();

        Ok(self.documents.read().await.clone())
    }

    async fn aggregate(
        &self,
        pipeline: Vec<Document>,
        _session: Option<&mut MemorySession>,
    ) -> BackendResult<Vec<Document>> {
        self.touch();

        let snapshot = self.documents.read().await.clone();
        run_pipeline(snapshot, &pipeline)
    }
}
