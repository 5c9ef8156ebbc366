//! `CollectionBackend` implementation over one bound MongoDB collection.

use async_trait::async_trait;
use bson::{Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{ClientSession, Collection};

use repolayer_core::{
    backend::{CollectionBackend, DeleteOutcome, InsertOutcome, UpdateOutcome},
    error::{BackendError, BackendResult, RepositoryResult},
};

use crate::connector::Connector;

/// MongoDB-backed collection store.
///
/// One instance owns exactly one collection handle, bound at construction and
/// never rebound. Each operation optionally joins a caller-owned
/// [`ClientSession`]; without one, the driver call runs detached.
#[derive(Debug)]
pub struct MongoBackend {
    collection: Collection<Document>,
}

impl MongoBackend {
    /// Binds a backend to `collection` within `database` (empty name falls
    /// back to the connector's default database).
    pub async fn bind(
        connector: &Connector,
        database: &str,
        collection: &str,
    ) -> RepositoryResult<Self> {
        Ok(Self {
            collection: connector.collection(database, collection).await?,
        })
    }

    /// The bound collection handle, for callers that need driver-level
    /// access (index setup, session creation through the client).
    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }
}

fn driver_err(err: mongodb::error::Error) -> BackendError {
    BackendError::new(err.to_string())
}

#[async_trait]
impl CollectionBackend for MongoBackend {
    type Session = ClientSession;

    async fn insert_one(
        &self,
        document: Document,
        session: Option<&mut ClientSession>,
    ) -> BackendResult<InsertOutcome> {
        let result = match session {
            Some(session) => {
                self.collection
                    .insert_one(document)
                    .session(session)
                    .await
            }
            None => self.collection.insert_one(document).await,
        }
        .map_err(driver_err)?;

        Ok(InsertOutcome { inserted_id: result.inserted_id })
    }

    async fn find_by_id(
        &self,
        id: ObjectId,
        session: Option<&mut ClientSession>,
    ) -> BackendResult<Option<Document>> {
        match session {
            Some(session) => {
                self.collection
                    .find_one(doc! { "_id": id })
                    .session(session)
                    .await
            }
            None => self.collection.find_one(doc! { "_id": id }).await,
        }
        .map_err(driver_err)
    }

    async fn set_fields(
        &self,
        id: ObjectId,
        fields: Document,
        session: Option<&mut ClientSession>,
    ) -> BackendResult<UpdateOutcome> {
        let update = doc! { "$set": fields };

        let result = match session {
            Some(session) => {
                self.collection
                    .update_one(doc! { "_id": id }, update)
                    .session(session)
                    .await
            }
            None => {
                self.collection
                    .update_one(doc! { "_id": id }, update)
                    .await
            }
        }
        .map_err(driver_err)?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_by_id(
        &self,
        id: ObjectId,
        session: Option<&mut ClientSession>,
    ) -> BackendResult<DeleteOutcome> {
        let result = match session {
            Some(session) => {
                self.collection
                    .delete_one(doc! { "_id": id })
                    .session(session)
                    .await
            }
            None => self.collection.delete_one(doc! { "_id": id }).await,
        }
        .map_err(driver_err)?;

        Ok(DeleteOutcome { deleted_count: result.deleted_count })
    }

    async fn find_all(
        &self,
        session: Option<&mut ClientSession>,
    ) -> BackendResult<Vec<Document>> {
        // Both paths materialize the full result before returning; the
        // cursor is dropped (and therefore released) on every exit path,
        // including a decode failure partway through.
        match session {
            Some(session) => {
                let mut cursor = self
                    .collection
                    .find(doc! {})
                    .session(&mut *session)
                    .await
                    .map_err(driver_err)?;

                let mut documents = Vec::new();
                while let Some(document) = cursor.next(session).await {
                    documents.push(document.map_err(driver_err)?);
                }
                Ok(documents)
            }
            None => {
                self.collection
                    .find(doc! {})
                    .await
                    .map_err(driver_err)?
                    .try_collect()
                    .await
                    .map_err(driver_err)
            }
        }
    }

    async fn aggregate(
        &self,
        pipeline: Vec<Document>,
        session: Option<&mut ClientSession>,
    ) -> BackendResult<Vec<Document>> {
        match session {
            Some(session) => {
                let mut cursor = self
                    .collection
                    .aggregate(pipeline)
                    .session(&mut *session)
                    .await
                    .map_err(driver_err)?;

                let mut documents = Vec::new();
                while let Some(document) = cursor.next(session).await {
                    documents.push(document.map_err(driver_err)?);
                }
                Ok(documents)
            }
            None => {
                self.collection
                    .aggregate(pipeline)
                    .await
                    .map_err(driver_err)?
                    .try_collect()
                    .await
                    .map_err(driver_err)
            }
        }
    }
}
