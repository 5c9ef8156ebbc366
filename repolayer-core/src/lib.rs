//! Core abstractions for a generic document repository layer.
//!
//! This crate defines the store-agnostic half of repolayer:
//!
//! - **Backend seam** ([`backend`]) - The [`CollectionBackend`](backend::CollectionBackend)
//!   trait a concrete store implements for one bound collection
//! - **Generic repository** ([`repository`]) - Create/FindOne/Update/Delete/FindAll/Aggregate
//!   over any backend, normalizing all failures into one error taxonomy
//! - **Transactional context** ([`context`]) - An explicit detached-or-active
//!   session sum type passed through every operation
//! - **Documents and identifiers** ([`document`]) - Schema-free BSON documents,
//!   identifier parsing, and the `user` record convenience shape
//! - **Error handling** ([`error`]) - The flat error taxonomy with stable,
//!   machine-checkable kinds
//!
//! # Example
//!
//! ```ignore
//! use repolayer_core::{repository::Repository, context::TxnContext};
//! use bson::doc;
//!
//! let users = Repository::new(backend);
//! let outcome = users
//!     .create(doc! { "fullName": "Ann", "email": "ann@x.com" }, TxnContext::Detached)
//!     .await?;
//! let found = users
//!     .find_one(&outcome.inserted_id.as_object_id().unwrap().to_hex(), TxnContext::Detached)
//!     .await?;
//! ```

pub mod backend;
pub mod context;
pub mod document;
pub mod error;
pub mod repository;
