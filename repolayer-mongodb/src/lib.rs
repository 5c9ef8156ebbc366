//! MongoDB backend for repolayer.
//!
//! This crate provides the two store-facing pieces of the system:
//!
//! - [`Connector`] - owns the lifecycle of the single shared client,
//!   establishing it lazily (and race-free) on first use, and hands out
//!   collection handles with default-database substitution
//! - [`MongoBackend`] - a `CollectionBackend` over one bound collection,
//!   translating each repository intent into a driver call, with optional
//!   `ClientSession` support per operation
//!
//! # Example
//!
//! ```ignore
//! use repolayer_mongodb::{Connector, MongoBackend};
//! use repolayer_core::{repository::Repository, context::TxnContext};
//!
//! let connector = Connector::new("mongodb://localhost:27017");
//! let backend = MongoBackend::bind(&connector, "", "user").await?;
//! let users = Repository::new(backend);
//! let all = users.find_all(TxnContext::Detached).await?;
//! ```

pub mod connector;
pub mod store;

pub use connector::{Connector, DEFAULT_DATABASE};
pub use store::MongoBackend;
