//! A generic document repository layer over MongoDB-style stores.
//!
//! This crate is the primary entry point for users of repolayer. It re-exports
//! the core abstractions, provides access to the available backends, and adds
//! the two composition pieces a service needs at startup: environment-backed
//! [`Config`](config::Config) and the [`Registry`](registry::Registry) that
//! binds the repositories the rest of the system depends on.
//!
//! # Quick Start
//!
//! ```ignore
//! use repolayer::{prelude::*, config::Config, registry::Registry};
//! use bson::doc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), RepositoryError> {
//!     let config = Config::from_env();
//!     let registry = Registry::connect(&config).await?;
//!
//!     let created = registry
//!         .users
//!         .create(doc! { "fullName": "Ann", "email": "ann@x.com" }, TxnContext::Detached)
//!         .await?;
//!     let id = created.inserted_id.as_object_id().unwrap().to_hex();
//!
//!     let user = registry.users.find_one(&id, TxnContext::Detached).await?;
//!     println!("found: {user}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - in-process storage for development and tests
//! - [`mongodb`] - the persistent MongoDB backend the registry composes

pub mod config;
pub mod prelude;
pub mod registry;

pub use repolayer_core::{backend, context, document, error, repository};

// Re-export BSON types for convenience
pub use bson;

/// In-memory backend implementation.
pub mod memory {
    pub use repolayer_memory::{MemoryBackend, MemorySession};
}

/// MongoDB backend implementation.
pub mod mongodb {
    pub use repolayer_mongodb::{Connector, DEFAULT_DATABASE, MongoBackend};
}
