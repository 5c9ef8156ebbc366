//! Lifecycle of the single shared store connection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bson::Document;
use mongodb::{Client, Collection, options::ClientOptions};
use tokio::sync::OnceCell;
use tracing::info;

use repolayer_core::error::{RepositoryError, RepositoryResult};

/// Database used when the caller supplies an empty database name.
pub const DEFAULT_DATABASE: &str = "test_tb";

/// Budget for establishing the initial connection; no other operation
/// carries an explicit timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Owns the process-wide client for one connection string.
///
/// The client is established lazily on the first collection request and then
/// reused for the lifetime of the connector. Initialization is single-flight:
/// concurrent first callers wait on one establishment attempt rather than
/// racing their own. A failed attempt surfaces as
/// [`RepositoryError::Connection`] and leaves the connector uninitialized, so
/// a later call may retry.
#[derive(Debug)]
pub struct Connector {
    uri: String,
    client: OnceCell<Client>,
    established: AtomicUsize,
}

impl Connector {
    /// Creates a connector for `uri`. Nothing connects until first use.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            client: OnceCell::new(),
            established: AtomicUsize::new(0),
        }
    }

    /// Number of establishment attempts made so far.
    ///
    /// Single-flight initialization keeps this at one for a healthy
    /// connector; a higher count means earlier attempts failed and were
    /// retried. Diagnostic only.
    pub fn establish_attempts(&self) -> usize {
        self.established.load(Ordering::SeqCst)
    }

    async fn client(&self) -> RepositoryResult<&Client> {
        self.client
            .get_or_try_init(|| async {
                self.established.fetch_add(1, Ordering::SeqCst);

                let mut options = ClientOptions::parse(&self.uri)
                    .await
                    .map_err(|e| RepositoryError::Connection(e.to_string()))?;
                options.connect_timeout = Some(CONNECT_TIMEOUT);
                options.server_selection_timeout = Some(CONNECT_TIMEOUT);

                let client = Client::with_options(options)
                    .map_err(|e| RepositoryError::Connection(e.to_string()))?;
                info!("document store client established");

                Ok(client)
            })
            .await
    }

    /// Returns a handle to `collection` within `database`, substituting the
    /// fixed default database when `database` is empty.
    ///
    /// The handle is safe to use concurrently; synchronization below this
    /// point is the driver's responsibility.
    pub async fn collection(
        &self,
        database: &str,
        collection: &str,
    ) -> RepositoryResult<Collection<Document>> {
        let database = if database.is_empty() { DEFAULT_DATABASE } else { database };

        Ok(self.client().await?.database(database).collection(collection))
    }
}
