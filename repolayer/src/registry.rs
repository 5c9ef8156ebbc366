//! Composition root assembling the named repositories.

use repolayer_core::{document::UserRecord, error::RepositoryResult, repository::Repository};
use repolayer_mongodb::{Connector, MongoBackend};

use crate::config::Config;

/// The single bundle of repositories the rest of the system depends on.
///
/// Constructed once at startup: one connector for the process, one backend
/// per repository bound to its collection. Binding is cheap and does not
/// reach the store; the shared client is still established lazily on the
/// first operation. A registry is not a pooled resource and is never rebuilt
/// per request.
#[derive(Debug)]
pub struct Registry {
    connector: Connector,
    /// Repository over the `user` collection.
    pub users: Repository<MongoBackend>,
}

impl Registry {
    /// Builds the registry from configuration: the configured database name
    /// (empty selects the default) and the fixed `user` collection.
    pub async fn connect(config: &Config) -> RepositoryResult<Self> {
        let connector = Connector::new(config.database_url.clone());
        let backend =
            MongoBackend::bind(&connector, &config.database_name, UserRecord::COLLECTION).await?;

        Ok(Self { connector, users: Repository::new(backend) })
    }

    /// The connector owning the shared client, for binding further
    /// repositories against the same connection.
    pub fn connector(&self) -> &Connector {
        &self.connector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repolayer_mongodb::DEFAULT_DATABASE;

    fn local_config(database_name: &str) -> Config {
        Config {
            database_url: "mongodb://localhost:27017".into(),
            database_name: database_name.into(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn registry_binds_the_user_collection_in_the_default_database() {
        let registry = Registry::connect(&local_config("")).await.unwrap();
        let namespace = registry.users.backend().collection().namespace();
        assert_eq!(namespace.db, DEFAULT_DATABASE);
        assert_eq!(namespace.coll, "user");
    }

    #[tokio::test]
    async fn configured_database_name_overrides_the_default() {
        let registry = Registry::connect(&local_config("bookshop")).await.unwrap();
        assert_eq!(registry.users.backend().collection().namespace().db, "bookshop");
    }
}
