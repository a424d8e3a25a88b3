use crate::common::collection_name_by_type;
use crate::errors::{ErrorKind, RepositoryError, RepositoryResult};
use crate::repository::{MongoEntity, ObjectRepository};
use crate::repository_config::RepositoryConfig;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::sync::Arc;

/// Creates repositories that share one client and one database.
///
/// All repositories opened from the same factory share the driver's connection
/// pool. The factory is cheap to clone.
///
/// ```rust,ignore
/// let factory = RepositoryBuilder::new()
///     .connection_string("mongodb://localhost:27017")
///     .database_name("shop")
///     .open_factory()
///     .await?;
///
/// let products = factory.repository::<Product>().await?;
/// let archived = factory.keyed_repository::<Product>("archive").await?;
/// ```
#[derive(Clone)]
pub struct RepositoryFactory {
    inner: Arc<RepositoryFactoryInner>,
}

struct RepositoryFactoryInner {
    client: Client,
    database: Database,
    config: RepositoryConfig,
}

impl RepositoryFactory {
    /// Connects to the server described by `config`.
    ///
    /// The driver connects lazily, so an unreachable server is reported by the
    /// first operation rather than here.
    pub async fn connect(config: RepositoryConfig) -> RepositoryResult<Self> {
        config.validate()?;

        let (Some(connection_string), Some(database_name)) =
            (config.connection_string(), config.database_name())
        else {
            return Err(RepositoryError::new(
                "Repository configuration is incomplete",
                ErrorKind::InvalidConfiguration,
            ));
        };
        let database_name = database_name.to_string();

        let mut options = ClientOptions::parse(connection_string).await?;
        if let Some(app_name) = config.app_name() {
            options.app_name = Some(app_name.to_string());
        }
        let client = Client::with_options(options)?;
        let database = client.database(&database_name);

        log::info!("Connected repository factory to database {}", database_name);
        Ok(Self::from_client(client, database, config))
    }

    /// Creates a factory over an existing client and database.
    pub fn from_client(client: Client, database: Database, config: RepositoryConfig) -> Self {
        RepositoryFactory {
            inner: Arc::new(RepositoryFactoryInner {
                client,
                database,
                config,
            }),
        }
    }

    pub fn client(&self) -> &Client {
        &self.inner.client
    }

    pub fn database(&self) -> &Database {
        &self.inner.database
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.inner.config
    }

    /// Opens the repository for `T`.
    ///
    /// Uses the configured collection name, or the entity name when none is set.
    pub async fn repository<T: MongoEntity>(&self) -> RepositoryResult<ObjectRepository<T>> {
        let name = self.repository_name::<T>(None)?;
        self.open_collection(&name).await
    }

    /// Opens a second collection for `T`, named `entity_name+key`.
    pub async fn keyed_repository<T: MongoEntity>(
        &self,
        key: &str,
    ) -> RepositoryResult<ObjectRepository<T>> {
        let name = self.repository_name::<T>(Some(key))?;
        self.open_collection(&name).await
    }

    /// Returns `true` if the collection for `T` (optionally keyed) exists.
    ///
    /// Without a key this is the collection `repository::<T>()` opens.
    pub async fn has_repository<T: MongoEntity>(&self, key: Option<&str>) -> RepositoryResult<bool> {
        let name = self.repository_name::<T>(key)?;
        let names = self.inner.database.list_collection_names().await?;
        Ok(names.contains(&name))
    }

    /// Drops the collection for `T` (optionally keyed).
    pub async fn destroy_repository<T: MongoEntity>(&self, key: Option<&str>) -> RepositoryResult<()> {
        let name = self.repository_name::<T>(key)?;
        log::info!("Destroying repository {}", name);
        self.inner
            .database
            .collection::<T>(&name)
            .drop()
            .await?;
        Ok(())
    }

    /// Collection name for `T`: the configured name when unkeyed, else `entity_name+key`.
    pub(crate) fn repository_name<T: MongoEntity>(&self, key: Option<&str>) -> RepositoryResult<String> {
        match (key, self.inner.config.collection_name()) {
            (None, Some(name)) => Ok(name.to_string()),
            _ => collection_name_by_type::<T>(key),
        }
    }

    async fn open_collection<T: MongoEntity>(&self, name: &str) -> RepositoryResult<ObjectRepository<T>> {
        let collection = self.inner.database.collection::<T>(name);
        ObjectRepository::with_collection(collection, self.inner.config.clone()).await
    }
}
