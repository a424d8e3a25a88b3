use crate::errors::{RepositoryError, RepositoryResult};
use crate::repository::{MongoEntity, ObjectRepository, RepositoryFactory};
use crate::repository_config::RepositoryConfig;

/// Fluent builder for repositories and repository factories.
///
/// Setter errors are captured and reported when the builder is opened, so a
/// chain of calls never needs intermediate error handling.
///
/// # Examples
///
/// ```rust,ignore
/// use mongo_repository::repository_builder::RepositoryBuilder;
///
/// let repo = RepositoryBuilder::new()
///     .connection_string("mongodb://localhost:27017")
///     .database_name("shop")
///     .collection_name("products")
///     .unique_field("sku")
///     .app_name("inventory")
///     .open::<Product>()
///     .await?;
/// ```
#[derive(Default)]
pub struct RepositoryBuilder {
    error: Option<RepositoryError>,
    config: RepositoryConfig,
}

impl RepositoryBuilder {
    pub fn new() -> Self {
        RepositoryBuilder {
            error: None,
            config: RepositoryConfig::new(),
        }
    }

    /// Starts from an existing configuration.
    pub fn with_config(config: RepositoryConfig) -> Self {
        RepositoryBuilder {
            error: None,
            config,
        }
    }

    pub fn connection_string(mut self, connection_string: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_connection_string(connection_string) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn database_name(mut self, database_name: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_database_name(database_name) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn collection_name(mut self, collection_name: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_collection_name(collection_name) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Adds a field that gets a unique index in addition to the entity's own.
    pub fn unique_field(mut self, field_name: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.add_unique_field(field_name) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Enables or disables the wildcard text index.
    pub fn text_index(mut self, enabled: bool) -> Self {
        self.config.set_text_index(enabled);
        self
    }

    pub fn app_name(mut self, app_name: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_app_name(app_name) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Connects and opens the repository for `T`, provisioning its indexes.
    pub async fn open<T: MongoEntity>(self) -> RepositoryResult<ObjectRepository<T>> {
        let factory = self.open_factory().await?;
        factory.repository::<T>().await
    }

    /// Connects and returns a factory for opening several repositories.
    pub async fn open_factory(self) -> RepositoryResult<RepositoryFactory> {
        if let Some(error) = self.error {
            return Err(error);
        }
        RepositoryFactory::connect(self.config).await
    }
}
