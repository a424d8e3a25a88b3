//! Configuration for repositories and repository factories.

use crate::errors::{ErrorKind, RepositoryError, RepositoryResult};

/// Settings used to connect to MongoDB and provision a repository collection.
///
/// The connection string and the database name are required; everything else
/// has a default. Values are not interpreted here beyond checking that they
/// are present: the driver parses and validates the connection string.
///
/// # Examples
///
/// ```rust,ignore
/// use mongo_repository::repository_config::RepositoryConfig;
///
/// let mut config = RepositoryConfig::new();
/// config.set_connection_string("mongodb://localhost:27017")?;
/// config.set_database_name("shop")?;
/// config.add_unique_field("sku")?;
/// config.validate()?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepositoryConfig {
    connection_string: Option<String>,
    database_name: Option<String>,
    collection_name: Option<String>,
    unique_fields: Vec<String>,
    text_index: bool,
    app_name: Option<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryConfig {
    /// Creates a configuration with default values and no connection settings.
    pub fn new() -> Self {
        RepositoryConfig {
            connection_string: None,
            database_name: None,
            collection_name: None,
            unique_fields: Vec::new(),
            text_index: true,
            app_name: None,
        }
    }

    pub fn connection_string(&self) -> Option<&str> {
        self.connection_string.as_deref()
    }

    pub fn set_connection_string(&mut self, connection_string: &str) -> RepositoryResult<()> {
        self.connection_string = Some(require_value("Connection string", connection_string)?);
        Ok(())
    }

    pub fn database_name(&self) -> Option<&str> {
        self.database_name.as_deref()
    }

    pub fn set_database_name(&mut self, database_name: &str) -> RepositoryResult<()> {
        self.database_name = Some(require_value("Database name", database_name)?);
        Ok(())
    }

    /// Explicit collection name. When unset the entity name is used.
    pub fn collection_name(&self) -> Option<&str> {
        self.collection_name.as_deref()
    }

    pub fn set_collection_name(&mut self, collection_name: &str) -> RepositoryResult<()> {
        self.collection_name = Some(require_value("Collection name", collection_name)?);
        Ok(())
    }

    /// Unique fields provisioned in addition to those declared by the entity.
    pub fn unique_fields(&self) -> &[String] {
        &self.unique_fields
    }

    pub fn add_unique_field(&mut self, field_name: &str) -> RepositoryResult<()> {
        let field_name = require_value("Unique field name", field_name)?;
        if !self.unique_fields.contains(&field_name) {
            self.unique_fields.push(field_name);
        }
        Ok(())
    }

    /// Whether the wildcard text index is provisioned. Defaults to `true`.
    pub fn text_index(&self) -> bool {
        self.text_index
    }

    pub fn set_text_index(&mut self, enabled: bool) {
        self.text_index = enabled;
    }

    /// Application name reported to the server in the connection handshake.
    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    pub fn set_app_name(&mut self, app_name: &str) -> RepositoryResult<()> {
        self.app_name = Some(require_value("Application name", app_name)?);
        Ok(())
    }

    /// Checks that the connection string and the database name are present.
    pub fn validate(&self) -> RepositoryResult<()> {
        if self.connection_string.is_none() {
            log::error!("Connection string is required");
            return Err(RepositoryError::new(
                "Connection string is required",
                ErrorKind::InvalidConfiguration,
            ));
        }

        if self.database_name.is_none() {
            log::error!("Database name is required");
            return Err(RepositoryError::new(
                "Database name is required",
                ErrorKind::InvalidConfiguration,
            ));
        }

        Ok(())
    }
}

fn require_value(what: &str, value: &str) -> RepositoryResult<String> {
    if value.trim().is_empty() {
        log::error!("{} cannot be empty", what);
        return Err(RepositoryError::new(
            &format!("{} cannot be empty", what),
            ErrorKind::InvalidConfiguration,
        ));
    }
    Ok(value.to_string())
}
