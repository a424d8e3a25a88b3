use crate::common::{FULL_TEXT_INDEX, NON_UNIQUE_INDEX, TEXT_WILDCARD, UNIQUE_INDEX};
use crate::errors::{ErrorKind, RepositoryError, RepositoryResult};
use mongodb::bson::Document;
use mongodb::options::IndexOptions as DriverIndexOptions;
use mongodb::IndexModel;

/// Specifies configuration options for creating collection indexes.
///
/// The index type selects how the fields are indexed on the server:
///
/// - **unique**: ascending keys with a uniqueness constraint; duplicate values are rejected
///   by the server when written.
/// - **non-unique**: plain ascending keys.
/// - **full-text**: text keys. The wildcard field `$**` indexes every string field.
///
/// An optional name overrides the name MongoDB derives from the keys.
///
/// ```ignore
/// repo.create_index(vec!["email"], &unique_index()).await?;
/// repo.create_index(vec!["last_name", "first_name"], &non_unique_index()).await?;
/// repo.create_index(vec!["$**"], &full_text_index()).await?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexOptions {
    index_type: String,
    name: Option<String>,
}

impl IndexOptions {
    /// Creates a new IndexOptions with the specified index type.
    ///
    /// No validation is performed here; an unknown type is rejected when the
    /// index model is built.
    pub fn new(index_type: &str) -> IndexOptions {
        IndexOptions {
            index_type: index_type.to_string(),
            name: None,
        }
    }

    /// Sets an explicit index name.
    pub fn with_name(mut self, name: &str) -> IndexOptions {
        self.name = Some(name.to_string());
        self
    }

    pub fn index_type(&self) -> String {
        self.index_type.clone()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Builds the driver index model for `fields`.
    pub fn index_model(&self, fields: &[&str]) -> RepositoryResult<IndexModel> {
        if fields.is_empty() {
            log::error!("Cannot create a {} index without fields", self.index_type);
            return Err(RepositoryError::new(
                "Index requires at least one field",
                ErrorKind::InvalidOperation,
            ));
        }

        let mut keys = Document::new();
        let mut driver_options = DriverIndexOptions::builder().build();

        match self.index_type.as_str() {
            UNIQUE_INDEX => {
                for field in fields {
                    keys.insert(*field, 1);
                }
                driver_options.unique = Some(true);
            }
            NON_UNIQUE_INDEX => {
                for field in fields {
                    keys.insert(*field, 1);
                }
            }
            FULL_TEXT_INDEX => {
                for field in fields {
                    keys.insert(*field, "text");
                }
            }
            other => {
                log::error!("Unsupported index type {}", other);
                return Err(RepositoryError::new(
                    &format!("Unsupported index type {}", other),
                    ErrorKind::InvalidOperation,
                ));
            }
        }

        if let Some(name) = &self.name {
            driver_options.name = Some(name.clone());
        }

        Ok(IndexModel::builder().keys(keys).options(driver_options).build())
    }
}

impl Default for IndexOptions {
    /// Defaults to a unique index.
    fn default() -> Self {
        IndexOptions::new(UNIQUE_INDEX)
    }
}

/// Creates IndexOptions for a unique index.
pub fn unique_index() -> IndexOptions {
    IndexOptions::new(UNIQUE_INDEX)
}

/// Creates IndexOptions for a non-unique index.
pub fn non_unique_index() -> IndexOptions {
    IndexOptions::new(NON_UNIQUE_INDEX)
}

/// Creates IndexOptions for a full-text index.
pub fn full_text_index() -> IndexOptions {
    IndexOptions::new(FULL_TEXT_INDEX)
}

/// Index model of the wildcard text index that covers every string field.
pub fn wildcard_text_index_model() -> RepositoryResult<IndexModel> {
    full_text_index().index_model(&[TEXT_WILDCARD])
}
