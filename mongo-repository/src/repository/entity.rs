use crate::common::{FULL_TEXT_INDEX, UNIQUE_INDEX};
use crate::document::DocumentId;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Trait that defines the schema and metadata for a persisted entity.
///
/// # Purpose
/// Provides the collection name, the document id and the statically declared
/// index list of an entity type. Implemented automatically by the
/// `MongoEntity` derive macro; no runtime reflection is involved.
///
/// # Characteristics
/// - Serialized with serde; the id field must be stored as `_id`
/// - `Unpin + 'static` so that driver cursors over the type can be streamed
/// - Index declarations are provisioned when a repository is opened
///
/// # Usage
/// ```ignore
/// #[derive(MongoEntity, Serialize, Deserialize)]
/// #[entity(name = "users", index(type = "non-unique", fields = "last_name, first_name"))]
/// pub struct User {
///     #[serde(rename = "_id")]
///     id: DocumentId,
///     #[entity(unique)]
///     email: String,
///     first_name: String,
///     last_name: String,
/// }
/// ```
pub trait MongoEntity: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// Returns the entity name, used as the default collection name.
    ///
    /// Defaults to the struct name unless customized via `#[entity(name = "...")]`.
    fn entity_name() -> String;

    /// Returns the index definitions declared for this entity.
    fn entity_indexes() -> Vec<EntityIndex>;

    /// Returns the id of this entity instance.
    fn entity_id(&self) -> DocumentId;

    /// Returns the fields that carry a single-field unique index.
    fn unique_fields() -> Vec<String> {
        Self::entity_indexes()
            .into_iter()
            .filter(|index| index.is_unique() && index.field_names().len() == 1)
            .flat_map(|index| index.fields)
            .collect()
    }
}

/// Defines an index on one or more fields of an entity.
///
/// The default index type is unique. Compound indexes list their fields in key order.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct EntityIndex {
    fields: Vec<String>,
    index_type: String,
}

impl EntityIndex {
    /// Creates a new index definition.
    ///
    /// # Arguments
    /// * `fields` - Field names to index (e.g., ["email"] or ["last_name", "first_name"])
    /// * `index_type` - Index type ("unique", "non-unique" or "full-text"), unique if `None`
    pub fn new(fields: Vec<&str>, index_type: Option<&str>) -> Self {
        EntityIndex {
            fields: fields.iter().map(|field| field.to_string()).collect(),
            index_type: index_type.unwrap_or(UNIQUE_INDEX).to_string(),
        }
    }

    pub fn field_names(&self) -> &Vec<String> {
        &self.fields
    }

    pub fn index_type(&self) -> &str {
        &self.index_type
    }

    pub fn is_unique(&self) -> bool {
        self.index_type == UNIQUE_INDEX
    }

    pub fn is_full_text(&self) -> bool {
        self.index_type == FULL_TEXT_INDEX
    }
}
