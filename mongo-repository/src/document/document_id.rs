use crate::errors::{RepositoryError, RepositoryResult};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// A unique identifier for documents in a repository.
///
/// `DocumentId` wraps a MongoDB `ObjectId` and serializes transparently, so it is
/// stored as a native ObjectId in the `_id` field. Ids are immutable once created.
///
/// # Examples
///
/// ```rust,ignore
/// use mongo_repository::document::DocumentId;
///
/// // Generate a fresh id when creating an entity
/// let id = DocumentId::new();
///
/// // Round-trip through the 24 character hex form
/// let parsed = DocumentId::parse(&id.to_hex())?;
/// assert_eq!(id, parsed);
/// ```
///
/// The id field of an entity must be renamed to `_id` for serde:
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize, MongoEntity)]
/// pub struct User {
///     #[serde(rename = "_id")]
///     pub id: DocumentId,
///     pub email: String,
/// }
/// ```
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, Copy, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct DocumentId {
    object_id: ObjectId,
}

impl DocumentId {
    /// Generates a new unique `DocumentId`.
    pub fn new() -> Self {
        DocumentId {
            object_id: ObjectId::new(),
        }
    }

    /// Parses a `DocumentId` from its 24 character hex representation.
    ///
    /// Returns an `InvalidId` error if the string is not a valid ObjectId.
    pub fn parse(hex: &str) -> RepositoryResult<Self> {
        let object_id = ObjectId::parse_str(hex).map_err(|e| {
            log::error!("Invalid document id {}: {}", hex, e);
            RepositoryError::from(e)
        })?;
        Ok(DocumentId { object_id })
    }

    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    pub fn to_hex(&self) -> String {
        self.object_id.to_hex()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        DocumentId::new()
    }
}

impl FromStr for DocumentId {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentId::parse(s)
    }
}

impl From<ObjectId> for DocumentId {
    fn from(object_id: ObjectId) -> Self {
        DocumentId { object_id }
    }
}

impl From<DocumentId> for ObjectId {
    fn from(id: DocumentId) -> Self {
        id.object_id
    }
}

impl From<DocumentId> for Bson {
    fn from(id: DocumentId) -> Self {
        Bson::ObjectId(id.object_id)
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.object_id.to_hex())
    }
}

impl Debug for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DocumentId({})", self.object_id.to_hex())
    }
}
