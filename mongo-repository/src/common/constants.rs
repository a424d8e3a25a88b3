// document
pub const DOC_ID: &str = "_id";

// repository
pub const KEY_OBJ_SEPARATOR: &str = "+";

// index types
pub const UNIQUE_INDEX: &str = "unique";
pub const NON_UNIQUE_INDEX: &str = "non-unique";
pub const FULL_TEXT_INDEX: &str = "full-text";

/// Wildcard specifier that makes a text index cover every string field.
pub const TEXT_WILDCARD: &str = "$**";
/// Name MongoDB assigns to the mandatory `_id` index.
pub const ID_INDEX_NAME: &str = "_id_";
