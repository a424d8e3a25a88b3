use crate::common::KEY_OBJ_SEPARATOR;
use crate::errors::{ErrorKind, RepositoryError, RepositoryResult};
use crate::repository::MongoEntity;

/// Returns the collection name for an entity type, optionally keyed.
pub fn collection_name_by_type<T>(key: Option<&str>) -> RepositoryResult<String>
where
    T: MongoEntity,
{
    collection_name(&T::entity_name(), key)
}

/// Builds `entity_name` or `entity_name+key`.
pub fn collection_name(entity_name: &str, key: Option<&str>) -> RepositoryResult<String> {
    if entity_name.contains(KEY_OBJ_SEPARATOR) {
        log::error!("{} is not a valid entity name", entity_name);
        return Err(RepositoryError::new(
            &format!("{} is not a valid entity name", entity_name),
            ErrorKind::InvalidOperation,
        ));
    }

    match key {
        Some(k) => {
            let mut result = String::with_capacity(entity_name.len() + 1 + k.len());
            result.push_str(entity_name);
            result.push_str(KEY_OBJ_SEPARATOR);
            result.push_str(k);
            Ok(result)
        }
        None => Ok(entity_name.to_string()),
    }
}
