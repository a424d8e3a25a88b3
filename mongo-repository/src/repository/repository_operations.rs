use crate::common::DOC_ID;
use crate::document::DocumentId;
use crate::errors::RepositoryResult;
use crate::index::{full_text_index, unique_index, wildcard_text_index_model, IndexOptions};
use crate::repository::MongoEntity;
use crate::repository_config::RepositoryConfig;
use mongodb::bson::{doc, to_bson, Document};
use mongodb::IndexModel;
use serde::Serialize;

/// Computes the indexes a repository of `T` must carry under `config`.
///
/// - one ascending unique index per unique field (entity and configuration);
/// - every other non-text index the entity declares;
/// - the wildcard text index, or when it is disabled, a single text index
///   over the entity's full-text fields.
///
/// `_id` is always indexed by the server and is skipped.
pub(crate) fn planned_indexes<T: MongoEntity>(
    config: &RepositoryConfig,
) -> RepositoryResult<Vec<IndexModel>> {
    let mut unique_fields: Vec<String> = Vec::new();
    for field_name in T::unique_fields()
        .into_iter()
        .chain(config.unique_fields().iter().cloned())
    {
        if field_name != DOC_ID && !unique_fields.contains(&field_name) {
            unique_fields.push(field_name);
        }
    }

    let mut models = Vec::new();
    for field_name in &unique_fields {
        models.push(unique_index().index_model(&[field_name.as_str()])?);
    }

    let mut text_fields: Vec<String> = Vec::new();
    for entity_index in T::entity_indexes() {
        let fields: Vec<&str> = entity_index.field_names().iter().map(String::as_str).collect();

        if entity_index.is_full_text() {
            for field in fields {
                if !text_fields.iter().any(|f| f == field) {
                    text_fields.push(field.to_string());
                }
            }
            continue;
        }

        let single_unique = entity_index.is_unique() && fields.len() == 1;
        if single_unique || fields == [DOC_ID] {
            continue;
        }
        models.push(IndexOptions::new(entity_index.index_type()).index_model(&fields)?);
    }

    if config.text_index() {
        models.push(wildcard_text_index_model()?);
    } else if !text_fields.is_empty() {
        let fields: Vec<&str> = text_fields.iter().map(String::as_str).collect();
        models.push(full_text_index().index_model(&fields)?);
    }

    Ok(models)
}

pub(crate) fn id_filter(id: &DocumentId) -> Document {
    doc! { DOC_ID: id }
}

/// Builds a `$set` update for a single field.
pub(crate) fn set_update<V: Serialize>(field_name: &str, value: &V) -> RepositoryResult<Document> {
    let value = to_bson(value)?;
    Ok(doc! { "$set": { field_name: value } })
}
