use crate::common::{DOC_ID, FULL_TEXT_INDEX, ID_INDEX_NAME, NON_UNIQUE_INDEX, TEXT_WILDCARD, UNIQUE_INDEX};
use mongodb::IndexModel;
use std::fmt::Display;

const TEXT_KEY: &str = "_fts";
const TEXT_SUFFIX_KEY: &str = "_ftsx";

/// Describes an index that exists on a collection.
///
/// Descriptors are read back from the server by `list_indexes`. A text index
/// stores its keys as `_fts`/`_ftsx`, so its field names are recovered from the
/// index weights; the wildcard text index reports the single field `$**`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexDescriptor {
    name: String,
    index_type: String,
    fields: Vec<String>,
}

impl IndexDescriptor {
    pub fn new(name: &str, index_type: &str, fields: Vec<String>) -> IndexDescriptor {
        IndexDescriptor {
            name: name.to_string(),
            index_type: index_type.to_string(),
            fields,
        }
    }

    /// Builds a descriptor from an index model returned by the driver.
    pub fn from_model(model: &IndexModel) -> IndexDescriptor {
        let options = model.options.as_ref();
        let name = options
            .and_then(|o| o.name.clone())
            .unwrap_or_default();

        if model.keys.contains_key(TEXT_KEY) {
            let mut fields: Vec<String> = options
                .and_then(|o| o.weights.as_ref())
                .map(|weights| weights.keys().cloned().collect())
                .unwrap_or_default();
            // text indexes may be compound with ascending prefix or suffix keys
            for key in model.keys.keys() {
                if key != TEXT_KEY && key != TEXT_SUFFIX_KEY && !fields.contains(key) {
                    fields.push(key.clone());
                }
            }
            return IndexDescriptor::new(&name, FULL_TEXT_INDEX, fields);
        }

        let fields: Vec<String> = model.keys.keys().cloned().collect();
        let unique = options.and_then(|o| o.unique).unwrap_or(false)
            || name == ID_INDEX_NAME
            || (fields.len() == 1 && fields[0] == DOC_ID);
        let index_type = if unique { UNIQUE_INDEX } else { NON_UNIQUE_INDEX };

        IndexDescriptor::new(&name, index_type, fields)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index_type(&self) -> &str {
        &self.index_type
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_unique(&self) -> bool {
        self.index_type == UNIQUE_INDEX
    }

    pub fn is_full_text(&self) -> bool {
        self.index_type == FULL_TEXT_INDEX
    }

    /// Returns `true` for the text index that covers every string field.
    pub fn is_wildcard_text(&self) -> bool {
        self.is_full_text() && self.fields.iter().any(|f| f == TEXT_WILDCARD)
    }

    /// Returns `true` if this index is over exactly `fields`, in order.
    pub fn covers(&self, fields: &[&str]) -> bool {
        self.fields.len() == fields.len()
            && self.fields.iter().zip(fields.iter()).all(|(a, b)| a == b)
    }
}

impl Display for IndexDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IndexDescriptor {{ name: {}, index_type: {}, fields: [{}] }}",
            self.name,
            self.index_type,
            self.fields.join(", ")
        )
    }
}
