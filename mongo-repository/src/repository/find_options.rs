use crate::common::SortOrder;
use mongodb::bson::Document;

/// Sorting and pagination for a query.
///
/// Sort fields are applied in the order they were added. Skip and limit are
/// applied by the server after sorting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindOptions {
    pub(crate) sort_by: Vec<(String, SortOrder)>,
    pub(crate) skip: Option<u64>,
    pub(crate) limit: Option<u64>,
}

/// Creates find options sorted by a single field.
pub fn order_by(field_name: &str, sort_order: SortOrder) -> FindOptions {
    FindOptions::new().sort_by(field_name, sort_order)
}

pub fn skip_by(skip: u64) -> FindOptions {
    FindOptions::new().skip(skip)
}

pub fn limit_to(limit: u64) -> FindOptions {
    FindOptions::new().limit(limit)
}

impl FindOptions {
    pub fn new() -> FindOptions {
        FindOptions {
            sort_by: Vec::new(),
            skip: None,
            limit: None,
        }
    }

    pub fn skip(mut self, skip: u64) -> FindOptions {
        self.skip = Some(skip);
        self
    }

    pub fn limit(mut self, limit: u64) -> FindOptions {
        self.limit = Some(limit);
        self
    }

    /// Adds a sort field. Sorting on a field already present replaces its order.
    pub fn sort_by(mut self, field_name: &str, sort_order: SortOrder) -> FindOptions {
        match self.sort_by.iter_mut().find(|(name, _)| name == field_name) {
            Some(entry) => entry.1 = sort_order,
            None => self.sort_by.push((field_name.to_string(), sort_order)),
        }
        self
    }

    pub fn skip_count(&self) -> Option<u64> {
        self.skip
    }

    pub fn limit_count(&self) -> Option<u64> {
        self.limit
    }

    /// Builds the driver sort document, or `None` when no sort was requested.
    pub fn sort_document(&self) -> Option<Document> {
        if self.sort_by.is_empty() {
            return None;
        }

        let mut sort = Document::new();
        for (field_name, order) in &self.sort_by {
            sort.insert(field_name.clone(), *order);
        }
        Some(sort)
    }

    /// The limit as the signed value the driver expects, saturating at `i64::MAX`.
    pub(crate) fn driver_limit(&self) -> Option<i64> {
        self.limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX))
    }
}
