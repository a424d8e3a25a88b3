use crate::common::DOC_ID;
use crate::document::DocumentId;
use mongodb::bson::{doc, Bson, Document};
use std::fmt::Display;

/// Bounds of a range filter; each side is independently inclusive.
#[derive(Clone, Debug, PartialEq)]
pub struct Bound {
    pub lower: Bson,
    pub upper: Bson,
    pub lower_inclusive: bool,
    pub upper_inclusive: bool,
}

impl Bound {
    pub fn inclusive(lower: Bson, upper: Bson) -> Self {
        Bound { lower, upper, lower_inclusive: true, upper_inclusive: true }
    }

    pub fn optional_inclusive(lower: Bson, upper: Bson, inclusive: bool) -> Self {
        Bound { lower, upper, lower_inclusive: inclusive, upper_inclusive: inclusive }
    }
}

/// A declarative predicate over document fields.
///
/// Filters are plain values built by the caller (usually through
/// [`field`](super::field) and the other helper functions) and translated into a
/// MongoDB query document by [`Filter::to_document`]. Field names are not checked
/// against the entity type; a filter on an unknown field matches nothing.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// Matches every document.
    All,
    Eq(String, Bson),
    Ne(String, Bson),
    Gt(String, Bson),
    Gte(String, Bson),
    Lt(String, Bson),
    Lte(String, Bson),
    Between(String, Bound),
    In(String, Vec<Bson>),
    NotIn(String, Vec<Bson>),
    /// Pattern match with optional regex options (e.g. `"i"`).
    Regex(String, String, Option<String>),
    Exists(String, bool),
    /// Matches array elements against a filter whose field names are relative to the element.
    ElemMatch(String, Box<Filter>),
    /// Full-text search, served by the collection's text index.
    Text(String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
    /// A driver query document passed through verbatim.
    Raw(Document),
}

impl Filter {
    /// Translates the filter into a MongoDB query document.
    pub fn to_document(&self) -> Document {
        match self {
            Filter::All => Document::new(),
            Filter::Eq(field, value) => doc! { field: { "$eq": value.clone() } },
            Filter::Ne(field, value) => doc! { field: { "$ne": value.clone() } },
            Filter::Gt(field, value) => doc! { field: { "$gt": value.clone() } },
            Filter::Gte(field, value) => doc! { field: { "$gte": value.clone() } },
            Filter::Lt(field, value) => doc! { field: { "$lt": value.clone() } },
            Filter::Lte(field, value) => doc! { field: { "$lte": value.clone() } },
            Filter::Between(field, bound) => {
                let mut range = Document::new();
                let lower_op = if bound.lower_inclusive { "$gte" } else { "$gt" };
                let upper_op = if bound.upper_inclusive { "$lte" } else { "$lt" };
                range.insert(lower_op, bound.lower.clone());
                range.insert(upper_op, bound.upper.clone());
                doc! { field: range }
            }
            Filter::In(field, values) => doc! { field: { "$in": values.clone() } },
            Filter::NotIn(field, values) => doc! { field: { "$nin": values.clone() } },
            Filter::Regex(field, pattern, options) => {
                let mut regex = doc! { "$regex": pattern.as_str() };
                if let Some(options) = options {
                    regex.insert("$options", options.as_str());
                }
                doc! { field: regex }
            }
            Filter::Exists(field, exists) => doc! { field: { "$exists": *exists } },
            Filter::ElemMatch(field, inner) => doc! { field: { "$elemMatch": inner.to_document() } },
            Filter::Text(search) => doc! { "$text": { "$search": search.as_str() } },
            Filter::And(filters) => logical("$and", filters),
            Filter::Or(filters) => logical("$or", filters),
            Filter::Not(inner) => doc! { "$nor": [inner.to_document()] },
            Filter::Raw(document) => document.clone(),
        }
    }

    /// Combines this filter with another using logical AND.
    pub fn and(self, other: Filter) -> Filter {
        match self {
            Filter::All => other,
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            this => Filter::And(vec![this, other]),
        }
    }

    /// Combines this filter with another using logical OR.
    pub fn or(self, other: Filter) -> Filter {
        match self {
            Filter::Or(mut filters) => {
                filters.push(other);
                Filter::Or(filters)
            }
            this => Filter::Or(vec![this, other]),
        }
    }

    /// Negates this filter.
    pub fn not(self) -> Filter {
        Filter::Not(Box::new(self))
    }
}

fn logical(operator: &str, filters: &[Filter]) -> Document {
    if filters.is_empty() {
        return Document::new();
    }
    let clauses: Vec<Document> = filters.iter().map(Filter::to_document).collect();
    doc! { operator: clauses }
}

fn join(filters: &[Filter], separator: &str) -> String {
    let mut joined = String::with_capacity(filters.len() * 16);
    for (i, filter) in filters.iter().enumerate() {
        joined.push_str(&filter.to_string());
        if i < filters.len() - 1 {
            joined.push_str(separator);
        }
    }
    joined
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => write!(f, "All"),
            Filter::Eq(field, value) => write!(f, "({} == {})", field, value),
            Filter::Ne(field, value) => write!(f, "({} != {})", field, value),
            Filter::Gt(field, value) => write!(f, "({} > {})", field, value),
            Filter::Gte(field, value) => write!(f, "({} >= {})", field, value),
            Filter::Lt(field, value) => write!(f, "({} < {})", field, value),
            Filter::Lte(field, value) => write!(f, "({} <= {})", field, value),
            Filter::Between(field, bound) => write!(
                f,
                "({} between {}{}, {}{})",
                field,
                if bound.lower_inclusive { "[" } else { "(" },
                bound.lower,
                bound.upper,
                if bound.upper_inclusive { "]" } else { ")" },
            ),
            Filter::In(field, values) => write!(f, "({} in {:?})", field, values),
            Filter::NotIn(field, values) => write!(f, "({} not in {:?})", field, values),
            Filter::Regex(field, pattern, _) => write!(f, "({} regex {})", field, pattern),
            Filter::Exists(field, exists) => write!(f, "({} exists {})", field, exists),
            Filter::ElemMatch(field, inner) => write!(f, "(elemMatch({} : {}))", field, inner),
            Filter::Text(search) => write!(f, "(text : {})", search),
            Filter::And(filters) => write!(f, "({})", join(filters, " && ")),
            Filter::Or(filters) => write!(f, "({})", join(filters, " || ")),
            Filter::Not(inner) => write!(f, "!{}", inner),
            Filter::Raw(document) => write!(f, "{}", document),
        }
    }
}

/// Matches the document with the given id.
pub fn by_id(id: &DocumentId) -> Filter {
    Filter::Eq(DOC_ID.to_string(), Bson::from(id))
}

/// Matches every document.
pub fn all() -> Filter {
    Filter::All
}

/// Matches documents satisfying all of `filters`.
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::And(filters)
}

/// Matches documents satisfying at least one of `filters`.
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::Or(filters)
}

/// Matches documents that do not satisfy `filter`.
pub fn not(filter: Filter) -> Filter {
    Filter::Not(Box::new(filter))
}

/// Full-text search over the collection's text index.
pub fn text(search: &str) -> Filter {
    Filter::Text(search.to_string())
}

/// Wraps a driver query document.
pub fn raw(document: Document) -> Filter {
    Filter::Raw(document)
}
