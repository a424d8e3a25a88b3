use mongodb::bson::Bson;

use super::{Bound, Filter};

/// Creates a fluent filter builder for the specified field name.
///
/// Nested fields use MongoDB dot notation (`"address.city"`).
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field_name: field_name.to_string(),
    }
}

/// A fluent builder for constructing filters on a specific field.
///
/// Each method consumes the builder and returns a [`Filter`] that can be passed to
/// repository queries or combined with other filters.
pub struct FluentFilter {
    field_name: String,
}

impl FluentFilter {
    /// Matches documents where the field equals `value`.
    #[inline]
    pub fn eq<T: Into<Bson>>(self, value: T) -> Filter {
        Filter::Eq(self.field_name, value.into())
    }

    /// Matches documents where the field does not equal `value`.
    #[inline]
    pub fn ne<T: Into<Bson>>(self, value: T) -> Filter {
        Filter::Ne(self.field_name, value.into())
    }

    #[inline]
    pub fn gt<T: Into<Bson>>(self, value: T) -> Filter {
        Filter::Gt(self.field_name, value.into())
    }

    #[inline]
    pub fn gte<T: Into<Bson>>(self, value: T) -> Filter {
        Filter::Gte(self.field_name, value.into())
    }

    #[inline]
    pub fn lt<T: Into<Bson>>(self, value: T) -> Filter {
        Filter::Lt(self.field_name, value.into())
    }

    #[inline]
    pub fn lte<T: Into<Bson>>(self, value: T) -> Filter {
        Filter::Lte(self.field_name, value.into())
    }

    /// Matches documents where the field lies within `[lower_bound, upper_bound]`.
    pub fn between<T: Into<Bson>>(self, lower_bound: T, upper_bound: T) -> Filter {
        Filter::Between(
            self.field_name,
            Bound::inclusive(lower_bound.into(), upper_bound.into()),
        )
    }

    /// Range match where both bounds are inclusive or both exclusive.
    pub fn between_inclusive<T: Into<Bson>>(
        self,
        lower_bound: T,
        upper_bound: T,
        inclusive: bool,
    ) -> Filter {
        Filter::Between(
            self.field_name,
            Bound::optional_inclusive(lower_bound.into(), upper_bound.into(), inclusive),
        )
    }

    /// Range match with independent bound inclusivity.
    pub fn between_bounds<T: Into<Bson>>(
        self,
        lower_bound: T,
        upper_bound: T,
        lower_inclusive: bool,
        upper_inclusive: bool,
    ) -> Filter {
        Filter::Between(
            self.field_name,
            Bound {
                lower: lower_bound.into(),
                upper: upper_bound.into(),
                lower_inclusive,
                upper_inclusive,
            },
        )
    }

    /// Matches documents where the field equals any of `values`.
    pub fn in_array<T: Into<Bson>>(self, values: Vec<T>) -> Filter {
        Filter::In(self.field_name, values.into_iter().map(Into::into).collect())
    }

    /// Matches documents where the field equals none of `values`.
    pub fn not_in<T: Into<Bson>>(self, values: Vec<T>) -> Filter {
        Filter::NotIn(self.field_name, values.into_iter().map(Into::into).collect())
    }

    /// Matches documents where the field matches the regular expression.
    pub fn regex(self, pattern: &str) -> Filter {
        Filter::Regex(self.field_name, pattern.to_string(), None)
    }

    /// Regex match with MongoDB regex options such as `"i"` or `"m"`.
    pub fn regex_with_options(self, pattern: &str, options: &str) -> Filter {
        Filter::Regex(self.field_name, pattern.to_string(), Some(options.to_string()))
    }

    pub fn exists(self, exists: bool) -> Filter {
        Filter::Exists(self.field_name, exists)
    }

    /// Matches documents where at least one array element satisfies `filter`.
    pub fn elem_match(self, filter: Filter) -> Filter {
        Filter::ElemMatch(self.field_name, Box::new(filter))
    }
}
