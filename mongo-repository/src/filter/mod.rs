//! Query filters for selecting documents from a repository.
//!
//! Filters are plain values. They are built with the fluent API and translated
//! into MongoDB query documents only when a query runs.
//!
//! # Creating Filters
//!
//! - `field("age").gt(30)` - comparison operators
//! - `field("name").eq("Alice")` - equality checks
//! - `all()` - match all documents
//! - `by_id(&id)` - match by document id
//! - `text("rust driver")` - full-text search
//! - `field("age").gt(30).and(field("status").eq("active"))` - logical AND
//!
//! # Examples
//!
//! ```rust,ignore
//! use mongo_repository::filter::{field, all, not};
//!
//! let filter = field("age").gte(18).and(field("country").eq("NZ"));
//! let adults = repo.find(filter).to_vec().await?;
//!
//! let removed = repo.remove(not(field("active").eq(true))).await?;
//! ```
//!
//! # Supported Operators
//!
//! - **Equality**: `eq`, `ne`
//! - **Comparison**: `gt`, `gte`, `lt`, `lte`, `between`
//! - **Pattern**: `regex`, `text`
//! - **Array**: `in_array`, `not_in`, `elem_match`
//! - **Presence**: `exists`
//! - **Logical**: `and`, `or`, `not`
//! - **Special**: `all`, `by_id`, `raw`

mod filter;
mod fluent;

pub use filter::*;
pub use fluent::*;
