//! Index management for repository collections.
//!
//! Three index types are supported:
//!
//! - **unique**: rejects writes that duplicate an existing key
//! - **non-unique**: speeds up lookups and sorting
//! - **full-text**: enables `text(...)` searches; MongoDB allows one per collection
//!
//! Indexes declared by an entity are provisioned when a repository is opened.
//! Additional indexes can be created at runtime:
//!
//! ```rust,ignore
//! use mongo_repository::index::{unique_index, non_unique_index};
//!
//! repo.create_index(vec!["email"], &unique_index()).await?;
//! repo.create_index(vec!["last_name", "first_name"], &non_unique_index()).await?;
//!
//! for descriptor in repo.list_indexes().await? {
//!     println!("{}", descriptor);
//! }
//! ```

mod descriptor;
mod options;

pub use descriptor::*;
pub use options::*;
