//! # mongo_repository - Typed repositories over MongoDB
//!
//! A generic repository layer for MongoDB. Each repository binds a serde
//! entity type to one collection and offers create, read, update and delete
//! operations, filtered queries, field-level updates and automatic index
//! provisioning. Everything else (connection pooling, wire protocol, query
//! planning, consistency) is left to the `mongodb` driver.
//!
//! ## Key Features
//!
//! - **Typed**: entities are plain Rust structs with serde derives
//! - **Declarative indexes**: unique, non-unique and full-text indexes declared on the entity
//! - **Filter DSL**: `field("age").gte(18).and(field("active").eq(true))`
//! - **Lazy queries**: nothing runs until a terminal method is awaited
//! - **Transparent errors**: driver failures are returned unmodified
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mongo_repository::document::DocumentId;
//! use mongo_repository::filter::field;
//! use mongo_repository::repository_builder::RepositoryBuilder;
//! use mongo_repository_derive::MongoEntity;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(MongoEntity, Serialize, Deserialize)]
//! pub struct Customer {
//!     #[serde(rename = "_id")]
//!     pub id: DocumentId,
//!     #[entity(unique)]
//!     pub email: String,
//!     pub name: String,
//! }
//!
//! let repo = RepositoryBuilder::new()
//!     .connection_string("mongodb://localhost:27017")
//!     .database_name("crm")
//!     .open::<Customer>()
//!     .await?;
//!
//! let customer = Customer { id: DocumentId::new(), email: "a@b.io".into(), name: "Ada".into() };
//! repo.insert(&customer).await?;
//!
//! let found = repo.find(field("name").eq("Ada")).first().await?;
//! repo.update_field_by_id(&customer.id, "name", "Ada L.").await?;
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Constants, sort order and naming utilities
//! - [`document`] - Document identifiers
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters
//! - [`index`] - Index options and descriptors
//! - [`repository`] - Typed repositories, queries, cursors and the repository factory
//! - [`repository_builder`] - Fluent builder for repositories
//! - [`repository_config`] - Repository configuration

pub mod common;
pub mod document;
pub mod errors;
pub mod filter;
pub mod index;
pub mod repository;
pub mod repository_builder;
pub mod repository_config;

pub use common::SortOrder;
pub use document::DocumentId;
pub use errors::{ErrorKind, RepositoryError, RepositoryResult};
pub use repository::{MongoEntity, ObjectRepository, RepositoryFactory};
pub use repository_builder::RepositoryBuilder;
pub use repository_config::RepositoryConfig;

/// The driver crate, re-exported so that generated code and callers use the same version.
pub use mongodb;
