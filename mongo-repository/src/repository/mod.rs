//! Object repositories for type-safe persistence in MongoDB.
//!
//! `ObjectRepository<T>` binds an entity type to one collection and exposes
//! insert, query, update, delete and index operations over it. Entities are
//! plain serde structs that implement [`MongoEntity`], usually through the
//! derive macro.
//!
//! # Creating Repositories
//!
//! ```rust,ignore
//! use mongo_repository::repository::ObjectRepository;
//! use mongo_repository_derive::MongoEntity;
//!
//! #[derive(MongoEntity, Serialize, Deserialize)]
//! pub struct User {
//!     #[serde(rename = "_id")]
//!     pub id: DocumentId,
//!     #[entity(unique)]
//!     pub email: String,
//! }
//!
//! // Directly
//! let repo = ObjectRepository::<User>::open("mongodb://localhost:27017", "app", "users").await?;
//!
//! // Or through a factory sharing one client
//! let users = factory.repository::<User>().await?;
//! let archived = factory.keyed_repository::<User>("archive").await?;
//! ```
//!
//! # Queries
//!
//! `find` returns a lazy [`Query`]; nothing is sent to the server until a
//! terminal method (`cursor`, `to_vec`, `first`, `count`) is awaited.

mod cursor;
mod entity;
mod find_options;
mod query;
mod repository;
mod repository_factory;
mod repository_operations;
mod write_result;

pub use cursor::*;
pub use entity::*;
pub use find_options::*;
pub use query::*;
pub use repository::*;
pub use repository_factory::*;
pub use write_result::*;
