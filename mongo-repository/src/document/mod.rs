//! Document identity.
//!
//! Every persisted entity carries a [`DocumentId`] stored under the `_id` field.
//! Ids are generated on the client when the entity is created, so a document is
//! addressable before it is ever written.

mod document_id;

pub use document_id::*;
