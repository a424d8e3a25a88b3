#![recursion_limit = "128"]
//! Derive macro for `mongo_repository` entities.
//!
//! `#[derive(MongoEntity)]` implements `mongo_repository::repository::MongoEntity`
//! from attributes:
//!
//! ```rust,ignore
//! #[derive(MongoEntity, Serialize, Deserialize)]
//! #[entity(name = "books", index(type = "full-text", fields = "title, summary"))]
//! pub struct Book {
//!     #[serde(rename = "_id")]
//!     pub id: DocumentId,
//!     #[entity(unique)]
//!     pub isbn: String,
//!     pub title: String,
//!     pub summary: String,
//! }
//! ```
//!
//! Struct attributes: `name = "..."`, `id(field = "...")` and repeatable
//! `index(type = "unique|non-unique|full-text", fields = "a, b")`.
//! Field attributes: `#[entity(id)]` and `#[entity(unique)]`.
//!
//! The id field defaults to `id` and must be serialized as `_id`. Unique fields
//! are indexed under their serialized name, so `#[serde(rename)]` and the
//! struct's `#[serde(rename_all)]` are honoured.

extern crate proc_macro;
mod mongo_entity;
mod rename_rule;

use crate::mongo_entity::generate_entity_for_struct;
use proc_macro::TokenStream;
use syn::{Data, DeriveInput};

#[proc_macro_derive(MongoEntity, attributes(entity))]
pub fn derive_mongo_entity(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);

    match ast.data {
        Data::Struct(ref data) => match generate_entity_for_struct(&ast, data) {
            Ok(token_stream) => token_stream,
            Err(e) => e.to_compile_error().into(),
        },
        Data::Enum(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive MongoEntity for enums. Only structs are supported.",
            );
            error.to_compile_error().into()
        }
        Data::Union(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive MongoEntity for unions. Only structs are supported.",
            );
            error.to_compile_error().into()
        }
    }
}
