use proc_macro::TokenStream;
use quote::quote;
use crate::rename_rule::{serde_attribute, RenameRule};
use syn::ext::IdentExt;
use syn::{DataStruct, DeriveInput, Field, Fields, LitStr, Result};

const DOC_ID: &str = "_id";
const INDEX_TYPES: [&str; 3] = ["unique", "non-unique", "full-text"];

pub(crate) fn generate_entity_for_struct(
    ast: &DeriveInput,
    data: &DataStruct,
) -> Result<TokenStream> {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            ast,
            "Only structs with named fields are supported",
        ));
    };

    let rename_all = serde_attribute(&ast.attrs, "rename_all")?
        .map(|lit| RenameRule::from_lit(&lit))
        .transpose()?;

    let mut entity_name = name.to_string();
    let mut entity_id: Option<String> = None;
    let mut indexes: Vec<(String, Vec<String>)> = Vec::new();

    for attr in &ast.attrs {
        if attr.path().is_ident("entity") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value = meta.value()?;
                    let s: LitStr = value.parse()?;
                    entity_name = s.value();
                    Ok(())
                } else if meta.path.is_ident("id") {
                    if entity_id.is_some() {
                        return Err(meta.error("Multiple id attributes are not allowed"));
                    }

                    meta.parse_nested_meta(|meta| {
                        if meta.path.is_ident("field") {
                            let value = meta.value()?;
                            let s: LitStr = value.parse()?;
                            entity_id = Some(s.value());
                            Ok(())
                        } else {
                            Err(meta.error("Unknown id attribute"))
                        }
                    })
                } else if meta.path.is_ident("index") {
                    let mut index_type: Option<String> = None;
                    let mut index_fields: Option<Vec<String>> = None;

                    meta.parse_nested_meta(|meta| {
                        if meta.path.is_ident("type") {
                            let value = meta.value()?;
                            let s: LitStr = value.parse()?;
                            if !INDEX_TYPES.contains(&s.value().as_str()) {
                                return Err(syn::Error::new_spanned(
                                    &s,
                                    "Index type must be one of unique, non-unique, full-text",
                                ));
                            }
                            index_type = Some(s.value());
                            Ok(())
                        } else if meta.path.is_ident("fields") {
                            let value = meta.value()?;
                            let s: LitStr = value.parse()?;
                            let fields: Vec<String> = s
                                .value()
                                .split(',')
                                .map(|field| field.trim().to_string())
                                .filter(|field| !field.is_empty())
                                .collect();
                            if fields.is_empty() {
                                return Err(syn::Error::new_spanned(&s, "Index fields cannot be empty"));
                            }
                            index_fields = Some(fields);
                            Ok(())
                        } else {
                            Err(meta.error("Unknown index attribute"))
                        }
                    })
                    .and_then(|_| match index_fields {
                        Some(fields) => {
                            indexes.push((index_type.unwrap_or_else(|| "unique".to_string()), fields));
                            Ok(())
                        }
                        None => Err(meta.error("Index fields are required")),
                    })
                } else {
                    Err(meta.error("Unknown entity attribute"))
                }
            })?
        }
    }

    // field level markers
    let mut unique_fields: Vec<String> = Vec::new();
    for field in &named.named {
        let mut is_unique = false;
        let mut is_id = false;

        for attr in &field.attrs {
            if attr.path().is_ident("entity") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("unique") {
                        is_unique = true;
                        Ok(())
                    } else if meta.path.is_ident("id") {
                        is_id = true;
                        Ok(())
                    } else {
                        Err(meta.error("Unknown field attribute, expected `unique` or `id`"))
                    }
                })?;
            }
        }

        let ident = field.ident.as_ref().map(|i| i.to_string()).unwrap_or_default();
        if is_id {
            if entity_id.as_ref().is_some_and(|id| *id != ident) {
                return Err(syn::Error::new_spanned(field, "Multiple id fields are not allowed"));
            }
            entity_id = Some(ident.clone());
        }
        if is_unique {
            unique_fields.push(storage_name(field, rename_all)?);
        }
    }

    let id_field_name = entity_id.unwrap_or_else(|| "id".to_string());
    let Some(id_field) = named
        .named
        .iter()
        .find(|field| field.ident.as_ref().is_some_and(|ident| ident == &id_field_name))
    else {
        return Err(syn::Error::new_spanned(
            ast,
            format!("Field {} not found in struct", id_field_name),
        ));
    };

    if storage_name(id_field, rename_all)? != DOC_ID {
        return Err(syn::Error::new_spanned(
            id_field,
            format!(
                "Id field {} must be stored as _id, add #[serde(rename = \"_id\")]",
                id_field_name
            ),
        ));
    }
    let id_ident = &id_field.ident;

    let mut indexes_code: Vec<proc_macro2::TokenStream> = unique_fields
        .iter()
        .map(|field| {
            quote! {
                ::mongo_repository::repository::EntityIndex::new(vec![#field], Some("unique"))
            }
        })
        .collect();
    indexes_code.extend(indexes.iter().map(|(index_type, fields)| {
        let fields_code = fields.iter().map(|field| quote!(#field));
        quote! {
            ::mongo_repository::repository::EntityIndex::new(vec![#(#fields_code),*], Some(#index_type))
        }
    }));

    let gen = quote! {
        impl #impl_generics ::mongo_repository::repository::MongoEntity for #name #ty_generics #where_clause {
            fn entity_name() -> String {
                #entity_name.to_string()
            }

            fn entity_indexes() -> Vec<::mongo_repository::repository::EntityIndex> {
                vec![#(#indexes_code),*]
            }

            fn entity_id(&self) -> ::mongo_repository::document::DocumentId {
                ::core::convert::Into::into(::core::clone::Clone::clone(&self.#id_ident))
            }
        }
    };

    Ok(TokenStream::from(gen))
}

/// Name under which serde stores `field`: its own `rename`, else its identifier
/// under the container's `rename_all` rule.
fn storage_name(field: &Field, rename_all: Option<RenameRule>) -> Result<String> {
    if let Some(rename) = serde_attribute(&field.attrs, "rename")? {
        return Ok(rename.value());
    }

    let ident = field
        .ident
        .as_ref()
        .map(|ident| ident.unraw().to_string())
        .unwrap_or_default();
    Ok(match rename_all {
        Some(rule) => rule.apply_to_field(&ident),
        None => ident,
    })
}
