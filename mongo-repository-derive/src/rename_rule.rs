use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Lit, LitStr, Meta, Result, Token};

/// Case conversion applied by `#[serde(rename_all = "...")]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    pub(crate) fn from_lit(lit: &LitStr) -> Result<RenameRule> {
        let rule = match lit.value().as_str() {
            "lowercase" => RenameRule::Lower,
            "UPPERCASE" => RenameRule::Upper,
            "PascalCase" => RenameRule::Pascal,
            "camelCase" => RenameRule::Camel,
            "snake_case" => RenameRule::Snake,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnake,
            "kebab-case" => RenameRule::Kebab,
            "SCREAMING-KEBAB-CASE" => RenameRule::ScreamingKebab,
            other => {
                return Err(syn::Error::new_spanned(
                    lit,
                    format!("Unknown serde rename_all rule {}", other),
                ))
            }
        };
        Ok(rule)
    }

    /// Renames a snake_case field identifier the same way serde does.
    pub(crate) fn apply_to_field(&self, field: &str) -> String {
        match self {
            RenameRule::Lower | RenameRule::Snake => field.to_string(),
            RenameRule::Upper | RenameRule::ScreamingSnake => field.to_ascii_uppercase(),
            RenameRule::Pascal => {
                let mut pascal = String::with_capacity(field.len());
                let mut capitalize = true;
                for ch in field.chars() {
                    if ch == '_' {
                        capitalize = true;
                    } else if capitalize {
                        pascal.push(ch.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        pascal.push(ch);
                    }
                }
                pascal
            }
            RenameRule::Camel => {
                let pascal = RenameRule::Pascal.apply_to_field(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => pascal,
                }
            }
            RenameRule::Kebab => field.replace('_', "-"),
            RenameRule::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

/// Reads the serialize side of a `#[serde(key = "...")]` or
/// `#[serde(key(serialize = "..."))]` attribute.
pub(crate) fn serde_attribute(attrs: &[Attribute], key: &str) -> Result<Option<LitStr>> {
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        for meta in metas {
            match meta {
                Meta::NameValue(name_value) if name_value.path.is_ident(key) => {
                    if let Some(s) = lit_str(&name_value.value) {
                        return Ok(Some(s));
                    }
                }
                Meta::List(list) if list.path.is_ident(key) => {
                    let nested =
                        list.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
                    for inner in nested {
                        if let Meta::NameValue(name_value) = inner {
                            if name_value.path.is_ident("serialize") {
                                if let Some(s) = lit_str(&name_value.value) {
                                    return Ok(Some(s));
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
    Ok(None)
}

fn lit_str(expr: &Expr) -> Option<LitStr> {
    match expr {
        Expr::Lit(expr) => match &expr.lit {
            Lit::Str(s) => Some(s.clone()),
            _ => None,
        },
        _ => None,
    }
}
