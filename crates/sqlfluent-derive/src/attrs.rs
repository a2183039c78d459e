//! `#[sql(...)]` attribute parsing.

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta, Result, Token};

/// How field names map to column names.
#[derive(Clone, Copy, Default)]
pub(crate) enum RenameRule {
    #[default]
    PascalCase,
    SnakeCase,
    CamelCase,
    Verbatim,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> Result<Self> {
        match lit.value().as_str() {
            "PascalCase" => Ok(Self::PascalCase),
            "snake_case" => Ok(Self::SnakeCase),
            "camelCase" => Ok(Self::CamelCase),
            "verbatim" => Ok(Self::Verbatim),
            other => Err(syn::Error::new(
                lit.span(),
                format!(
                    "unknown rename_all rule '{other}' (expected PascalCase, snake_case, camelCase or verbatim)"
                ),
            )),
        }
    }

    pub(crate) fn apply(self, field: &str) -> String {
        match self {
            Self::PascalCase => field.to_upper_camel_case(),
            Self::SnakeCase => field.to_snake_case(),
            Self::CamelCase => field.to_lower_camel_case(),
            Self::Verbatim => field.to_string(),
        }
    }
}

#[derive(Default)]
pub(crate) struct TableAttrs {
    pub(crate) table: Option<LitStr>,
    pub(crate) rename_all: RenameRule,
}

#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub(crate) column: Option<LitStr>,
    pub(crate) skip: bool,
}

fn sql_metas(attrs: &[Attribute]) -> Result<Vec<Meta>> {
    let mut metas = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("sql") {
            continue;
        }
        let nested = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        metas.extend(nested);
    }
    Ok(metas)
}

fn str_value<'a>(meta: &'a Meta, key: &str) -> Result<&'a LitStr> {
    if let Meta::NameValue(nv) = meta {
        if let Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) = &nv.value
        {
            return Ok(s);
        }
    }
    Err(syn::Error::new_spanned(
        meta,
        format!("expected `{key} = \"...\"`"),
    ))
}

pub(crate) fn parse_table_attrs(attrs: &[Attribute]) -> Result<TableAttrs> {
    let mut out = TableAttrs::default();
    for meta in sql_metas(attrs)? {
        if meta.path().is_ident("table") {
            out.table = Some(str_value(&meta, "table")?.clone());
        } else if meta.path().is_ident("rename_all") {
            out.rename_all = RenameRule::parse(str_value(&meta, "rename_all")?)?;
        } else {
            return Err(syn::Error::new_spanned(
                &meta,
                "unknown #[sql] struct attribute (expected `table` or `rename_all`)",
            ));
        }
    }
    Ok(out)
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for meta in sql_metas(attrs)? {
        if meta.path().is_ident("column") {
            out.column = Some(str_value(&meta, "column")?.clone());
        } else if meta.path().is_ident("skip") {
            if !matches!(meta, Meta::Path(_)) {
                return Err(syn::Error::new_spanned(&meta, "`skip` takes no value"));
            }
            out.skip = true;
        } else {
            return Err(syn::Error::new_spanned(
                &meta,
                "unknown #[sql] field attribute (expected `column` or `skip`)",
            ));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn rename_rules() {
        assert_eq!(RenameRule::PascalCase.apply("model_year"), "ModelYear");
        assert_eq!(RenameRule::SnakeCase.apply("model_year"), "model_year");
        assert_eq!(RenameRule::CamelCase.apply("model_year"), "modelYear");
        assert_eq!(RenameRule::Verbatim.apply("model_year"), "model_year");
    }

    #[test]
    fn table_attrs() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[sql(table = "Cars", rename_all = "snake_case")])];
        let parsed = parse_table_attrs(&attrs).unwrap();
        assert_eq!(parsed.table.unwrap().value(), "Cars");
        assert!(matches!(parsed.rename_all, RenameRule::SnakeCase));
    }

    #[test]
    fn field_attrs() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[sql(column = "Km")])];
        let parsed = parse_field_attrs(&attrs).unwrap();
        assert_eq!(parsed.column.unwrap().value(), "Km");
        assert!(!parsed.skip);

        let attrs: Vec<Attribute> = vec![parse_quote!(#[sql(skip)])];
        assert!(parse_field_attrs(&attrs).unwrap().skip);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[sql(primary_key)])];
        assert!(parse_field_attrs(&attrs).is_err());
        let attrs: Vec<Attribute> = vec![parse_quote!(#[sql(rename_all = "SHOUTY")])];
        assert!(parse_table_attrs(&attrs).is_err());
    }

    #[test]
    fn other_attributes_are_ignored() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(rename = "x")])];
        let parsed = parse_field_attrs(&attrs).unwrap();
        assert!(parsed.column.is_none());
    }
}
