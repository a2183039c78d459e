//! `#[derive(Table)]` expansion.

use heck::ToShoutySnakeCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::{parse_field_attrs, parse_table_attrs};
use crate::sql_ident::{ColumnSet, parse_sql_ident_with_span};

struct ColumnInfo {
    const_ident: syn::Ident,
    column: String,
    field: String,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let vis = &input.vis;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Table cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Table can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Table can only be derived for structs",
            ));
        }
    };

    let table_attrs = parse_table_attrs(&input.attrs)?;
    let table_name = match &table_attrs.table {
        Some(lit) => parse_sql_ident_with_span(&lit.value(), lit.span(), "table name")?,
        None => name.unraw().to_string(),
    };

    let mut seen = ColumnSet::default();
    let mut columns = Vec::new();
    for field in fields {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        // Named fields always carry an ident.
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = ident.unraw().to_string();
        let column = match &attrs.column {
            Some(lit) => parse_sql_ident_with_span(&lit.value(), lit.span(), "column name")?,
            None => parse_sql_ident_with_span(
                &table_attrs.rename_all.apply(&field_name),
                ident.span(),
                "column name",
            )?,
        };
        seen.insert(&column, field.span())?;
        columns.push(ColumnInfo {
            const_ident: format_ident!("{}", field_name.to_shouty_snake_case(), span = ident.span()),
            column,
            field: field_name,
        });
    }

    let column_names = columns.iter().map(|c| &c.column);
    let consts = columns.iter().map(|c| {
        let ident = &c.const_ident;
        let column = &c.column;
        let doc = format!("Column `[{}]` (field `{}`).", column, c.field);
        quote! {
            #[doc = #doc]
            #vis const #ident: ::sqlfluent::Column<Self> = ::sqlfluent::Column::new(#column);
        }
    });

    Ok(quote! {
        impl ::sqlfluent::Table for #name {
            const TABLE: &'static str = #table_name;
            const COLUMNS: &'static [&'static str] = &[#(#column_names),*];
        }

        impl #name {
            #(#consts)*
        }
    })
}
