//! Derive macros for sqlfluent
//!
//! Provides `#[derive(Table)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod sql_ident;
mod table;

/// Derive `Table` and one typed column constant per field.
///
/// # Example
///
/// ```ignore
/// use sqlfluent::Table;
///
/// #[derive(Table)]
/// #[sql(table = "Car")]
/// struct Car {
///     id: i32,
///     model_year: i32,
///     #[sql(column = "Km")]
///     mileage: i32,
///     #[sql(skip)]
///     cached_label: String,
/// }
///
/// // Car::ID, Car::MODEL_YEAR, Car::MILEAGE: Column<Car>
/// ```
///
/// # Generated
///
/// - `impl Table` with `TABLE` and `COLUMNS`
/// - `const FIELD_NAME: Column<Self>` for every field not marked `skip`
///
/// # Attributes
///
/// - `#[sql(table = "Name")]` - Table name (default: struct name)
/// - `#[sql(rename_all = "...")]` - Column naming for fields without an explicit
///   column: `PascalCase` (default), `snake_case`, `camelCase` or `verbatim`
/// - `#[sql(column = "Name")]` - Map field to a different column name
/// - `#[sql(skip)]` - Field is not a column
#[proc_macro_derive(Table, attributes(sql))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    table::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
