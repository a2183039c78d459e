//! # sqlfluent
//!
//! A staged, typed SQL text builder.
//!
//! ## Features
//!
//! - **Typed fields**: tables and columns are Rust values (`#[derive(Table)]`),
//!   so a typo in a column name is a compile error
//! - **Staged builders**: only the calls valid at each point of a statement
//!   are available (`from → join → select → where → group_by → order_by`)
//! - **Bracket-quoted identifiers**: every table, alias and column is written
//!   as `[name]`
//! - **Alias checking**: duplicate, unknown and ambiguous aliases fail the build
//! - **No silent failures**: `try_build()` returns every recorded diagnostic
//! - **Text only**: no connections, no execution, no parameter binding;
//!   literals and placeholders such as `@brand` pass through verbatim
//!
//! ## Example
//!
//! ```ignore
//! use sqlfluent::prelude::*;
//!
//! #[derive(Table)]
//! struct Car {
//!     id: i32,
//!     maker_id: i32,
//!     mileage: i32,
//! }
//!
//! #[derive(Table)]
//! struct Maker {
//!     id: i32,
//!     name: String,
//! }
//!
//! let sql = select_from::<Car>()
//!     .join(Car::MAKER_ID, Maker::ID)
//!     .select_all::<Car>()
//!     .where_(|c| c.compare(Maker::NAME).with(op::EQ, "@brand"))
//!     .try_build()?;
//!
//! assert_eq!(
//!     sql,
//!     "SELECT [Car].* FROM [Car] JOIN [Maker] ON [Car].[MakerId] = [Maker].[Id] \
//!      WHERE (([Maker].[Name]) = (@brand))"
//! );
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod ident;
pub mod predicate;
pub mod prelude;
pub mod registry;
pub mod resolver;
pub mod select_expr;
pub mod table;
pub mod translator;

mod trace;

#[cfg(test)]
mod testing;

pub use builder::{
    DeleteQuery, InsertQuery, JoinKind, SelectItem, SelectQuery, UpdateQuery, delete_from,
    delete_from_as, insert_into, select_from, select_from_as, update, update_as,
};
pub use config::{BuilderConfig, LogLevel, QueryBuilderFactory, ResolverKind};
pub use error::{BuildError, BuildResult, ConfigError, QueryError, QueryResult, StatementKind};
pub use ident::Ident;
pub use predicate::{Compare, CompareWith, Comparator, Operand, WhereBuilder, WhereFactory, op};
pub use registry::{Registry, TableBinding};
pub use resolver::{FieldResolver, ProjectionResolver, SchemaResolver};
pub use select_expr::{AggregateFn, DateDiffUnit, SelectExpr};
pub use table::{Aliased, All, Column, Expression, FieldRef, Project, Projection, Table, TableRef};
pub use translator::Translator;

#[cfg(feature = "derive")]
pub use sqlfluent_derive::Table;
