//! Convenient imports for typical `sqlfluent` usage.
//!
//! ```ignore
//! use sqlfluent::prelude::*;
//! ```

pub use crate::{
    AggregateFn, BuildError, BuildResult, Column, DateDiffUnit, Project, QueryBuilderFactory,
    QueryError, SelectExpr, Table, WhereFactory, delete_from, delete_from_as, insert_into, op,
    select_from, select_from_as, update, update_as,
};
