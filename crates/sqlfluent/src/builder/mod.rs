//! Staged statement builders.
//!
//! Each builder is a single draft struct tagged with a phantom stage marker.
//! Stage calls consume the builder and return it in the next stage, so only
//! the calls that are valid at that point of the statement are available:
//!
//! ```text
//! SELECT  from → join* → top? → select+ → where* → group_by* → order_by* → try_build
//! INSERT  insert_into → values → try_build
//! UPDATE  from → join* → set+ → where* → try_build
//! DELETE  delete_from → join* → where* → try_build
//! ```
//!
//! Every stage call qualifies its fields through the statement's
//! [`Translator`](crate::Translator). The first failure is recorded and turns
//! all later stage calls into no-ops; `try_build` then returns the recorded
//! diagnostics.

pub(crate) mod draft;
pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

pub use draft::JoinKind;
pub use delete::DeleteQuery;
pub use insert::InsertQuery;
pub use select::{SelectItem, SelectQuery};
pub use update::UpdateQuery;

use crate::table::{Project, Table};

/// Stage markers.
pub mod stage {
    /// Nothing bound yet.
    #[derive(Debug, Clone, Copy)]
    pub struct Start;
    /// Target bound; joins allowed.
    #[derive(Debug, Clone, Copy)]
    pub struct Joining;
    /// `TOP` given; a select item must follow.
    #[derive(Debug, Clone, Copy)]
    pub struct Topped;
    /// At least one select item.
    #[derive(Debug, Clone, Copy)]
    pub struct Selecting;
    #[derive(Debug, Clone, Copy)]
    pub struct Filtering;
    #[derive(Debug, Clone, Copy)]
    pub struct Grouping;
    #[derive(Debug, Clone, Copy)]
    pub struct Ordering;
    /// INSERT columns given.
    #[derive(Debug, Clone, Copy)]
    pub struct Columns;
    /// INSERT values given.
    #[derive(Debug, Clone, Copy)]
    pub struct Values;
    /// At least one UPDATE assignment.
    #[derive(Debug, Clone, Copy)]
    pub struct Setting;
}

/// `SELECT ... FROM [T]`.
pub fn select_from<T: Table>() -> SelectQuery<stage::Joining> {
    SelectQuery::new().from::<T>()
}

/// `SELECT ... FROM [T] AS [alias]`.
pub fn select_from_as<T: Table>(alias: &str) -> SelectQuery<stage::Joining> {
    SelectQuery::new().from_as::<T>(alias)
}

/// `INSERT INTO [T] (columns)`.
pub fn insert_into<P: Project>(columns: P) -> InsertQuery<stage::Columns> {
    InsertQuery::new().insert_into(columns)
}

/// `UPDATE [T]`.
pub fn update<T: Table>() -> UpdateQuery<T, stage::Joining> {
    UpdateQuery::new().from::<T>()
}

/// `UPDATE [alias] ... FROM [T] [alias]`.
pub fn update_as<T: Table>(alias: &str) -> UpdateQuery<T, stage::Joining> {
    UpdateQuery::new().from_as::<T>(alias)
}

/// `DELETE FROM [T]`.
pub fn delete_from<T: Table>() -> DeleteQuery<stage::Joining> {
    DeleteQuery::new().delete_from::<T>()
}

/// `DELETE FROM [T] [alias]`.
pub fn delete_from_as<T: Table>(alias: &str) -> DeleteQuery<stage::Joining> {
    DeleteQuery::new().delete_from_as::<T>(alias)
}
