//! DELETE builder.

use std::marker::PhantomData;
use std::sync::Arc;

use super::draft::{Draft, join_methods, where_methods};
use super::stage::{Filtering, Joining, Start};
use crate::config::BuilderConfig;
use crate::error::{BuildResult, QueryError, StatementKind};
use crate::ident::bracket;
use crate::table::Table;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Joining {}
    impl Sealed for super::Filtering {}
}

/// Stages after `delete_from`.
pub trait Bound: sealed::Sealed {}

impl Bound for Joining {}
impl Bound for Filtering {}

/// Staged DELETE builder.
///
/// Renders `DELETE FROM [Table] [alias] <joins> WHERE ...`; the alias is
/// written only when it differs from the table name.
#[derive(Debug, Clone)]
pub struct DeleteQuery<S> {
    core: Draft,
    _stage: PhantomData<S>,
}

impl<S> DeleteQuery<S> {
    fn into_stage<N>(self) -> DeleteQuery<N> {
        DeleteQuery {
            core: self.core,
            _stage: PhantomData,
        }
    }

    pub fn errors(&self) -> &[QueryError] {
        self.core.translator().errors()
    }
}

impl Default for DeleteQuery<Start> {
    fn default() -> Self {
        Self::new()
    }
}

impl DeleteQuery<Start> {
    pub fn new() -> Self {
        Self::from_draft(Draft::with_config(Arc::new(BuilderConfig::default())))
    }

    pub(crate) fn from_draft(core: Draft) -> Self {
        Self {
            core,
            _stage: PhantomData,
        }
    }

    pub fn delete_from<T: Table>(mut self) -> DeleteQuery<Joining> {
        self.core.bind_target::<T>(None);
        self.into_stage()
    }

    pub fn delete_from_as<T: Table>(mut self, alias: &str) -> DeleteQuery<Joining> {
        self.core.bind_target::<T>(Some(alias));
        self.into_stage()
    }
}

impl DeleteQuery<Joining> {
    join_methods!();
}

impl<S: Bound> DeleteQuery<S> {
    where_methods!(DeleteQuery<Filtering>);

    /// Fails only on recorded errors.
    pub fn try_build(&self) -> BuildResult {
        self.core
            .finish(StatementKind::Delete, Vec::new, || self.render())
    }

    fn render(&self) -> String {
        let mut sql = String::from("DELETE FROM ");
        if let Some(binding) = self.core.target() {
            sql.push_str(&bracket(binding.table.name));
            if binding.is_aliased() {
                sql.push(' ');
                sql.push_str(&bracket(&binding.alias));
            }
        }
        sql.push_str(&self.core.joins_sql());
        sql.push_str(&self.core.where_sql());
        sql
    }
}
