//! UPDATE builder.

use std::marker::PhantomData;
use std::sync::Arc;

use super::draft::{Draft, join_methods, where_methods};
use super::stage::{Filtering, Joining, Setting, Start};
use crate::config::BuilderConfig;
use crate::error::{BuildResult, QueryError, StatementKind};
use crate::ident::bracket;
use crate::table::{Project, Table};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Joining {}
    impl Sealed for super::Setting {}
    impl Sealed for super::Filtering {}
}

/// Stages that accept `set`.
pub trait AcceptsSet: sealed::Sealed {}
/// Stages that accept WHERE predicates.
pub trait AcceptsWhere: sealed::Sealed {}

impl AcceptsSet for Joining {}
impl AcceptsSet for Setting {}
impl AcceptsWhere for Setting {}
impl AcceptsWhere for Filtering {}

/// Staged UPDATE builder for table `T`.
///
/// Renders `UPDATE [alias] SET ... FROM [Table] [alias] <joins> WHERE ...`.
#[derive(Debug, Clone)]
pub struct UpdateQuery<T, S> {
    core: Draft,
    sets: Vec<String>,
    _marker: PhantomData<fn() -> (T, S)>,
}

impl<T, S> UpdateQuery<T, S> {
    fn retarget<U, N>(self) -> UpdateQuery<U, N> {
        UpdateQuery {
            core: self.core,
            sets: self.sets,
            _marker: PhantomData,
        }
    }

    fn into_stage<N>(self) -> UpdateQuery<T, N> {
        self.retarget()
    }

    pub fn errors(&self) -> &[QueryError] {
        self.core.translator().errors()
    }
}

impl Default for UpdateQuery<(), Start> {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateQuery<(), Start> {
    pub fn new() -> Self {
        Self::from_draft(Draft::with_config(Arc::new(BuilderConfig::default())))
    }

    pub(crate) fn from_draft(core: Draft) -> Self {
        Self {
            core,
            sets: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn from<T: Table>(mut self) -> UpdateQuery<T, Joining> {
        self.core.bind_target::<T>(None);
        self.retarget()
    }

    pub fn from_as<T: Table>(mut self, alias: &str) -> UpdateQuery<T, Joining> {
        self.core.bind_target::<T>(Some(alias));
        self.retarget()
    }
}

impl<T: Table> UpdateQuery<T, Joining> {
    join_methods!();
}

impl<T: Table, S: AcceptsSet> UpdateQuery<T, S> {
    /// `column = value`; `value` is emitted verbatim.
    pub fn set<P>(mut self, projection: P, value: impl Into<String>) -> UpdateQuery<T, Setting>
    where
        P: Project<Table = T>,
    {
        let sets = &mut self.sets;
        self.core.apply(|core| {
            let column = core.translator_mut().require_first(&projection.field_ref(), "set")?;
            sets.push(format!("{column} = {}", value.into()));
            Ok(())
        });
        self.into_stage()
    }
}

impl<T: Table, S: AcceptsWhere> UpdateQuery<T, S> {
    where_methods!(UpdateQuery<T, Filtering>);
}

impl<T: Table, S> UpdateQuery<T, S> {
    pub fn try_build(&self) -> BuildResult {
        self.core.finish(
            StatementKind::Update,
            || {
                if self.sets.is_empty() {
                    vec![QueryError::MissingSet]
                } else {
                    Vec::new()
                }
            },
            || self.render(),
        )
    }

    fn render(&self) -> String {
        let (table, alias) = match self.core.target() {
            Some(binding) => (bracket(binding.table.name), bracket(&binding.alias)),
            None => (bracket(T::TABLE), bracket(T::TABLE)),
        };
        format!(
            "UPDATE {alias} SET {} FROM {table} {alias}{}{}",
            self.sets.join(", "),
            self.core.joins_sql(),
            self.core.where_sql()
        )
    }
}
