//! INSERT builder.

use std::marker::PhantomData;
use std::sync::Arc;

use super::draft::Draft;
use super::stage::{Columns, Start, Values};
use crate::config::BuilderConfig;
use crate::error::{BuildResult, QueryError, StatementKind};
use crate::table::Project;

/// Staged INSERT builder: `insert_into(columns).values(literals)`.
///
/// Values are emitted verbatim, positionally matched to the columns.
#[derive(Debug, Clone)]
pub struct InsertQuery<S> {
    core: Draft,
    columns: Vec<String>,
    values: Vec<String>,
    _stage: PhantomData<S>,
}

impl<S> InsertQuery<S> {
    fn into_stage<N>(self) -> InsertQuery<N> {
        InsertQuery {
            core: self.core,
            columns: self.columns,
            values: self.values,
            _stage: PhantomData,
        }
    }

    pub fn errors(&self) -> &[QueryError] {
        self.core.translator().errors()
    }
}

impl Default for InsertQuery<Start> {
    fn default() -> Self {
        Self::new()
    }
}

impl InsertQuery<Start> {
    pub fn new() -> Self {
        Self::from_draft(Draft::with_config(Arc::new(BuilderConfig::default())))
    }

    pub(crate) fn from_draft(core: Draft) -> Self {
        Self {
            core,
            columns: Vec::new(),
            values: Vec::new(),
            _stage: PhantomData,
        }
    }

    /// Bind the projection's table under its own name and resolve the
    /// target columns; at least one column is required.
    pub fn insert_into<P: Project>(mut self, columns: P) -> InsertQuery<Columns> {
        self.core.bind_target::<P::Table>(None);
        let target = &mut self.columns;
        self.core.apply(|core| {
            let field = columns.field_ref();
            let resolved = core.translator_mut().qualify_projection(&field)?;
            if resolved.is_empty() {
                return Err(QueryError::missing_column(field.table.name, "insert"));
            }
            *target = resolved;
            Ok(())
        });
        self.into_stage()
    }
}

impl InsertQuery<Columns> {
    pub fn values<I>(mut self, values: I) -> InsertQuery<Values>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        if !self.core.translator().has_error() {
            self.values = values.into_iter().map(Into::into).collect();
        }
        self.into_stage()
    }
}

impl InsertQuery<Values> {
    pub fn try_build(&self) -> BuildResult {
        self.core.finish(
            StatementKind::Insert,
            || {
                if self.values.len() == self.columns.len() {
                    Vec::new()
                } else {
                    vec![QueryError::ArityMismatch {
                        columns: self.columns.len(),
                        values: self.values.len(),
                    }]
                }
            },
            || {
                format!(
                    "INSERT INTO {} ({}) VALUES ({})",
                    self.core.target_clause(),
                    self.columns.join(", "),
                    self.values.join(", ")
                )
            },
        )
    }
}
