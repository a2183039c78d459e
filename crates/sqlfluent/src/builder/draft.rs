//! Draft state shared by every statement builder.

use std::sync::Arc;

use crate::config::BuilderConfig;
use crate::error::{BuildError, BuildResult, QueryError, QueryResult, StatementKind};
use crate::ident::bracket;
use crate::predicate::WhereBuilder;
use crate::registry::TableBinding;
use crate::resolver::ProjectionResolver;
use crate::table::{Project, Table, TableRef};
use crate::trace;
use crate::translator::Translator;

/// Join flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    FullOuter,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::FullOuter => "FULL OUTER JOIN",
        }
    }
}

/// Translator, FROM binding, joins and WHERE fragments of one statement.
#[derive(Debug, Clone)]
pub(crate) struct Draft {
    translator: Translator,
    config: Arc<BuilderConfig>,
    target: Option<TableBinding>,
    joins: Vec<String>,
    wheres: Vec<String>,
}

impl Draft {
    pub(crate) fn new(config: Arc<BuilderConfig>, resolver: Arc<dyn ProjectionResolver>) -> Self {
        Self {
            translator: Translator::with_resolver(resolver),
            config,
            target: None,
            joins: Vec::new(),
            wheres: Vec::new(),
        }
    }

    pub(crate) fn with_config(config: Arc<BuilderConfig>) -> Self {
        let resolver = config.resolver.resolver();
        Self::new(config, resolver)
    }

    pub(crate) fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Run a stage call unless an error is already recorded.
    ///
    /// An error returned by `f` that the translator did not record yet is
    /// recorded here, so the statement stays failed.
    pub(crate) fn apply(&mut self, f: impl FnOnce(&mut Self) -> QueryResult<()>) {
        if self.translator.has_error() {
            return;
        }
        if let Err(err) = f(self) {
            if !self.translator.has_error() {
                self.translator.fail(err);
            }
        }
    }

    pub(crate) fn translator_mut(&mut self) -> &mut Translator {
        &mut self.translator
    }

    /// Bind the statement's target table (FROM, INTO, UPDATE, DELETE FROM).
    pub(crate) fn bind_target<T: Table>(&mut self, alias: Option<&str>) {
        let alias = alias.unwrap_or(T::TABLE);
        if self.translator.register::<T>(Some(alias)) {
            self.target = self.translator.binding(alias).cloned();
        }
    }

    pub(crate) fn target(&self) -> Option<&TableBinding> {
        self.target.as_ref()
    }

    /// `[Table]`, or `[Table] AS [alias]` when aliased.
    pub(crate) fn target_clause(&self) -> String {
        self.target.as_ref().map(table_clause).unwrap_or_default()
    }

    /// Register `key2`'s table and append `<KIND> JOIN ... ON key1 = key2`.
    ///
    /// The new binding's alias is `key2`'s alias hint or its table name.
    /// Both keys are qualified after the binding exists, so an unhinted
    /// `key1` on a self-joined table is ambiguous.
    pub(crate) fn push_join<K1: Project, K2: Project>(&mut self, kind: JoinKind, key1: K1, key2: K2) {
        self.apply(|core| {
            let table = TableRef::of::<K2::Table>();
            let alias = key2.alias_hint().unwrap_or(table.name).to_string();
            if !core.translator.add_table(table, &alias) {
                return Ok(());
            }

            let left = core.translator.require_first(&key1.field_ref(), "join")?;
            let mut right_ref = key2.field_ref();
            right_ref.alias_hint = Some(alias.clone());
            let right = core.translator.require_first(&right_ref, "join")?;

            let binding = TableBinding { alias, table };
            core.joins.push(format!(
                "{} {} ON {left} = {right}",
                kind.keyword(),
                table_clause(&binding)
            ));
            Ok(())
        });
    }

    /// Resolve a predicate and append it to the WHERE list.
    pub(crate) fn push_where(&mut self, predicate: WhereBuilder) {
        self.apply(|core| {
            let clause = predicate.try_build(&mut core.translator)?;
            core.wheres.push(clause);
            Ok(())
        });
    }

    /// ` <join> <join>`, empty when there are no joins.
    pub(crate) fn joins_sql(&self) -> String {
        self.joins.iter().map(|j| format!(" {j}")).collect()
    }

    /// ` WHERE p1 AND p2`, empty when there are no predicates.
    pub(crate) fn where_sql(&self) -> String {
        if self.wheres.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.wheres.join(" AND "))
        }
    }

    /// Final gate shared by all statement kinds.
    ///
    /// Recorded errors short-circuit `validate`; otherwise every validation
    /// failure is reported. `render` runs only for a clean statement.
    pub(crate) fn finish(
        &self,
        kind: StatementKind,
        validate: impl FnOnce() -> Vec<QueryError>,
        render: impl FnOnce() -> String,
    ) -> BuildResult {
        let diagnostics = if self.translator.has_error() {
            self.translator.errors().to_vec()
        } else {
            validate()
        };
        if !diagnostics.is_empty() {
            let err = BuildError::new(kind, diagnostics);
            trace::statement_rejected(&err);
            return Err(err);
        }

        let sql = render();
        trace::statement_built(&self.config, kind, &sql);
        Ok(sql)
    }
}

fn table_clause(binding: &TableBinding) -> String {
    let table = bracket(binding.table.name);
    if binding.is_aliased() {
        format!("{table} AS {}", bracket(&binding.alias))
    } else {
        table
    }
}

/// Generates the join stage calls for a builder with a `core` field.
macro_rules! join_methods {
    () => {
        /// Inner join on `key1 = key2`.
        ///
        /// `key2`'s alias hint (see [`Project::of`](crate::Project::of)) or
        /// its table name becomes the alias of the joined table.
        pub fn join<K1: $crate::Project, K2: $crate::Project>(self, key1: K1, key2: K2) -> Self {
            self.join_kind($crate::JoinKind::Inner, key1, key2)
        }

        pub fn left_join<K1: $crate::Project, K2: $crate::Project>(self, key1: K1, key2: K2) -> Self {
            self.join_kind($crate::JoinKind::Left, key1, key2)
        }

        pub fn right_join<K1: $crate::Project, K2: $crate::Project>(self, key1: K1, key2: K2) -> Self {
            self.join_kind($crate::JoinKind::Right, key1, key2)
        }

        pub fn full_outer_join<K1: $crate::Project, K2: $crate::Project>(self, key1: K1, key2: K2) -> Self {
            self.join_kind($crate::JoinKind::FullOuter, key1, key2)
        }

        pub fn join_kind<K1: $crate::Project, K2: $crate::Project>(
            mut self,
            kind: $crate::JoinKind,
            key1: K1,
            key2: K2,
        ) -> Self {
            self.core.push_join(kind, key1, key2);
            self
        }
    };
}

/// Generates `where_` and `where_factory` for a builder with a `core` field
/// and an `into_stage` conversion.
macro_rules! where_methods {
    ($out:ty) => {
        /// Add a comparison; predicates are joined with `AND`.
        pub fn where_(
            mut self,
            f: impl FnOnce($crate::Compare) -> $crate::Comparator,
        ) -> $out {
            self.core
                .push_where($crate::WhereBuilder::Compare(f($crate::Compare)));
            self.into_stage()
        }

        /// Add a composed predicate built with a [`WhereFactory`](crate::WhereFactory).
        pub fn where_factory(
            mut self,
            f: impl FnOnce(&$crate::WhereFactory) -> $crate::WhereBuilder,
        ) -> $out {
            self.core.push_where(f(&$crate::WhereFactory));
            self.into_stage()
        }
    };
}

pub(crate) use join_methods;
pub(crate) use where_methods;
