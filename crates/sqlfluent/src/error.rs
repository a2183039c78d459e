//! Error types for sqlfluent

use std::fmt;
use thiserror::Error;

/// Result type alias for translation and predicate resolution.
pub type QueryResult<T> = Result<T, QueryError>;

/// Result type alias for a statement build.
pub type BuildResult = Result<String, BuildError>;

/// A single problem found while composing a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The alias is already bound in this statement.
    #[error("Duplicate alias '{alias}' (table {table})")]
    DuplicateAlias { alias: String, table: String },

    /// Table name or alias that cannot be written as an identifier.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// An explicit alias hint that no binding carries.
    #[error("Unknown alias '{alias}' for table {table}")]
    UnknownAlias { alias: String, table: String },

    /// An explicit alias hint bound to a different table.
    #[error("Alias '{alias}' is bound to {bound}, not {table}")]
    AliasTableMismatch {
        alias: String,
        table: String,
        bound: String,
    },

    /// No binding for the table and no alias hint given.
    #[error("Table {table} is not part of this statement")]
    UnresolvedTable { table: String },

    /// Several bindings for the table and no alias hint given.
    #[error("Table {table} is bound {count} times; an alias is required")]
    AmbiguousTable { table: String, count: usize },

    /// Projection is neither a field access nor a tuple of field accesses.
    #[error("Unsupported projection on {table}: {expression}")]
    UnsupportedProjection { table: String, expression: String },

    /// Column is not declared by the table.
    #[error("Unknown column {column} on {table}")]
    UnknownColumn { table: String, column: String },

    /// A clause that needs a column got an empty projection.
    #[error("Missing column for {context} on {table}")]
    MissingColumn { table: String, context: String },

    /// A comparison without an operator.
    #[error("Comparison is missing an operator")]
    MissingOperator,

    /// AND/OR group without conditions.
    #[error("Empty {0} condition group")]
    EmptyCondition(&'static str),

    /// INSERT value count differs from column count.
    #[error("INSERT has {columns} column(s) but {values} value(s)")]
    ArityMismatch { columns: usize, values: usize },

    /// Plain select item not covered by GROUP BY while aggregates are selected.
    #[error("Selected column {column} is not part of GROUP BY")]
    UngroupedColumn { column: String },

    /// Negative TOP.
    #[error("TOP must not be negative, got {0}")]
    InvalidTop(i64),

    /// SELECT without any select item.
    #[error("SELECT has no columns")]
    MissingSelect,

    /// UPDATE without any SET item.
    #[error("UPDATE has no SET clause")]
    MissingSet,
}

impl QueryError {
    /// Create a duplicate alias error.
    pub fn duplicate_alias(alias: impl Into<String>, table: impl Into<String>) -> Self {
        Self::DuplicateAlias {
            alias: alias.into(),
            table: table.into(),
        }
    }

    /// Create a missing column error.
    pub fn missing_column(table: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingColumn {
            table: table.into(),
            context: context.into(),
        }
    }

    /// Check if this error comes from alias/table resolution.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Self::DuplicateAlias { .. }
                | Self::UnknownAlias { .. }
                | Self::AliasTableMismatch { .. }
                | Self::UnresolvedTable { .. }
                | Self::AmbiguousTable { .. }
        )
    }

    /// Check if this error was raised by final statement validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ArityMismatch { .. }
                | Self::UngroupedColumn { .. }
                | Self::InvalidTop(_)
                | Self::MissingSelect
                | Self::MissingSet
        )
    }
}

/// Statement kinds produced by the builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        })
    }
}

/// Returned by `try_build` when the composed statement is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind} statement: {}", join_diagnostics(.diagnostics))]
pub struct BuildError {
    pub kind: StatementKind,
    pub diagnostics: Vec<QueryError>,
}

impl BuildError {
    pub fn new(kind: StatementKind, diagnostics: Vec<QueryError>) -> Self {
        Self { kind, diagnostics }
    }

    /// Check whether any diagnostic matches the predicate.
    pub fn has(&self, pred: impl Fn(&QueryError) -> bool) -> bool {
        self.diagnostics.iter().any(pred)
    }
}

fn join_diagnostics(diagnostics: &[QueryError]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse builder config: {0}")]
    Parse(#[from] toml::de::Error),
}
