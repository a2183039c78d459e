//! Builder configuration and the configured builder factory.

use std::sync::Arc;

use serde::Deserialize;

use crate::builder::draft::Draft;
use crate::builder::stage::Start;
use crate::builder::{DeleteQuery, InsertQuery, SelectQuery, UpdateQuery};
use crate::error::ConfigError;
use crate::resolver::{FieldResolver, ProjectionResolver, SchemaResolver};

/// Which projection resolver builders use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Trust column names as declared on the projection.
    #[default]
    Fields,
    /// Also check names against the table's declared columns.
    Schema,
}

impl ResolverKind {
    pub fn resolver(self) -> Arc<dyn ProjectionResolver> {
        match self {
            Self::Fields => Arc::new(FieldResolver),
            Self::Schema => Arc::new(SchemaResolver),
        }
    }
}

/// Level of the event emitted for each built statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
}

#[cfg(feature = "tracing")]
impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Configuration shared by the builders of a [`QueryBuilderFactory`].
///
/// Every field has a default, so a TOML document only needs the keys it
/// overrides:
///
/// ```
/// use sqlfluent::{BuilderConfig, ResolverKind};
///
/// let config = BuilderConfig::from_toml_str(r#"
///     resolver = "schema"
///     max_sql_length = 80
/// "#)?;
/// assert_eq!(config.resolver, ResolverKind::Schema);
/// assert_eq!(config.max_sql_length, Some(80));
/// assert!(config.log_sql);
/// # Ok::<(), sqlfluent::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub resolver: ResolverKind,
    /// Emit an event for every successfully built statement.
    pub log_sql: bool,
    pub log_level: LogLevel,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverKind::Fields,
            log_sql: true,
            log_level: LogLevel::Debug,
            max_sql_length: Some(200),
        }
    }
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_resolver(mut self, resolver: ResolverKind) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub fn enable_sql_logging(mut self) -> Self {
        self.log_sql = true;
        self
    }

    pub fn disable_sql_logging(mut self) -> Self {
        self.log_sql = false;
        self
    }
}

/// Creates builders that share one configuration and resolver.
///
/// ```
/// use sqlfluent::{BuilderConfig, QueryBuilderFactory, Table};
///
/// struct Car;
/// impl Table for Car {
///     const TABLE: &'static str = "Car";
/// }
///
/// let factory = QueryBuilderFactory::new(BuilderConfig::new().disable_sql_logging());
/// let sql = factory
///     .select()
///     .from_as::<Car>("c")
///     .select_all::<Car>()
///     .try_build()?;
/// assert_eq!(sql, "SELECT [c].* FROM [Car] AS [c]");
/// # Ok::<(), sqlfluent::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilderFactory {
    config: Arc<BuilderConfig>,
    resolver: Arc<dyn ProjectionResolver>,
}

impl Default for QueryBuilderFactory {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl QueryBuilderFactory {
    pub fn new(config: BuilderConfig) -> Self {
        let resolver = config.resolver.resolver();
        Self {
            config: Arc::new(config),
            resolver,
        }
    }

    /// Replace the resolver picked by the configuration.
    pub fn with_resolver(mut self, resolver: Arc<dyn ProjectionResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    fn draft(&self) -> Draft {
        Draft::new(Arc::clone(&self.config), Arc::clone(&self.resolver))
    }

    pub fn select(&self) -> SelectQuery<Start> {
        SelectQuery::from_draft(self.draft())
    }

    pub fn insert(&self) -> InsertQuery<Start> {
        InsertQuery::from_draft(self.draft())
    }

    pub fn update(&self) -> UpdateQuery<(), Start> {
        UpdateQuery::from_draft(self.draft())
    }

    pub fn delete(&self) -> DeleteQuery<Start> {
        DeleteQuery::from_draft(self.draft())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.resolver, ResolverKind::Fields);
        assert!(config.log_sql);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.max_sql_length, Some(200));
    }

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(BuilderConfig::from_toml_str("").unwrap(), BuilderConfig::default());
    }

    #[test]
    fn toml_overrides() {
        let config = BuilderConfig::from_toml_str(
            r#"
            resolver = "schema"
            log_sql = false
            log_level = "info"
            "#,
        )
        .unwrap();
        assert_eq!(config.resolver, ResolverKind::Schema);
        assert!(!config.log_sql);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.max_sql_length, Some(200));
    }

    #[test]
    fn toml_rejects_unknown_resolver() {
        let err = BuilderConfig::from_toml_str(r#"resolver = "magic""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn builder_methods() {
        let config = BuilderConfig::new()
            .with_resolver(ResolverKind::Schema)
            .with_log_level(LogLevel::Trace)
            .with_max_sql_length(10)
            .disable_sql_logging();
        assert_eq!(config.resolver, ResolverKind::Schema);
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.max_sql_length, Some(10));
        assert!(!config.log_sql);
        assert_eq!(config.no_truncate().max_sql_length, None);
    }
}
