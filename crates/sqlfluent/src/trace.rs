//! `tracing` events for built and rejected statements.
//!
//! Enable via the crate feature: `sqlfluent = { features = ["tracing"] }`
//! (on by default). Without it every function here is a no-op.

use crate::config::BuilderConfig;
use crate::error::{BuildError, QueryError, StatementKind};

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn display_sql(sql: &str, max_sql_length: Option<usize>) -> String {
    match max_sql_length {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}

/// Emit the built SQL on target `sqlfluent.sql` at the configured level.
#[cfg(feature = "tracing")]
pub(crate) fn statement_built(config: &BuilderConfig, kind: StatementKind, sql: &str) {
    use tracing::Level;

    /// Dispatch a tracing event at a runtime-determined level.
    macro_rules! emit_at_level {
        ($level:expr, $($field:tt)*) => {
            match $level {
                Level::ERROR => tracing::error!($($field)*),
                Level::WARN  => tracing::warn!($($field)*),
                Level::INFO  => tracing::info!($($field)*),
                Level::DEBUG => tracing::debug!($($field)*),
                Level::TRACE => tracing::trace!($($field)*),
            }
        };
    }

    if !config.log_sql {
        return;
    }
    let sql = display_sql(sql, config.max_sql_length);
    emit_at_level!(
        Level::from(config.log_level),
        target: "sqlfluent.sql",
        statement = %kind,
        sql = %sql,
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn statement_built(_config: &BuilderConfig, _kind: StatementKind, _sql: &str) {}

#[cfg(feature = "tracing")]
pub(crate) fn statement_rejected(err: &BuildError) {
    tracing::debug!(
        target: "sqlfluent.sql",
        statement = %err.kind,
        diagnostics = err.diagnostics.len(),
        error = %err,
        "statement rejected"
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn statement_rejected(_err: &BuildError) {}

#[cfg(feature = "tracing")]
pub(crate) fn error_recorded(err: &QueryError) {
    tracing::trace!(target: "sqlfluent.registry", error = %err, "error recorded");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn error_recorded(_err: &QueryError) {}
