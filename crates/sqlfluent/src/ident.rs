//! Bracket-quoted SQL identifiers.
//!
//! Every table name, alias and column emitted by the builders is written as
//! `[name]`. A closing bracket inside the name is escaped as `]]`, so any
//! non-empty name without NUL characters can be written safely.
//!
//! # Example
//! ```
//! use sqlfluent::Ident;
//!
//! let t = Ident::new("Car")?;
//! assert_eq!(t.to_sql(), "[Car]");
//! assert_eq!(Ident::new("odd]name")?.to_sql(), "[odd]]name]");
//! # Ok::<(), sqlfluent::QueryError>(())
//! ```

use crate::error::{QueryError, QueryResult};

/// A validated identifier (table, alias, or column name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(String);

impl Ident {
    /// Validate a name.
    ///
    /// Rejects empty or whitespace-only names and names containing NUL.
    pub fn new(name: &str) -> QueryResult<Self> {
        if name.trim().is_empty() {
            return Err(QueryError::InvalidIdentifier(
                "identifier cannot be empty".to_string(),
            ));
        }
        if name.contains('\0') {
            return Err(QueryError::InvalidIdentifier(format!(
                "identifier '{}' contains a NUL character",
                name.replace('\0', "\\0")
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 2);
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        write_bracketed(out, &self.0);
    }
}

/// Quote a name without validation.
///
/// Callers pass names that have already been validated (registry aliases) or
/// that come from `Table`/`Column` constants.
pub(crate) fn bracket(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_bracketed(&mut out, name);
    out
}

fn write_bracketed(out: &mut String, name: &str) {
    out.push('[');
    for ch in name.chars() {
        if ch == ']' {
            out.push_str("]]");
        } else {
            out.push(ch);
        }
    }
    out.push(']');
}
