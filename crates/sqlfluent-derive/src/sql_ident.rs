use std::collections::HashSet;

use proc_macro2::Span;
use syn::{Error, Result};

/// Names are written as `[name]`, so anything printable goes; `]` is
/// doubled when rendered.
pub(crate) fn is_valid_bracket_ident(s: &str) -> bool {
    !s.is_empty() && s.trim() == s && !s.chars().any(char::is_control)
}

pub(crate) fn parse_sql_ident_with_span(s: &str, span: Span, what: &str) -> Result<String> {
    if s.trim().is_empty() {
        return Err(Error::new(span, format!("{what} must not be empty")));
    }
    if !is_valid_bracket_ident(s) {
        return Err(Error::new(
            span,
            format!(
                "{what} '{}' must not contain control characters or surrounding whitespace",
                s.escape_debug()
            ),
        ));
    }
    Ok(s.to_string())
}

/// Track column names already emitted for one table.
#[derive(Default)]
pub(crate) struct ColumnSet {
    seen: HashSet<String>,
}

impl ColumnSet {
    pub(crate) fn insert(&mut self, column: &str, span: Span) -> Result<()> {
        if !self.seen.insert(column.to_string()) {
            return Err(Error::new(
                span,
                format!("duplicate column '{column}'"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_idents() {
        assert!(is_valid_bracket_ident("Name"));
        assert!(is_valid_bracket_ident("Order Details"));
        assert!(is_valid_bracket_ident("odd]name"));
        assert!(!is_valid_bracket_ident(""));
        assert!(!is_valid_bracket_ident(" Name"));
        assert!(!is_valid_bracket_ident("a\0b"));
        assert!(!is_valid_bracket_ident("a\nb"));
    }

    #[test]
    fn empty_is_rejected() {
        assert!(parse_sql_ident_with_span("  ", Span::call_site(), "column").is_err());
        assert_eq!(
            parse_sql_ident_with_span("Km", Span::call_site(), "column").unwrap(),
            "Km"
        );
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut set = ColumnSet::default();
        set.insert("Id", Span::call_site()).unwrap();
        assert!(set.insert("Name", Span::call_site()).is_ok());
        assert!(set.insert("Id", Span::call_site()).is_err());
    }
}
