use crate::error::{QueryError, QueryResult};
use crate::select_expr::SelectExpr;
use crate::table::{Aliased, Column, FieldRef, Project, Table};
use crate::translator::Translator;

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Emitted verbatim (placeholders such as `@brand`, pre-escaped literals).
    Literal(String),
    /// First field of a projection, qualified.
    Field(FieldRef),
    /// A scalar select expression.
    Select(SelectExpr),
}

impl Operand {
    pub fn field<P: Project>(projection: P) -> Self {
        Self::Field(projection.field_ref())
    }

    fn resolve(&self, translator: &mut Translator) -> QueryResult<String> {
        match self {
            Self::Literal(text) => Ok(text.clone()),
            Self::Field(field) => translator.require_first(field, "comparison"),
            Self::Select(expr) => expr.render(translator),
        }
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<FieldRef> for Operand {
    fn from(value: FieldRef) -> Self {
        Self::Field(value)
    }
}

impl From<SelectExpr> for Operand {
    fn from(value: SelectExpr) -> Self {
        Self::Select(value)
    }
}

impl<T: Table> From<Column<T>> for Operand {
    fn from(value: Column<T>) -> Self {
        Self::field(value)
    }
}

impl<P: Project> From<Aliased<P>> for Operand {
    fn from(value: Aliased<P>) -> Self {
        Self::field(value)
    }
}

/// Start of a comparison; handed to `where_` closures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compare;

impl Compare {
    pub fn compare(self, left: impl Into<Operand>) -> CompareWith {
        CompareWith { left: left.into() }
    }
}

/// A comparison waiting for its operator and right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareWith {
    left: Operand,
}

impl CompareWith {
    pub fn with(self, operator: &str, right: impl Into<Operand>) -> Comparator {
        Comparator {
            left: self.left,
            operator: operator.to_string(),
            right: right.into(),
        }
    }
}

/// An atomic predicate: `((left) OP (right))`.
///
/// ```
/// use sqlfluent::{op, Compare, Translator};
///
/// let cmp = Compare.compare("@a").with(op::GT, "1");
/// assert_eq!(cmp.try_build(&mut Translator::new())?, "((@a) > (1))");
/// # Ok::<(), sqlfluent::QueryError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Comparator {
    left: Operand,
    operator: String,
    right: Operand,
}

impl Comparator {
    /// Resolve both operands through `translator`.
    ///
    /// Fails when the translator already carries an error, when an operand
    /// does not resolve (the right side is skipped once the left failed), or
    /// when the operator is blank.
    pub fn try_build(&self, translator: &mut Translator) -> QueryResult<String> {
        translator.ensure_clean()?;
        self.resolve(translator)
    }

    /// Like [`Comparator::try_build`] but ignores errors recorded earlier.
    pub(crate) fn resolve(&self, translator: &mut Translator) -> QueryResult<String> {
        let left = self.left.resolve(translator)?;
        let right = self.right.resolve(translator)?;
        if self.operator.trim().is_empty() {
            return Err(translator.fail(QueryError::MissingOperator));
        }
        Ok(format!("(({left}) {} ({right}))", self.operator))
    }
}
