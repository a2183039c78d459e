use super::comparator::{Compare, Comparator, Operand};
use crate::error::{QueryError, QueryResult};
use crate::translator::Translator;

/// A predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereBuilder {
    Compare(Comparator),
    And(Vec<WhereBuilder>),
    Or(Vec<WhereBuilder>),
}

impl From<Comparator> for WhereBuilder {
    fn from(value: Comparator) -> Self {
        Self::Compare(value)
    }
}

impl WhereBuilder {
    /// Resolve the tree against `translator`.
    ///
    /// Fails at once if `translator` already carries an error. Otherwise
    /// every branch is resolved and records its own error, and the first
    /// failing branch (in tree order) is returned.
    pub fn try_build(&self, translator: &mut Translator) -> QueryResult<String> {
        translator.ensure_clean()?;
        self.resolve(translator)
    }

    fn resolve(&self, translator: &mut Translator) -> QueryResult<String> {
        match self {
            Self::Compare(cmp) => cmp.resolve(translator),
            Self::And(children) => join_group(translator, "AND", children),
            Self::Or(children) => join_group(translator, "OR", children),
        }
    }
}

fn join_group(
    translator: &mut Translator,
    keyword: &'static str,
    children: &[WhereBuilder],
) -> QueryResult<String> {
    if children.is_empty() {
        return Err(translator.fail(QueryError::EmptyCondition(keyword)));
    }

    let results: Vec<_> = children.iter().map(|c| c.resolve(translator)).collect();
    let mut parts = Vec::with_capacity(results.len());
    for result in results {
        parts.push(result?);
    }
    Ok(format!("({})", parts.join(&format!(" {keyword} "))))
}

/// Factory handed to `where_factory` closures.
///
/// ```
/// use sqlfluent::{op, Translator, WhereFactory};
///
/// let f = WhereFactory;
/// let tree = f.or([f.cmp("@a", op::EQ, "1"), f.cmp("@b", op::EQ, "2")]);
/// assert_eq!(
///     tree.try_build(&mut Translator::new())?,
///     "(((@a) = (1)) OR ((@b) = (2)))"
/// );
/// # Ok::<(), sqlfluent::QueryError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WhereFactory;

impl WhereFactory {
    pub fn compare(&self, f: impl FnOnce(Compare) -> Comparator) -> WhereBuilder {
        WhereBuilder::Compare(f(Compare))
    }

    /// `compare(|c| c.compare(left).with(operator, right))` in one call.
    pub fn cmp(&self, left: impl Into<Operand>, operator: &str, right: impl Into<Operand>) -> WhereBuilder {
        WhereBuilder::Compare(Compare.compare(left).with(operator, right))
    }

    pub fn and(&self, conditions: impl IntoIterator<Item = WhereBuilder>) -> WhereBuilder {
        WhereBuilder::And(conditions.into_iter().collect())
    }

    pub fn or(&self, conditions: impl IntoIterator<Item = WhereBuilder>) -> WhereBuilder {
        WhereBuilder::Or(conditions.into_iter().collect())
    }
}
