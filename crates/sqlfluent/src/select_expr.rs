//! Scalar select expressions: aggregates and `datediff`.

use std::fmt;

use chrono::NaiveDate;

use crate::error::QueryResult;
use crate::table::{FieldRef, Project};
use crate::translator::Translator;

/// Aggregate function applied to one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateFn {
    Avg,
    Count,
    Sum,
    Min,
    Max,
    /// Any other function name, emitted verbatim.
    Custom(String),
}

impl AggregateFn {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Avg => "AVG",
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Custom(name) => name.as_str(),
        }
    }
}

impl fmt::Display for AggregateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit argument of `datediff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateDiffUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl DateDiffUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Second => "SECOND",
            Self::Minute => "MINUTE",
            Self::Hour => "HOUR",
            Self::Day => "DAY",
            Self::Month => "MONTH",
            Self::Year => "YEAR",
        }
    }
}

/// A computed select item or comparison operand.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectExpr {
    /// `FN([alias].[col])`
    Aggregate { func: AggregateFn, field: FieldRef },
    /// `datediff(UNIT, [alias].[col], 'YYYY-MM-DD')`
    DateDiff {
        unit: DateDiffUnit,
        field: FieldRef,
        date: NaiveDate,
    },
    /// `datediff(UNIT, [a].[col], [b].[col])`
    DateDiffBetween {
        unit: DateDiffUnit,
        from: FieldRef,
        to: FieldRef,
    },
}

impl SelectExpr {
    pub fn aggregate<P: Project>(func: AggregateFn, projection: P) -> Self {
        Self::Aggregate {
            func,
            field: projection.field_ref(),
        }
    }

    pub fn date_diff<P: Project>(unit: DateDiffUnit, projection: P, date: NaiveDate) -> Self {
        Self::DateDiff {
            unit,
            field: projection.field_ref(),
            date,
        }
    }

    pub fn date_diff_between<A: Project, B: Project>(unit: DateDiffUnit, from: A, to: B) -> Self {
        Self::DateDiffBetween {
            unit,
            from: from.field_ref(),
            to: to.field_ref(),
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate { .. })
    }

    /// Render against `translator`; fails if it already carries an error.
    pub fn try_build(&self, translator: &mut Translator) -> QueryResult<String> {
        translator.ensure_clean()?;
        self.render(translator)
    }

    pub(crate) fn render(&self, translator: &mut Translator) -> QueryResult<String> {
        match self {
            Self::Aggregate { func, field } => {
                let column = translator.require_first(field, func.as_str())?;
                Ok(format!("{func}({column})"))
            }
            Self::DateDiff { unit, field, date } => {
                let column = translator.require_first(field, "datediff")?;
                Ok(format!(
                    "datediff({}, {column}, '{}')",
                    unit.as_str(),
                    date.format("%Y-%m-%d")
                ))
            }
            Self::DateDiffBetween { unit, from, to } => {
                let from = translator.require_first(from, "datediff")?;
                let to = translator.require_first(to, "datediff")?;
                Ok(format!("datediff({}, {from}, {to})", unit.as_str()))
            }
        }
    }
}
