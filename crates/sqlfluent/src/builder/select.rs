//! SELECT builder.

use std::marker::PhantomData;
use std::sync::Arc;

use super::draft::{Draft, join_methods, where_methods};
use super::stage::{Filtering, Grouping, Joining, Ordering, Selecting, Start, Topped};
use crate::config::BuilderConfig;
use crate::error::{BuildResult, QueryError, StatementKind};
use crate::ident::Ident;
use crate::select_expr::{AggregateFn, SelectExpr};
use crate::table::{Project, Table, TableRef};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Joining {}
    impl Sealed for super::Topped {}
    impl Sealed for super::Selecting {}
    impl Sealed for super::Filtering {}
    impl Sealed for super::Grouping {}
    impl Sealed for super::Ordering {}
}

/// Stages after `from`.
pub trait Bound: sealed::Sealed {}
/// Stages that accept select items.
pub trait AcceptsItems: Bound {}
/// Stages that accept WHERE predicates.
pub trait AcceptsWhere: Bound {}
/// Stages that accept GROUP BY fields.
pub trait AcceptsGroupBy: Bound {}
/// Stages that accept ORDER BY fields.
pub trait AcceptsOrderBy: Bound {}

impl Bound for Joining {}
impl Bound for Topped {}
impl Bound for Selecting {}
impl Bound for Filtering {}
impl Bound for Grouping {}
impl Bound for Ordering {}

impl AcceptsItems for Joining {}
impl AcceptsItems for Topped {}
impl AcceptsItems for Selecting {}

impl AcceptsWhere for Selecting {}
impl AcceptsWhere for Filtering {}

impl AcceptsGroupBy for Selecting {}
impl AcceptsGroupBy for Filtering {}
impl AcceptsGroupBy for Grouping {}

impl AcceptsOrderBy for Selecting {}
impl AcceptsOrderBy for Filtering {}
impl AcceptsOrderBy for Grouping {}
impl AcceptsOrderBy for Ordering {}

/// One entry of the select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectItem {
    Plain(String),
    Aggregate(String),
}

impl SelectItem {
    pub fn sql(&self) -> &str {
        match self {
            Self::Plain(sql) | Self::Aggregate(sql) => sql,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate(_))
    }
}

/// Staged SELECT builder.
///
/// ```
/// use sqlfluent::{op, select_from, Column, Table};
///
/// struct Car;
/// impl Table for Car {
///     const TABLE: &'static str = "Car";
/// }
/// impl Car {
///     const ID: Column<Car> = Column::new("Id");
///     const MILEAGE: Column<Car> = Column::new("Mileage");
/// }
///
/// let sql = select_from::<Car>()
///     .top(10)
///     .select(Car::ID)
///     .where_(|c| c.compare(Car::MILEAGE).with(op::LT, "@max"))
///     .order_by_desc(Car::MILEAGE)
///     .try_build()?;
/// assert_eq!(
///     sql,
///     "SELECT TOP 10 [Car].[Id] FROM [Car] WHERE (([Car].[Mileage]) < (@max)) ORDER BY [Car].[Mileage] DESC"
/// );
/// # Ok::<(), sqlfluent::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SelectQuery<S> {
    core: Draft,
    top: i64,
    items: Vec<SelectItem>,
    group_by: Vec<String>,
    order_by: Vec<String>,
    _stage: PhantomData<S>,
}

impl<S> SelectQuery<S> {
    fn into_stage<N>(self) -> SelectQuery<N> {
        SelectQuery {
            core: self.core,
            top: self.top,
            items: self.items,
            group_by: self.group_by,
            order_by: self.order_by,
            _stage: PhantomData,
        }
    }

    /// Diagnostics recorded so far.
    pub fn errors(&self) -> &[QueryError] {
        self.core.translator().errors()
    }
}

impl Default for SelectQuery<Start> {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectQuery<Start> {
    pub fn new() -> Self {
        Self::from_draft(Draft::with_config(Arc::new(BuilderConfig::default())))
    }

    pub(crate) fn from_draft(core: Draft) -> Self {
        Self {
            core,
            top: 0,
            items: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            _stage: PhantomData,
        }
    }

    pub fn from<T: Table>(mut self) -> SelectQuery<Joining> {
        self.core.bind_target::<T>(None);
        self.into_stage()
    }

    pub fn from_as<T: Table>(mut self, alias: &str) -> SelectQuery<Joining> {
        self.core.bind_target::<T>(Some(alias));
        self.into_stage()
    }
}

impl SelectQuery<Joining> {
    join_methods!();

    /// Limit the row count. `TOP` is emitted only for `n > 0`; negative
    /// values fail at build time.
    pub fn top(mut self, n: i64) -> SelectQuery<Topped> {
        if !self.core.translator().has_error() {
            self.top = n;
        }
        self.into_stage()
    }
}

impl<S: AcceptsItems> SelectQuery<S> {
    /// Select the fields of a projection, in order.
    pub fn select<P: Project>(mut self, projection: P) -> SelectQuery<Selecting> {
        let items = &mut self.items;
        self.core.apply(|core| {
            let columns = core.translator_mut().qualify_projection(&projection.field_ref())?;
            items.extend(columns.into_iter().map(SelectItem::Plain));
            Ok(())
        });
        self.into_stage()
    }

    /// `[T].*`
    pub fn select_all<T: Table>(self) -> SelectQuery<Selecting> {
        self.push_wildcard::<T>(None)
    }

    /// `[alias].*`
    pub fn select_all_as<T: Table>(self, alias: &str) -> SelectQuery<Selecting> {
        self.push_wildcard::<T>(Some(alias))
    }

    /// `FN(column) AS [result_alias]`
    pub fn select_aggregate_as<P: Project>(
        self,
        func: AggregateFn,
        projection: P,
        result_alias: &str,
    ) -> SelectQuery<Selecting> {
        self.select_as(SelectExpr::aggregate(func, projection), result_alias)
    }

    /// `<expr> AS [result_alias]`
    pub fn select_as(mut self, expr: SelectExpr, result_alias: &str) -> SelectQuery<Selecting> {
        let items = &mut self.items;
        self.core.apply(|core| {
            let name = Ident::new(result_alias)?;
            let sql = format!("{} AS {}", expr.try_build(core.translator_mut())?, name.to_sql());
            items.push(if expr.is_aggregate() {
                SelectItem::Aggregate(sql)
            } else {
                SelectItem::Plain(sql)
            });
            Ok(())
        });
        self.into_stage()
    }

    fn push_wildcard<T: Table>(mut self, alias: Option<&str>) -> SelectQuery<Selecting> {
        let items = &mut self.items;
        self.core.apply(|core| {
            let column = core
                .translator_mut()
                .qualify(&TableRef::of::<T>(), "*", alias)?;
            items.push(SelectItem::Plain(column));
            Ok(())
        });
        self.into_stage()
    }
}

impl<S: AcceptsWhere> SelectQuery<S> {
    where_methods!(SelectQuery<Filtering>);
}

impl<S: AcceptsGroupBy> SelectQuery<S> {
    /// Group by the first field of a projection; an empty projection adds nothing.
    pub fn group_by<P: Project>(mut self, projection: P) -> SelectQuery<Grouping> {
        let group_by = &mut self.group_by;
        self.core.apply(|core| {
            if let Some(column) = core.translator_mut().first_qualified(&projection.field_ref())? {
                group_by.push(column);
            }
            Ok(())
        });
        self.into_stage()
    }
}

impl<S: AcceptsOrderBy> SelectQuery<S> {
    /// Order by the first field of a projection; an empty projection adds nothing.
    pub fn order_by<P: Project>(self, projection: P) -> SelectQuery<Ordering> {
        self.push_order(projection, false)
    }

    pub fn order_by_desc<P: Project>(self, projection: P) -> SelectQuery<Ordering> {
        self.push_order(projection, true)
    }

    fn push_order<P: Project>(mut self, projection: P, desc: bool) -> SelectQuery<Ordering> {
        let order_by = &mut self.order_by;
        self.core.apply(|core| {
            if let Some(column) = core.translator_mut().first_qualified(&projection.field_ref())? {
                order_by.push(if desc { format!("{column} DESC") } else { column });
            }
            Ok(())
        });
        self.into_stage()
    }
}

impl<S: Bound> SelectQuery<S> {
    /// Validate and render the statement.
    pub fn try_build(&self) -> BuildResult {
        self.core
            .finish(StatementKind::Select, || self.validate(), || self.render())
    }

    fn validate(&self) -> Vec<QueryError> {
        let mut diagnostics = Vec::new();
        if self.items.is_empty() {
            diagnostics.push(QueryError::MissingSelect);
        }
        if self.top < 0 {
            diagnostics.push(QueryError::InvalidTop(self.top));
        }
        if self.items.iter().any(SelectItem::is_aggregate) {
            // Textual containment, not column equality: with an alias
            // `x[c`, the fragment `[x[c].[Id]` also covers `[c].[Id]`.
            for item in &self.items {
                if let SelectItem::Plain(column) = item {
                    if !self.group_by.iter().any(|g| g.contains(column.as_str())) {
                        diagnostics.push(QueryError::UngroupedColumn {
                            column: column.clone(),
                        });
                    }
                }
            }
        }
        diagnostics
    }

    fn render(&self) -> String {
        let mut sql = String::from("SELECT ");
        if self.top > 0 {
            sql.push_str(&format!("TOP {} ", self.top));
        }
        let items: Vec<&str> = self.items.iter().map(SelectItem::sql).collect();
        sql.push_str(&items.join(", "));
        sql.push_str(" FROM ");
        sql.push_str(&self.core.target_clause());
        sql.push_str(&self.core.joins_sql());
        sql.push_str(&self.core.where_sql());
        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }
        sql
    }
}
