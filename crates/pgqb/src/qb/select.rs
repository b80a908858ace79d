//! SELECT statement.

use crate::context::{RenderContext, RenderState, SourceSet};
use crate::error::{QbError, QbResult};
use crate::qb::clause::{ExprList, FromList, OrderExpr, OrderList, Predicate, SelectList, missing_sources};
use crate::qb::expr::IntoExpr;
use crate::qb::source::{Source, TableExpr};
use crate::qb::traits::{SqlStatement, StatementKind};

/// SELECT statement builder.
///
/// Columns referenced anywhere in the statement but whose source is not in
/// FROM are added to FROM at render time (unless disabled through
/// [`RenderOptions::auto_from`](crate::RenderOptions::auto_from)).
///
/// # Example
/// ```
/// use pgqb::prelude::*;
///
/// let school = table("school");
/// let stmt = select([school.column("name"), school.column("city")])
///     .where_(school.column("city").ne("New York City"));
/// assert_eq!(
///     stmt.to_sql().unwrap(),
///     r#"SELECT "school"."name", "school"."city" FROM "school" WHERE "school"."city" != 'New York City'"#
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct SelectStmt {
    /// SELECT list
    select: Option<SelectList>,
    /// Explicit FROM entries
    from: Option<FromList>,
    /// WHERE predicates, AND-ed
    where_clause: Option<Predicate>,
    /// GROUP BY
    group_by: Option<ExprList>,
    /// HAVING predicates, AND-ed
    having: Option<Predicate>,
    /// ORDER BY
    order_by: Option<OrderList>,
    /// LIMIT
    limit: Option<u64>,
    /// OFFSET
    offset: Option<u64>,
}

impl SelectStmt {
    /// An empty statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// An independent copy. Later changes to either side do not affect the
    /// other; expression trees are shared.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    // ==================== Builders ====================

    /// Append to the SELECT list.
    pub fn select<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        self.select.get_or_insert_with(SelectList::default).0.extend(items);
        self
    }

    /// Append to FROM.
    pub fn from<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TableExpr>,
    {
        self.from.get_or_insert_with(FromList::default).extend(items);
        self
    }

    /// Add a WHERE predicate. Repeated calls are combined with AND.
    pub fn where_(mut self, predicate: impl IntoExpr) -> Self {
        self.where_clause
            .get_or_insert_with(Predicate::default)
            .push(predicate.into_expr());
        self
    }

    /// Append to GROUP BY.
    pub fn group_by<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        self.group_by.get_or_insert_with(ExprList::default).extend(items);
        self
    }

    /// Add a HAVING predicate. Repeated calls are combined with AND.
    pub fn having(mut self, predicate: impl IntoExpr) -> Self {
        self.having
            .get_or_insert_with(Predicate::default)
            .push(predicate.into_expr());
        self
    }

    /// Append to ORDER BY. Plain expressions sort ascending.
    pub fn order_by<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OrderExpr>,
    {
        self.order_by.get_or_insert_with(OrderList::default).extend(items);
        self
    }

    /// Set LIMIT; a later call replaces the earlier one.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET; a later call replaces the earlier one.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    // ==================== Sources ====================

    /// Sources referenced by SELECT, WHERE, GROUP BY, HAVING and ORDER BY.
    pub fn referenced_sources(&self) -> SourceSet {
        let mut set = SourceSet::new();
        if let Some(list) = &self.select {
            list.0.collect_sources(&mut set);
        }
        if let Some(pred) = &self.where_clause {
            pred.collect_sources(&mut set);
        }
        if let Some(list) = &self.group_by {
            list.collect_sources(&mut set);
        }
        if let Some(pred) = &self.having {
            pred.collect_sources(&mut set);
        }
        if let Some(list) = &self.order_by {
            list.collect_sources(&mut set);
        }
        set
    }

    /// Sources declared by FROM.
    pub fn declared_sources(&self) -> SourceSet {
        let mut set = SourceSet::new();
        if let Some(from) = &self.from {
            from.collect_declared(&mut set);
        }
        set
    }

    /// Referenced sources missing from FROM, in first-reference order.
    pub fn inferred_from(&self) -> Vec<Source> {
        missing_sources(&self.referenced_sources(), &self.declared_sources())
    }

    /// What this statement exposes to an enclosing statement when used as a
    /// sub-query expression: every source it uses but does not declare.
    pub(crate) fn collect_outer_sources(&self, into: &mut SourceSet) {
        for src in self.inferred_from() {
            into.insert(src);
        }
    }
}

impl SqlStatement for SelectStmt {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn write_sql(&self, ctx: &mut RenderContext) -> QbResult<()> {
        let inferred = if ctx.options().auto_from {
            self.inferred_from()
        } else {
            Vec::new()
        };
        ctx.with_state(RenderState::Reference, |ctx| {
            match &self.select {
                Some(list) if !list.0.is_empty() => list.write_sql("SELECT", ctx)?,
                _ => ctx.push_str("SELECT "),
            }
            match &self.from {
                Some(from) => from.write_sql("FROM", &inferred, ctx)?,
                None => FromList::default().write_sql("FROM", &inferred, ctx)?,
            }
            if let Some(pred) = &self.where_clause {
                pred.write_sql("WHERE", ctx)?;
            }
            if let Some(list) = &self.group_by {
                list.write_sql("GROUP BY", RenderState::Reference, ctx)?;
            }
            if let Some(pred) = &self.having {
                pred.write_sql("HAVING", ctx)?;
            }
            if let Some(list) = &self.order_by {
                list.write_sql(ctx)?;
            }
            if let Some(n) = self.limit {
                ctx.push_str(&format!("LIMIT {n} "));
            }
            if let Some(n) = self.offset {
                ctx.push_str(&format!("OFFSET {n} "));
            }
            Ok::<_, QbError>(())
        })
    }
}

/// Start a SELECT statement.
pub fn select<I>(items: I) -> SelectStmt
where
    I: IntoIterator,
    I::Item: IntoExpr,
{
    SelectStmt::new().select(items)
}
