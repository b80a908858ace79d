//! Clause accumulators.
//!
//! Each clause collects items through builder calls and renders itself
//! followed by one space. An empty clause renders nothing, so statements can
//! write every clause unconditionally.

use crate::context::{RenderContext, RenderState, SourceSet};
use crate::error::{QbError, QbResult};
use crate::qb::expr::{Column, Expr, IntoExpr, write_operand};
use crate::qb::ops::{Direction, LogicalOp};
use crate::qb::source::{Source, TableExpr};

/// Anything naming a column in an unqualified position (SET keys, INSERT
/// column lists).
pub trait ColumnName {
    fn column_name(self) -> String;
}

impl ColumnName for Column {
    fn column_name(self) -> String {
        self.name().to_string()
    }
}

impl ColumnName for &Column {
    fn column_name(self) -> String {
        self.name().to_string()
    }
}

impl ColumnName for &str {
    fn column_name(self) -> String {
        self.to_string()
    }
}

impl ColumnName for String {
    fn column_name(self) -> String {
        self
    }
}

/// Comma-separated expression list, shared by SELECT, RETURNING and GROUP BY.
#[derive(Clone, Debug, Default)]
pub(crate) struct ExprList {
    items: Vec<Expr>,
}

impl ExprList {
    pub(crate) fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        self.items.extend(items.into_iter().map(IntoExpr::into_expr));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn collect_sources(&self, into: &mut SourceSet) {
        for item in &self.items {
            item.collect_sources(into);
        }
    }

    /// Write `<keyword> a, b ` with every item in `state`.
    pub(crate) fn write_sql(&self, keyword: &str, state: RenderState, ctx: &mut RenderContext) -> QbResult<()> {
        if self.items.is_empty() {
            return Ok(());
        }
        ctx.push_str(keyword);
        ctx.push(' ');
        ctx.with_state(state, |ctx| {
            for (i, item) in self.items.iter().enumerate() {
                if i > 0 {
                    ctx.push_str(", ");
                }
                item.write_sql(ctx)?;
            }
            Ok::<_, QbError>(())
        })?;
        ctx.push(' ');
        Ok(())
    }
}

/// SELECT and RETURNING lists declare aliases.
#[derive(Clone, Debug, Default)]
pub(crate) struct SelectList(pub(crate) ExprList);

impl SelectList {
    pub(crate) fn write_sql(&self, keyword: &str, ctx: &mut RenderContext) -> QbResult<()> {
        self.0.write_sql(keyword, RenderState::Declaration, ctx)
    }
}

/// FROM and USING lists.
#[derive(Clone, Debug, Default)]
pub(crate) struct FromList {
    items: Vec<TableExpr>,
}

impl FromList {
    pub(crate) fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<TableExpr>,
    {
        self.items.extend(items.into_iter().map(Into::into));
    }

    pub(crate) fn collect_declared(&self, into: &mut SourceSet) {
        for item in &self.items {
            item.collect_declared(into);
        }
    }

    /// Write the explicit entries followed by `inferred`.
    pub(crate) fn write_sql(
        &self,
        keyword: &str,
        inferred: &[Source],
        ctx: &mut RenderContext,
    ) -> QbResult<()> {
        if self.items.is_empty() && inferred.is_empty() {
            return Ok(());
        }
        ctx.push_str(keyword);
        ctx.push(' ');
        let mut first = true;
        for item in &self.items {
            if !first {
                ctx.push_str(", ");
            }
            first = false;
            item.write_sql(ctx)?;
        }
        for src in inferred {
            if !first {
                ctx.push_str(", ");
            }
            first = false;
            tracing::trace!(target: "pgqb.auto_from", source = src.name(), keyword, "inferred table");
            src.write_declaration(ctx)?;
        }
        ctx.push(' ');
        Ok(())
    }
}

/// WHERE and HAVING: repeated calls combine with AND.
#[derive(Clone, Debug, Default)]
pub(crate) struct Predicate {
    items: Vec<Expr>,
}

impl Predicate {
    pub(crate) fn push(&mut self, predicate: Expr) {
        self.items.push(predicate);
    }

    pub(crate) fn collect_sources(&self, into: &mut SourceSet) {
        for item in &self.items {
            item.collect_sources(into);
        }
    }

    /// The combined condition: the single predicate itself, or an AND of all.
    pub(crate) fn combined(&self) -> Option<Expr> {
        match self.items.as_slice() {
            [] => None,
            [single] => Some(single.clone()),
            many => Some(Expr::logical_of(LogicalOp::And, many.to_vec())),
        }
    }

    pub(crate) fn write_sql(&self, keyword: &str, ctx: &mut RenderContext) -> QbResult<()> {
        let Some(cond) = self.combined() else {
            return Ok(());
        };
        ctx.push_str(keyword);
        ctx.push(' ');
        cond.write_sql(ctx)?;
        ctx.push(' ');
        Ok(())
    }
}

/// An ORDER BY item.
#[derive(Clone, Debug)]
pub struct OrderExpr {
    expr: Expr,
    direction: Direction,
}

impl OrderExpr {
    /// Order by `expr` in `direction`.
    pub fn new(expr: impl IntoExpr, direction: Direction) -> Self {
        Self {
            expr: expr.into_expr(),
            direction,
        }
    }

    /// The ordered expression.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The sort direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn write_sql(&self, ctx: &mut RenderContext) -> QbResult<()> {
        write_operand(&self.expr, ctx)?;
        ctx.push(' ');
        ctx.push_str(self.direction.keyword());
        Ok(())
    }
}

/// Items without an explicit direction sort ascending.
impl From<Expr> for OrderExpr {
    fn from(expr: Expr) -> Self {
        OrderExpr::new(expr, Direction::Asc)
    }
}

impl From<&Expr> for OrderExpr {
    fn from(expr: &Expr) -> Self {
        OrderExpr::new(expr, Direction::Asc)
    }
}

impl From<Column> for OrderExpr {
    fn from(col: Column) -> Self {
        OrderExpr::new(col, Direction::Asc)
    }
}

impl From<&Column> for OrderExpr {
    fn from(col: &Column) -> Self {
        OrderExpr::new(col, Direction::Asc)
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct OrderList {
    items: Vec<OrderExpr>,
}

impl OrderList {
    pub(crate) fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<OrderExpr>,
    {
        self.items.extend(items.into_iter().map(Into::into));
    }

    pub(crate) fn collect_sources(&self, into: &mut SourceSet) {
        for item in &self.items {
            item.expr.collect_sources(into);
        }
    }

    pub(crate) fn write_sql(&self, ctx: &mut RenderContext) -> QbResult<()> {
        if self.items.is_empty() {
            return Ok(());
        }
        ctx.push_str("ORDER BY ");
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                ctx.push_str(", ");
            }
            item.write_sql(ctx)?;
        }
        ctx.push(' ');
        Ok(())
    }
}

/// SET assignments keyed by column name. A repeated key replaces the earlier
/// value in place.
#[derive(Clone, Debug, Default)]
pub(crate) struct SetList {
    items: Vec<(String, Expr)>,
}

impl SetList {
    pub(crate) fn set(&mut self, column: String, value: Expr) {
        match self.items.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.items.push((column, value)),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn collect_sources(&self, into: &mut SourceSet) {
        for (_, value) in &self.items {
            value.collect_sources(into);
        }
    }

    pub(crate) fn write_sql(&self, ctx: &mut RenderContext) -> QbResult<()> {
        if self.items.is_empty() {
            return Ok(());
        }
        ctx.push_str("SET ");
        for (i, (name, value)) in self.items.iter().enumerate() {
            if i > 0 {
                ctx.push_str(", ");
            }
            ctx.push_ident(name);
            ctx.push_str(" = ");
            value.write_sql(ctx)?;
        }
        ctx.push(' ');
        Ok(())
    }
}

/// Sources in `used` that `declared` does not cover, in first-reference order.
pub(crate) fn missing_sources(used: &SourceSet, declared: &SourceSet) -> Vec<Source> {
    used.difference(declared).cloned().collect()
}

/// Write `("a","b")`: unqualified names, no space after the comma.
pub(crate) fn write_name_list(names: &[String], ctx: &mut RenderContext) {
    ctx.push('(');
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            ctx.push(',');
        }
        ctx.push_ident(name);
    }
    ctx.push(')');
}

#[derive(Clone, Debug, Default)]
pub(crate) enum ConflictAction {
    #[default]
    Nothing,
    Update { set: SetList, predicate: Predicate },
}

/// `ON CONFLICT (targets) DO ...`
#[derive(Clone, Debug, Default)]
pub(crate) struct OnConflict {
    pub(crate) targets: Vec<Expr>,
    pub(crate) action: ConflictAction,
}

impl OnConflict {
    pub(crate) fn write_sql(&self, ctx: &mut RenderContext) -> QbResult<()> {
        ctx.push_str("ON CONFLICT ");
        if !self.targets.is_empty() {
            ctx.push('(');
            ctx.with_state(RenderState::BareName, |ctx| {
                for (i, target) in self.targets.iter().enumerate() {
                    if i > 0 {
                        ctx.push(',');
                    }
                    target.write_sql(ctx)?;
                }
                Ok::<_, QbError>(())
            })?;
            ctx.push_str(") ");
        }
        match &self.action {
            ConflictAction::Nothing => ctx.push_str("DO NOTHING "),
            ConflictAction::Update { set, predicate } => {
                ctx.push_str("DO UPDATE ");
                set.write_sql(ctx)?;
                predicate.write_sql("WHERE", ctx)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderOptions;
    use crate::qb::expr::{ExprOps, lit};
    use crate::qb::source::table;

    fn render(f: impl FnOnce(&mut RenderContext) -> QbResult<()>) -> String {
        let mut ctx = RenderContext::new(RenderOptions::default());
        f(&mut ctx).unwrap();
        ctx.into_rendered().sql
    }

    #[test]
    fn empty_clauses_render_nothing() {
        assert_eq!(render(|ctx| ExprList::default().write_sql("GROUP BY", RenderState::Reference, ctx)), "");
        assert_eq!(render(|ctx| Predicate::default().write_sql("WHERE", ctx)), "");
        assert_eq!(render(|ctx| OrderList::default().write_sql(ctx)), "");
        assert_eq!(render(|ctx| SetList::default().write_sql(ctx)), "");
        assert_eq!(render(|ctx| FromList::default().write_sql("FROM", &[], ctx)), "");
    }

    #[test]
    fn predicate_single_is_bare() {
        let t = table("t");
        let mut p = Predicate::default();
        p.push(t.column("a").gt(1));
        assert_eq!(render(|ctx| p.write_sql("WHERE", ctx)), r#"WHERE "t"."a" > 1"#);
        p.push(t.column("b").lt(2));
        assert_eq!(
            render(|ctx| p.write_sql("WHERE", ctx)),
            r#"WHERE ("t"."a" > 1) AND ("t"."b" < 2)"#
        );
    }

    #[test]
    fn order_defaults_to_ascending() {
        let t = table("t");
        let mut o = OrderList::default();
        o.extend([t.column("a").desc(), t.column("b").into()]);
        o.extend([t.column("c").add(lit(1))]);
        assert_eq!(
            render(|ctx| o.write_sql(ctx)),
            r#"ORDER BY "t"."a" DESC, "t"."b" ASC, ("t"."c" + 1) ASC"#
        );
    }

    #[test]
    fn set_last_write_wins_in_place() {
        let mut s = SetList::default();
        s.set("a".into(), lit(1));
        s.set("b".into(), lit(2));
        s.set("a".into(), lit(3));
        assert_eq!(render(|ctx| s.write_sql(ctx)), r#"SET "a" = 3, "b" = 2"#);
    }

    #[test]
    fn name_list_has_no_spaces() {
        let names = vec!["name".to_string(), "city".to_string()];
        assert_eq!(
            render(|ctx| {
                write_name_list(&names, ctx);
                Ok(())
            }),
            r#"("name","city")"#
        );
    }

    #[test]
    fn conflict_targets_are_bare() {
        let t = table("t");
        let c = OnConflict {
            targets: vec![t.column("name").into(), t.column("city").into()],
            action: ConflictAction::Nothing,
        };
        assert_eq!(
            render(|ctx| c.write_sql(ctx)),
            r#"ON CONFLICT ("name","city") DO NOTHING"#
        );
    }
}
