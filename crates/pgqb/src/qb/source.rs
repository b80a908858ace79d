//! Column sources and table expressions.
//!
//! A [`Source`] is anything columns can be qualified by: a table, an alias of
//! a table, or a sub-query used as a table. Sources are identified by
//! [`Source::name`], which is what qualifies their columns and what FROM
//! inference deduplicates on.
//!
//! A [`TableExpr`] is what may appear in FROM/USING: a source or a join of
//! two table expressions.

use crate::context::{RenderContext, SourceSet};
use crate::error::{QbError, QbResult};
use crate::qb::expr::{Column, Expr, IntoExpr};
use crate::qb::ops::JoinKind;
use crate::qb::select::SelectStmt;
use crate::qb::traits::SqlStatement;
use std::sync::Arc;

/// Name of the upsert pseudo-table.
const EXCLUDED: &str = "excluded";

#[derive(Debug)]
pub(crate) enum SourceKind {
    Table {
        schema: Option<String>,
        name: String,
    },
    /// Always wraps a table or sub-query, never another alias.
    Alias { source: Source, alias: String },
    SubQuery { stmt: Box<SelectStmt>, alias: String },
    Excluded,
}

/// A column source. Cloning shares the underlying node.
#[derive(Clone, Debug)]
pub struct Source {
    kind: Arc<SourceKind>,
}

impl Source {
    fn new(kind: SourceKind) -> Self {
        Self {
            kind: Arc::new(kind),
        }
    }

    pub(crate) fn kind(&self) -> &SourceKind {
        &self.kind
    }

    /// The `EXCLUDED` row of an `ON CONFLICT ... DO UPDATE`.
    ///
    /// Never added to FROM by inference.
    pub fn excluded() -> Self {
        Self::new(SourceKind::Excluded)
    }

    /// The name columns are qualified by.
    pub fn name(&self) -> &str {
        match &*self.kind {
            SourceKind::Table { name, .. } => name,
            SourceKind::Alias { alias, .. } | SourceKind::SubQuery { alias, .. } => alias,
            SourceKind::Excluded => EXCLUDED,
        }
    }

    /// Schema of the underlying table, if any.
    pub fn schema(&self) -> Option<&str> {
        match &*self.kind {
            SourceKind::Table { schema, .. } => schema.as_deref(),
            SourceKind::Alias { source, .. } => source.schema(),
            SourceKind::SubQuery { .. } | SourceKind::Excluded => None,
        }
    }

    /// Whether this source renames another one.
    pub fn is_alias(&self) -> bool {
        matches!(*self.kind, SourceKind::Alias { .. })
    }

    /// Pseudo sources exist without being declared in FROM.
    pub fn is_pseudo(&self) -> bool {
        matches!(*self.kind, SourceKind::Excluded)
    }

    /// A column qualified by this source.
    pub fn column(&self, name: impl Into<String>) -> Column {
        Column::new(self.clone(), name)
    }

    /// `"source".*`
    pub fn star(&self) -> Expr {
        Expr::star_of(Some(self.clone()))
    }

    /// A new source referring to the same table under `alias`.
    ///
    /// Aliasing an alias re-aliases the underlying table. A sub-query table
    /// is renamed.
    pub fn alias(&self, alias: impl Into<String>) -> Source {
        let alias = alias.into();
        match &*self.kind {
            SourceKind::Alias { source, .. } => Self::new(SourceKind::Alias {
                source: source.clone(),
                alias,
            }),
            SourceKind::SubQuery { stmt, .. } => Self::new(SourceKind::SubQuery {
                stmt: stmt.clone(),
                alias,
            }),
            SourceKind::Table { .. } | SourceKind::Excluded => Self::new(SourceKind::Alias {
                source: self.clone(),
                alias,
            }),
        }
    }

    /// Write the FROM-list form: `"schema"."t"`, `"t" "a"`, `(SELECT ...) "a"`.
    pub(crate) fn write_declaration(&self, ctx: &mut RenderContext) -> QbResult<()> {
        match &*self.kind {
            SourceKind::Table { schema, name } => {
                if let Some(schema) = schema {
                    ctx.push_ident(schema);
                    ctx.push('.');
                }
                ctx.push_ident(name);
            }
            SourceKind::Alias { source, alias } => {
                source.write_declaration(ctx)?;
                ctx.push(' ');
                ctx.push_ident(alias);
            }
            SourceKind::SubQuery { stmt, alias } => {
                // Its sources are hidden from the enclosing statement, so it
                // infers its own FROM even inside a sub-query expression.
                ctx.push('(');
                let auto_from = ctx.initial_auto_from();
                ctx.with_auto_from(auto_from, |ctx| stmt.write_sql(ctx))?;
                ctx.trim_trailing_space();
                ctx.push_str(") ");
                ctx.push_ident(alias);
            }
            SourceKind::Excluded => ctx.push_str(EXCLUDED),
        }
        Ok(())
    }
}

/// A table source without schema.
pub fn table(name: impl Into<String>) -> Source {
    Source::new(SourceKind::Table {
        schema: None,
        name: name.into(),
    })
}

/// A schema-qualified table source.
pub fn table_in(schema: impl Into<String>, name: impl Into<String>) -> Source {
    Source::new(SourceKind::Table {
        schema: Some(schema.into()),
        name: name.into(),
    })
}

/// A sub-query used as a table: `(SELECT ...) "alias"`.
///
/// The statement is snapshotted; later changes to `stmt` do not show through.
/// Sources referenced inside are not visible to the enclosing statement.
pub fn subquery(stmt: &SelectStmt, alias: impl Into<String>) -> Source {
    Source::new(SourceKind::SubQuery {
        stmt: Box::new(stmt.snapshot()),
        alias: alias.into(),
    })
}

#[derive(Debug)]
pub struct Join {
    kind: JoinKind,
    left: TableExpr,
    right: TableExpr,
    on: Option<Expr>,
}

impl Join {
    /// The join kind.
    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    /// The left-hand table expression.
    pub fn left(&self) -> &TableExpr {
        &self.left
    }

    /// The right-hand table expression.
    pub fn right(&self) -> &TableExpr {
        &self.right
    }

    /// The ON predicate; `None` for a natural join.
    pub fn predicate(&self) -> Option<&Expr> {
        self.on.as_ref()
    }
}

/// An entry of a FROM or USING list.
#[derive(Clone, Debug)]
pub enum TableExpr {
    Source(Source),
    Join(Arc<Join>),
}

impl TableExpr {
    fn join_of(kind: JoinKind, left: TableExpr, right: TableExpr, on: Option<Expr>) -> Self {
        TableExpr::Join(Arc::new(Join {
            kind,
            left,
            right,
            on,
        }))
    }

    /// Add every source this table expression declares to `into`.
    pub fn collect_declared(&self, into: &mut SourceSet) {
        match self {
            TableExpr::Source(src) => into.insert(src.clone()),
            TableExpr::Join(join) => {
                join.left.collect_declared(into);
                join.right.collect_declared(into);
            }
        }
    }

    pub(crate) fn write_sql(&self, ctx: &mut RenderContext) -> QbResult<()> {
        match self {
            TableExpr::Source(src) => src.write_declaration(ctx),
            TableExpr::Join(join) => {
                join.left.write_sql(ctx)?;
                ctx.push(' ');
                ctx.push_str(join.kind.keyword());
                ctx.push(' ');
                // A join on the right must be grouped to keep its own ON.
                if let TableExpr::Join(_) = join.right {
                    ctx.push('(');
                    join.right.write_sql(ctx)?;
                    ctx.push(')');
                } else {
                    join.right.write_sql(ctx)?;
                }
                if let Some(on) = &join.on {
                    ctx.push_str(" ON (");
                    on.write_sql(ctx)?;
                    ctx.push(')');
                }
                Ok(())
            }
        }
    }
}

impl From<Source> for TableExpr {
    fn from(src: Source) -> Self {
        TableExpr::Source(src)
    }
}

impl From<&Source> for TableExpr {
    fn from(src: &Source) -> Self {
        TableExpr::Source(src.clone())
    }
}

impl From<&TableExpr> for TableExpr {
    fn from(te: &TableExpr) -> Self {
        te.clone()
    }
}

/// Join construction, available on sources and table expressions.
pub trait Joinable {
    fn to_table_expr(&self) -> TableExpr;

    /// Join `dst` with an explicit kind.
    ///
    /// Every kind except [`JoinKind::Natural`] requires a predicate; a
    /// natural join must not have one.
    fn join(&self, kind: JoinKind, dst: impl Into<TableExpr>, on: Option<Expr>) -> QbResult<TableExpr> {
        match (kind.needs_predicate(), on.is_some()) {
            (true, false) => Err(QbError::MissingJoinPredicate {
                kind: kind.keyword(),
            }),
            (false, true) => Err(QbError::UnexpectedJoinPredicate {
                kind: kind.keyword(),
            }),
            _ => Ok(TableExpr::join_of(kind, self.to_table_expr(), dst.into(), on)),
        }
    }

    fn inner_join(&self, dst: impl Into<TableExpr>, on: impl IntoExpr) -> TableExpr {
        TableExpr::join_of(JoinKind::Inner, self.to_table_expr(), dst.into(), Some(on.into_expr()))
    }

    fn left_join(&self, dst: impl Into<TableExpr>, on: impl IntoExpr) -> TableExpr {
        TableExpr::join_of(JoinKind::LeftOuter, self.to_table_expr(), dst.into(), Some(on.into_expr()))
    }

    fn right_join(&self, dst: impl Into<TableExpr>, on: impl IntoExpr) -> TableExpr {
        TableExpr::join_of(JoinKind::RightOuter, self.to_table_expr(), dst.into(), Some(on.into_expr()))
    }

    fn full_join(&self, dst: impl Into<TableExpr>, on: impl IntoExpr) -> TableExpr {
        TableExpr::join_of(JoinKind::FullOuter, self.to_table_expr(), dst.into(), Some(on.into_expr()))
    }

    fn natural_join(&self, dst: impl Into<TableExpr>) -> TableExpr {
        TableExpr::join_of(JoinKind::Natural, self.to_table_expr(), dst.into(), None)
    }
}

impl Joinable for Source {
    fn to_table_expr(&self) -> TableExpr {
        TableExpr::Source(self.clone())
    }
}

impl Joinable for TableExpr {
    fn to_table_expr(&self) -> TableExpr {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderOptions;
    use crate::qb::expr::ExprOps;

    fn declared(te: impl Into<TableExpr>) -> String {
        let mut ctx = RenderContext::new(RenderOptions::default());
        te.into().write_sql(&mut ctx).unwrap();
        ctx.into_rendered().sql
    }

    #[test]
    fn table_forms() {
        assert_eq!(declared(table("school")), r#""school""#);
        assert_eq!(declared(table_in("public", "tb")), r#""public"."tb""#);
        assert_eq!(declared(table_in("public", "tb").alias("newTb")), r#""public"."tb" "newTb""#);
    }

    #[test]
    fn realias_targets_underlying_table() {
        let tb = table_in("public", "tb");
        let yes = tb.alias("Yes");
        let no = yes.alias("No");
        assert_eq!(no.name(), "No");
        assert_eq!(no.schema(), Some("public"));
        assert_eq!(declared(&no), r#""public"."tb" "No""#);
        // The first alias is untouched.
        assert_eq!(yes.name(), "Yes");
    }

    #[test]
    fn join_requires_predicate() {
        let a = table("a");
        let b = table("b");
        assert_eq!(
            a.join(JoinKind::Inner, &b, None).unwrap_err(),
            QbError::MissingJoinPredicate { kind: "INNER JOIN" }
        );
        let on = a.column("id").eq(b.column("a_id"));
        assert!(matches!(
            a.join(JoinKind::Natural, &b, Some(on.clone())),
            Err(QbError::UnexpectedJoinPredicate { .. })
        ));
        let joined = a.join(JoinKind::LeftOuter, &b, Some(on)).unwrap();
        assert_eq!(
            declared(joined),
            r#""a" LEFT OUTER JOIN "b" ON ("a"."id" = "b"."a_id")"#
        );
    }

    #[test]
    fn chained_joins() {
        let a = table("a");
        let b = table("b");
        let c = table("c").alias("cc");
        let te = a
            .inner_join(&b, a.column("id").eq(b.column("a_id")))
            .natural_join(&c);
        assert_eq!(
            declared(&te),
            r#""a" INNER JOIN "b" ON ("a"."id" = "b"."a_id") NATURAL JOIN "c" "cc""#
        );

        let mut set = SourceSet::new();
        te.collect_declared(&mut set);
        assert_eq!(set.names(), vec!["a", "b", "cc"]);
    }

    #[test]
    fn right_nested_join_is_grouped() {
        let a = table("a");
        let b = table("b");
        let c = table("c");
        let inner = b.full_join(&c, b.column("x").eq(c.column("x")));
        let te = a.right_join(inner, a.column("x").eq(b.column("x")));
        assert_eq!(
            declared(te),
            r#""a" RIGHT OUTER JOIN ("b" FULL OUTER JOIN "c" ON ("b"."x" = "c"."x")) ON ("a"."x" = "b"."x")"#
        );
    }

    #[test]
    fn excluded_is_pseudo() {
        let ex = Source::excluded();
        assert!(ex.is_pseudo());
        let mut set = SourceSet::new();
        set.insert(ex.clone());
        assert!(set.is_empty());
        assert_eq!(Expr::from(ex.column("name")).to_sql().unwrap(), r#""excluded"."name""#);
    }
}
