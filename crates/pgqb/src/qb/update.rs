//! UPDATE statement.

use crate::context::{RenderContext, RenderState, SourceSet};
use crate::error::{QbError, QbResult};
use crate::qb::clause::{ColumnName, FromList, Predicate, SelectList, SetList, missing_sources};
use crate::qb::expr::IntoExpr;
use crate::qb::source::{Source, TableExpr};
use crate::qb::traits::{SqlStatement, StatementKind};

/// UPDATE statement builder.
///
/// With FROM inference on, tables referenced by SET values, WHERE or
/// RETURNING other than the target are added to FROM.
///
/// # Example
/// ```
/// use pgqb::prelude::*;
///
/// let school = table("school");
/// let stmt = update(&school)
///     .set("city", arg("city"))
///     .where_(school.column("name").eq("Abc"));
/// assert_eq!(
///     stmt.to_sql().unwrap(),
///     r#"UPDATE "school" SET "city" = $1 WHERE "school"."name" = 'Abc'"#
/// );
/// ```
#[derive(Clone, Debug)]
pub struct UpdateStmt {
    /// Target table
    target: Source,
    /// SET assignments
    set: Option<SetList>,
    /// Extra FROM tables
    from: Option<FromList>,
    /// WHERE predicates, AND-ed
    where_clause: Option<Predicate>,
    /// RETURNING list
    returning: Option<SelectList>,
}

impl UpdateStmt {
    /// Update `target`.
    pub fn new(target: &Source) -> Self {
        Self {
            target: target.clone(),
            set: None,
            from: None,
            where_clause: None,
            returning: None,
        }
    }

    /// An independent copy sharing expression trees.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Assign `value` to `column`. A repeated column keeps the last value at
    /// its first position.
    pub fn set(mut self, column: impl ColumnName, value: impl IntoExpr) -> Self {
        self.set
            .get_or_insert_with(SetList::default)
            .set(column.column_name(), value.into_expr());
        self
    }

    /// Append FROM tables.
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

    /// Append to RETURNING.
    pub fn returning<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        self.returning.get_or_insert_with(SelectList::default).0.extend(items);
        self
    }

    /// Sources referenced by SET values, WHERE and RETURNING.
    pub fn referenced_sources(&self) -> SourceSet {
        let mut set = SourceSet::new();
        if let Some(list) = &self.set {
            list.collect_sources(&mut set);
        }
        if let Some(pred) = &self.where_clause {
            pred.collect_sources(&mut set);
        }
        if let Some(list) = &self.returning {
            list.0.collect_sources(&mut set);
        }
        set
    }

    /// Referenced sources that are neither the target nor in FROM.
    pub fn inferred_from(&self) -> Vec<Source> {
        let mut declared = SourceSet::new();
        declared.insert(self.target.clone());
        if let Some(from) = &self.from {
            from.collect_declared(&mut declared);
        }
        missing_sources(&self.referenced_sources(), &declared)
    }
}

impl SqlStatement for UpdateStmt {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn write_sql(&self, ctx: &mut RenderContext) -> QbResult<()> {
        let Some(set) = self.set.as_ref().filter(|s| !s.is_empty()) else {
            return Err(QbError::build("UPDATE requires at least one SET assignment"));
        };
        let inferred = if ctx.options().auto_from {
            self.inferred_from()
        } else {
            Vec::new()
        };
        ctx.with_state(RenderState::Reference, |ctx| {
            ctx.push_str("UPDATE ");
            self.target.write_declaration(ctx)?;
            ctx.push(' ');
            set.write_sql(ctx)?;
            match &self.from {
                Some(from) => from.write_sql("FROM", &inferred, ctx)?,
                None => FromList::default().write_sql("FROM", &inferred, ctx)?,
            }
            if let Some(pred) = &self.where_clause {
                pred.write_sql("WHERE", ctx)?;
            }
            if let Some(list) = &self.returning {
                list.write_sql("RETURNING", ctx)?;
            }
            Ok::<_, QbError>(())
        })
    }
}

/// Start an UPDATE statement.
pub fn update(target: &Source) -> UpdateStmt {
    UpdateStmt::new(target)
}
