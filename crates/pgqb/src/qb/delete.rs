//! DELETE statement.

use crate::context::{RenderContext, RenderState, SourceSet};
use crate::error::{QbError, QbResult};
use crate::qb::clause::{FromList, Predicate, SelectList, missing_sources};
use crate::qb::expr::IntoExpr;
use crate::qb::source::{Source, TableExpr};
use crate::qb::traits::{SqlStatement, StatementKind};

/// DELETE statement builder.
///
/// With FROM inference on, tables referenced by WHERE or RETURNING other
/// than the target are added to USING.
#[derive(Clone, Debug)]
pub struct DeleteStmt {
    /// Target table
    target: Source,
    /// USING tables
    using: Option<FromList>,
    /// WHERE predicates, AND-ed
    where_clause: Option<Predicate>,
    /// RETURNING list
    returning: Option<SelectList>,
}

impl DeleteStmt {
    /// Delete from `target`.
    pub fn new(target: &Source) -> Self {
        Self {
            target: target.clone(),
            using: None,
            where_clause: None,
            returning: None,
        }
    }

    /// An independent copy sharing expression trees.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Append USING tables.
    pub fn using<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TableExpr>,
    {
        self.using.get_or_insert_with(FromList::default).extend(items);
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

    /// Sources referenced by WHERE and RETURNING.
    pub fn referenced_sources(&self) -> SourceSet {
        let mut set = SourceSet::new();
        if let Some(pred) = &self.where_clause {
            pred.collect_sources(&mut set);
        }
        if let Some(list) = &self.returning {
            list.0.collect_sources(&mut set);
        }
        set
    }

    /// Referenced sources that are neither the target nor in USING.
    pub fn inferred_using(&self) -> Vec<Source> {
        let mut declared = SourceSet::new();
        declared.insert(self.target.clone());
        if let Some(using) = &self.using {
            using.collect_declared(&mut declared);
        }
        missing_sources(&self.referenced_sources(), &declared)
    }
}

impl SqlStatement for DeleteStmt {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn write_sql(&self, ctx: &mut RenderContext) -> QbResult<()> {
        let inferred = if ctx.options().auto_from {
            self.inferred_using()
        } else {
            Vec::new()
        };
        ctx.with_state(RenderState::Reference, |ctx| {
            ctx.push_str("DELETE FROM ");
            self.target.write_declaration(ctx)?;
            ctx.push(' ');
            match &self.using {
                Some(using) => using.write_sql("USING", &inferred, ctx)?,
                None => FromList::default().write_sql("USING", &inferred, ctx)?,
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

/// Start a DELETE statement.
pub fn delete_from(target: &Source) -> DeleteStmt {
    DeleteStmt::new(target)
}
