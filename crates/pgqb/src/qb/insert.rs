//! INSERT statement.

use crate::context::RenderContext;
use crate::error::{QbError, QbResult};
use crate::qb::clause::{
    ColumnName, ConflictAction, OnConflict, Predicate, SelectList, SetList, write_name_list,
};
use crate::qb::expr::{Expr, IntoExpr};
use crate::qb::select::SelectStmt;
use crate::qb::source::{Source, SourceKind};
use crate::qb::traits::{SqlStatement, StatementKind};

#[derive(Clone, Debug)]
enum InsertSource {
    Values(Vec<Vec<Expr>>),
    Select(Box<SelectStmt>),
    DefaultValues,
}

impl InsertSource {
    fn describe(&self) -> &'static str {
        match self {
            InsertSource::Values(_) => "VALUES",
            InsertSource::Select(_) => "a SELECT",
            InsertSource::DefaultValues => "DEFAULT VALUES",
        }
    }
}

/// INSERT statement builder.
///
/// Exactly one value source is allowed: VALUES rows, a SELECT, or
/// DEFAULT VALUES. Misuse (a second kind of source, a VALUES row whose
/// length differs from the column list) is recorded and reported by
/// [`SqlStatement::render`] as [`QbError::Build`].
///
/// FROM inference does not apply to INSERT.
#[derive(Clone, Debug)]
pub struct InsertStmt {
    /// Target table
    target: Source,
    /// Column list (unqualified)
    columns: Vec<String>,
    /// Value source
    source: Option<InsertSource>,
    /// ON CONFLICT clause
    on_conflict: Option<OnConflict>,
    /// RETURNING list
    returning: Option<SelectList>,
    /// First recorded build error
    build_error: Option<String>,
}

impl InsertStmt {
    /// Insert into `target`, listing `columns`. An empty list omits the column list.
    pub fn new<I>(target: &Source, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: ColumnName,
    {
        let mut stmt = Self {
            target: target.clone(),
            columns: columns.into_iter().map(ColumnName::column_name).collect(),
            source: None,
            on_conflict: None,
            returning: None,
            build_error: None,
        };
        if matches!(target.kind(), SourceKind::SubQuery { .. } | SourceKind::Excluded) {
            stmt.record_error(format!("cannot INSERT INTO \"{}\": not a table", target.name()));
        }
        stmt
    }

    /// An independent copy sharing expression trees.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    fn record_error(&mut self, message: impl Into<String>) {
        if self.build_error.is_none() {
            self.build_error = Some(message.into());
        }
    }

    fn set_source(&mut self, source: InsertSource) {
        match &self.source {
            Some(existing) => {
                let message = format!(
                    "INSERT already has {} as its value source, cannot add {}",
                    existing.describe(),
                    source.describe()
                );
                self.record_error(message);
            }
            None => self.source = Some(source),
        }
    }

    // ==================== Value sources ====================

    /// Append one VALUES row.
    pub fn values<I>(mut self, row: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let row: Vec<Expr> = row.into_iter().map(IntoExpr::into_expr).collect();
        if row.is_empty() {
            self.record_error("VALUES row has no values");
            return self;
        }
        let expected = match &self.source {
            Some(InsertSource::Values(rows)) if self.columns.is_empty() => rows.first().map(Vec::len),
            _ if !self.columns.is_empty() => Some(self.columns.len()),
            _ => None,
        };
        if let Some(expected) = expected
            && row.len() != expected
        {
            self.record_error(format!(
                "VALUES row has {} values, expected {expected}",
                row.len()
            ));
            return self;
        }
        match &mut self.source {
            Some(InsertSource::Values(rows)) => rows.push(row),
            _ => self.set_source(InsertSource::Values(vec![row])),
        }
        self
    }

    /// Insert the rows produced by `stmt`. The statement is snapshotted.
    pub fn select(mut self, stmt: &SelectStmt) -> Self {
        self.set_source(InsertSource::Select(Box::new(stmt.snapshot())));
        self
    }

    /// Insert a single row of column defaults.
    pub fn default_values(mut self) -> Self {
        self.set_source(InsertSource::DefaultValues);
        self
    }

    // ==================== Conflicts and output ====================

    /// Start an ON CONFLICT clause on `targets` (rendered unqualified).
    pub fn on_conflict<I>(self, targets: I) -> OnConflictBuilder
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        OnConflictBuilder {
            stmt: self,
            targets: targets.into_iter().map(IntoExpr::into_expr).collect(),
        }
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

    fn write_target(&self, ctx: &mut RenderContext) -> QbResult<()> {
        match self.target.kind() {
            // INSERT requires AS before a target alias.
            SourceKind::Alias { source, alias } => {
                source.write_declaration(ctx)?;
                ctx.push_str(" AS ");
                ctx.push_ident(alias);
                Ok(())
            }
            _ => self.target.write_declaration(ctx),
        }
    }
}

impl SqlStatement for InsertStmt {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn build_error(&self) -> Option<&str> {
        self.build_error.as_deref()
    }

    fn write_sql(&self, ctx: &mut RenderContext) -> QbResult<()> {
        if let Some(err) = &self.build_error {
            return Err(QbError::build(err.clone()));
        }
        ctx.push_str("INSERT INTO ");
        self.write_target(ctx)?;
        ctx.push(' ');
        if !self.columns.is_empty() {
            write_name_list(&self.columns, ctx);
            ctx.push(' ');
        }
        match &self.source {
            Some(InsertSource::Values(rows)) => {
                ctx.push_str("VALUES ");
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        ctx.push_str(", ");
                    }
                    ctx.push('(');
                    for (j, value) in row.iter().enumerate() {
                        if j > 0 {
                            ctx.push_str(", ");
                        }
                        value.write_sql(ctx)?;
                    }
                    ctx.push(')');
                }
                ctx.push(' ');
            }
            Some(InsertSource::Select(stmt)) => stmt.write_sql(ctx)?,
            Some(InsertSource::DefaultValues) => ctx.push_str("DEFAULT VALUES "),
            None => {
                return Err(QbError::build(
                    "INSERT requires VALUES, a SELECT or DEFAULT VALUES",
                ));
            }
        }
        if let Some(conflict) = &self.on_conflict {
            conflict.write_sql(ctx)?;
        }
        if let Some(list) = &self.returning {
            list.write_sql("RETURNING", ctx)?;
        }
        Ok(())
    }
}

/// Pending ON CONFLICT clause; finish it with an action.
#[derive(Debug)]
#[must_use = "an ON CONFLICT clause needs DO NOTHING or DO UPDATE"]
pub struct OnConflictBuilder {
    stmt: InsertStmt,
    targets: Vec<Expr>,
}

impl OnConflictBuilder {
    /// `ON CONFLICT (...) DO NOTHING`
    pub fn do_nothing(mut self) -> InsertStmt {
        self.stmt.on_conflict = Some(OnConflict {
            targets: self.targets,
            action: ConflictAction::Nothing,
        });
        self.stmt
    }

    /// `ON CONFLICT (...) DO UPDATE SET ... [WHERE ...]`
    pub fn do_update(mut self, update: ConflictUpdate) -> InsertStmt {
        if update.set.is_empty() {
            self.stmt
                .record_error("ON CONFLICT DO UPDATE requires at least one SET assignment");
        }
        if self.targets.is_empty() {
            self.stmt
                .record_error("ON CONFLICT DO UPDATE requires a conflict target");
        }
        self.stmt.on_conflict = Some(OnConflict {
            targets: self.targets,
            action: ConflictAction::Update {
                set: update.set,
                predicate: update.predicate,
            },
        });
        self.stmt
    }
}

/// The DO UPDATE part of an upsert.
///
/// Use [`Source::excluded`] to refer to the row proposed for insertion.
#[derive(Clone, Debug, Default)]
pub struct ConflictUpdate {
    set: SetList,
    predicate: Predicate,
}

impl ConflictUpdate {
    /// An empty DO UPDATE action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `column`. A repeated column keeps the last value.
    pub fn set(mut self, column: impl ColumnName, value: impl IntoExpr) -> Self {
        self.set.set(column.column_name(), value.into_expr());
        self
    }

    /// Restrict the update. Repeated calls are combined with AND.
    pub fn where_(mut self, predicate: impl IntoExpr) -> Self {
        self.predicate.push(predicate.into_expr());
        self
    }
}

/// Start an INSERT statement.
pub fn insert_into<I>(target: &Source, columns: I) -> InsertStmt
where
    I: IntoIterator,
    I::Item: ColumnName,
{
    InsertStmt::new(target, columns)
}
