//! Expression layer.
//!
//! [`Expr`] is an immutable, reference-counted tree node. Every operator
//! returns a new parent node and leaves its operands untouched, so a
//! sub-tree can be shared by any number of parents and statements.
//!
//! Rendering goes through a single exhaustive `match` in [`Expr::write_sql`].
//! Binary, unary and logical nodes are *compound*: when one of them is the
//! direct operand of a binary or unary node it is wrapped in parentheses,
//! which makes repeated operators explicitly left-associative:
//!
//! ```
//! use pgqb::prelude::*;
//!
//! let two = lit(2);
//! let sql = two.add(50).add(50).to_sql().unwrap();
//! assert_eq!(sql, "(2 + 50) + 50");
//! ```

use crate::context::{RenderContext, RenderOptions, RenderState, SourceSet};
use crate::error::{QbError, QbResult};
use crate::literal::{ToLiteral, json_literal, tuple_literal};
use crate::qb::clause::OrderExpr;
use crate::qb::ops::{BinaryOp, Direction, Fixity, LogicalOp, SubQueryOp, UnaryOp};
use crate::qb::select::SelectStmt;
use crate::qb::source::Source;
use crate::qb::traits::SqlStatement;
use std::sync::Arc;

/// A column of a column source.
///
/// Renders as `"source"."name"`, or `"name"` where an unqualified name is
/// required.
#[derive(Clone, Debug)]
pub struct Column {
    source: Source,
    name: Arc<str>,
}

impl Column {
    /// A column `name` qualified by `source`.
    pub fn new(source: Source, name: impl Into<String>) -> Self {
        Self {
            source,
            name: Arc::from(name.into()),
        }
    }

    /// The unqualified column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source this column is qualified by.
    pub fn source(&self) -> &Source {
        &self.source
    }

    fn write_sql(&self, ctx: &mut RenderContext) {
        if ctx.state() != RenderState::BareName {
            ctx.push_ident(self.source.name());
            ctx.push('.');
        }
        ctx.push_ident(&self.name);
    }
}

#[derive(Debug)]
pub(crate) enum ExprKind {
    Column(Column),
    Star(Option<Source>),
    Argument(String),
    Literal(String),
    Raw { sql: String, args: Vec<Expr> },
    Group(Expr),
    List(Vec<Expr>),
    Unary { op: UnaryOp, operand: Expr },
    Binary { op: BinaryOp, left: Expr, right: Expr },
    Logical { op: LogicalOp, operands: Vec<Expr> },
    Function { name: String, args: Vec<Expr> },
    Alias { expr: Expr, alias: String },
    SubQuery { op: SubQueryOp, stmt: Box<SelectStmt> },
}

/// An SQL expression node.
///
/// Cloning is cheap and shares the node.
#[derive(Clone, Debug)]
pub struct Expr {
    kind: Arc<ExprKind>,
}

impl Expr {
    fn new(kind: ExprKind) -> Self {
        Self {
            kind: Arc::new(kind),
        }
    }

    /// A literal from any value with a literal representation.
    pub fn literal<T: ToLiteral + ?Sized>(value: &T) -> Self {
        Self::new(ExprKind::Literal(value.to_literal()))
    }

    /// A literal from a dynamically typed JSON value.
    ///
    /// Objects and nested arrays have no literal form and are rejected with
    /// [`QbError::UnsupportedLiteral`].
    pub fn try_literal(value: &serde_json::Value) -> QbResult<Self> {
        json_literal(value).map(|text| Self::new(ExprKind::Literal(text)))
    }

    /// An argument placeholder. The tag is trimmed; an empty tag is anonymous.
    pub fn arg(tag: impl AsRef<str>) -> Self {
        Self::new(ExprKind::Argument(tag.as_ref().trim().to_string()))
    }

    /// Raw SQL. Each `?` outside quotes is replaced by the next argument.
    pub fn raw<I>(sql: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Self::new(ExprKind::Raw {
            sql: sql.into(),
            args: args.into_iter().map(IntoExpr::into_expr).collect(),
        })
    }

    /// Explicit parentheses around `expr`.
    pub fn group(expr: impl IntoExpr) -> Self {
        Self::new(ExprKind::Group(expr.into_expr()))
    }

    /// A parenthesized, comma-separated expression list: `(a, b, c)`.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Self::new(ExprKind::List(
            items.into_iter().map(IntoExpr::into_expr).collect(),
        ))
    }

    /// A function call: `name(args...)`.
    pub fn func<I>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Self::new(ExprKind::Function {
            name: name.into(),
            args: args.into_iter().map(IntoExpr::into_expr).collect(),
        })
    }

    /// Apply a unary operator.
    pub fn unary(op: UnaryOp, operand: impl IntoExpr) -> Self {
        Self::new(ExprKind::Unary {
            op,
            operand: operand.into_expr(),
        })
    }

    /// Apply a binary operator.
    pub fn binary(left: impl IntoExpr, op: BinaryOp, right: impl IntoExpr) -> Self {
        Self::new(ExprKind::Binary {
            op,
            left: left.into_expr(),
            right: right.into_expr(),
        })
    }

    /// A variadic AND/OR. At least one operand is required.
    pub fn logical<I>(op: LogicalOp, operands: I) -> QbResult<Self>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let operands: Vec<Expr> = operands.into_iter().map(IntoExpr::into_expr).collect();
        if operands.is_empty() {
            return Err(QbError::EmptyLogical { op: op.token() });
        }
        Ok(Self::new(ExprKind::Logical { op, operands }))
    }

    /// Infallible constructor for callers that already hold operands.
    pub(crate) fn logical_of(op: LogicalOp, operands: Vec<Expr>) -> Self {
        debug_assert!(!operands.is_empty());
        Self::new(ExprKind::Logical { op, operands })
    }

    pub(crate) fn subquery(op: SubQueryOp, stmt: SelectStmt) -> Self {
        Self::new(ExprKind::SubQuery {
            op,
            stmt: Box::new(stmt),
        })
    }

    pub(crate) fn star_of(source: Option<Source>) -> Self {
        Self::new(ExprKind::Star(source))
    }

    /// Binary, unary and logical nodes.
    pub fn is_compound(&self) -> bool {
        matches!(
            *self.kind,
            ExprKind::Unary { .. } | ExprKind::Binary { .. } | ExprKind::Logical { .. }
        )
    }

    /// The column this expression refers to, if it is a plain column.
    pub fn as_column(&self) -> Option<&Column> {
        match &*self.kind {
            ExprKind::Column(col) => Some(col),
            _ => None,
        }
    }

    /// The alias name, if this is an aliased expression.
    pub fn alias_name(&self) -> Option<&str> {
        match &*self.kind {
            ExprKind::Alias { alias, .. } => Some(alias),
            _ => None,
        }
    }

    /// Render this expression on its own with default options.
    pub fn to_sql(&self) -> QbResult<String> {
        self.to_sql_with(RenderOptions::default())
    }

    /// Render this expression on its own.
    pub fn to_sql_with(&self, options: RenderOptions) -> QbResult<String> {
        let mut ctx = RenderContext::new(options);
        self.write_sql(&mut ctx)?;
        Ok(ctx.into_rendered().sql)
    }

    /// Write this expression into `ctx`.
    pub fn write_sql(&self, ctx: &mut RenderContext) -> QbResult<()> {
        match &*self.kind {
            ExprKind::Column(col) => col.write_sql(ctx),
            ExprKind::Star(source) => match source {
                Some(src) if ctx.state() != RenderState::BareName => {
                    ctx.push_ident(src.name());
                    ctx.push_str(".*");
                }
                _ => ctx.push('*'),
            },
            ExprKind::Argument(tag) => ctx.write_argument(tag)?,
            ExprKind::Literal(text) => ctx.push_str(text),
            ExprKind::Raw { sql, args } => write_raw(sql, args, ctx)?,
            ExprKind::Group(inner) => {
                ctx.push('(');
                write_child(inner, ctx)?;
                ctx.push(')');
            }
            ExprKind::List(items) => {
                ctx.push('(');
                write_comma_list(items, ctx)?;
                ctx.push(')');
            }
            ExprKind::Unary { op, operand } => {
                let (token, fixity) = op.parts();
                match fixity {
                    Fixity::Prefix => {
                        ctx.push_str(token);
                        // Otherwise `@-3` lexes as one operator and `--3` as a comment.
                        if op.spaced() || operand.starts_with_operator_char() {
                            ctx.push(' ');
                        }
                        write_operand(operand, ctx)?;
                    }
                    Fixity::Postfix => {
                        write_operand(operand, ctx)?;
                        if op.spaced() {
                            ctx.push(' ');
                        }
                        ctx.push_str(token);
                    }
                }
            }
            ExprKind::Binary { op, left, right } => {
                write_operand(left, ctx)?;
                ctx.push(' ');
                ctx.push_str(op.token());
                ctx.push(' ');
                write_operand(right, ctx)?;
            }
            ExprKind::Logical { op, operands } => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        ctx.push(' ');
                        ctx.push_str(op.token());
                        ctx.push(' ');
                    }
                    ctx.push('(');
                    write_child(operand, ctx)?;
                    ctx.push(')');
                }
            }
            ExprKind::Function { name, args } => {
                ctx.push_str(name);
                ctx.push('(');
                write_comma_list(args, ctx)?;
                ctx.push(')');
            }
            ExprKind::Alias { expr, alias } => {
                if ctx.state() == RenderState::Declaration {
                    ctx.with_state(RenderState::Reference, |ctx| expr.write_sql(ctx))?;
                    ctx.push(' ');
                }
                ctx.push_ident(alias);
            }
            ExprKind::SubQuery { op, stmt } => {
                ctx.push_str(op.token());
                ctx.push_str(" (");
                ctx.with_auto_from(false, |ctx| stmt.write_sql(ctx))?;
                ctx.trim_trailing_space();
                ctx.push(')');
            }
        }
        Ok(())
    }

    /// Add every column source this expression references to `into`.
    ///
    /// A sub-query contributes only the sources it uses but does not declare
    /// in its own FROM, so correlated sub-queries pull their outer tables
    /// into the enclosing statement.
    pub fn collect_sources(&self, into: &mut SourceSet) {
        match &*self.kind {
            ExprKind::Column(col) => into.insert(col.source().clone()),
            ExprKind::Star(Some(src)) => into.insert(src.clone()),
            ExprKind::Star(None) | ExprKind::Argument(_) | ExprKind::Literal(_) => {}
            ExprKind::Group(inner) => inner.collect_sources(into),
            ExprKind::Unary { operand, .. } => operand.collect_sources(into),
            ExprKind::Binary { left, right, .. } => {
                left.collect_sources(into);
                right.collect_sources(into);
            }
            ExprKind::Raw { args: items, .. }
            | ExprKind::List(items)
            | ExprKind::Logical { operands: items, .. }
            | ExprKind::Function { args: items, .. } => {
                for item in items {
                    item.collect_sources(into);
                }
            }
            ExprKind::Alias { expr, .. } => expr.collect_sources(into),
            ExprKind::SubQuery { stmt, .. } => stmt.collect_outer_sources(into),
        }
    }

    /// Whether the rendered text begins with a character PostgreSQL would
    /// glue onto a preceding symbolic operator.
    fn starts_with_operator_char(&self) -> bool {
        let text = match &*self.kind {
            ExprKind::Literal(text) => text.as_str(),
            ExprKind::Raw { sql, .. } => sql.trim_start(),
            _ => return false,
        };
        text.starts_with(OPERATOR_CHARS)
    }
}

/// Characters that may form a PostgreSQL operator name.
const OPERATOR_CHARS: &[char] = &[
    '+', '-', '*', '/', '<', '>', '=', '~', '!', '@', '#', '%', '^', '&', '|', '`', '?',
];

/// Children of a node never render in declaration state; only the top-level
/// SELECT/RETURNING item declares its alias.
fn write_child(expr: &Expr, ctx: &mut RenderContext) -> QbResult<()> {
    if ctx.state() == RenderState::Declaration {
        ctx.with_state(RenderState::Reference, |ctx| expr.write_sql(ctx))
    } else {
        expr.write_sql(ctx)
    }
}

/// Write a direct operand of a unary/binary node, parenthesizing compounds.
pub(crate) fn write_operand(expr: &Expr, ctx: &mut RenderContext) -> QbResult<()> {
    if expr.is_compound() {
        ctx.push('(');
        write_child(expr, ctx)?;
        ctx.push(')');
        Ok(())
    } else {
        write_child(expr, ctx)
    }
}

fn write_comma_list(items: &[Expr], ctx: &mut RenderContext) -> QbResult<()> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            ctx.push_str(", ");
        }
        write_child(item, ctx)?;
    }
    Ok(())
}

fn write_raw(sql: &str, args: &[Expr], ctx: &mut RenderContext) -> QbResult<()> {
    let mut args = args.iter();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for ch in sql.chars() {
        match quote {
            Some(q) if ch == q && !escaped => quote = None,
            None if (ch == '"' || ch == '\'') && !escaped => quote = Some(ch),
            None if ch == '?' => {
                if let Some(arg) = args.next() {
                    write_child(arg, ctx)?;
                    escaped = false;
                    continue;
                }
            }
            _ => {}
        }
        ctx.push(ch);
        escaped = ch == '\\';
    }
    Ok(())
}

/// Conversion into an expression. Host values become literals.
pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for &Expr {
    fn into_expr(self) -> Expr {
        self.clone()
    }
}

impl IntoExpr for Column {
    fn into_expr(self) -> Expr {
        Expr::new(ExprKind::Column(self))
    }
}

impl IntoExpr for &Column {
    fn into_expr(self) -> Expr {
        self.clone().into_expr()
    }
}

impl From<Column> for Expr {
    fn from(col: Column) -> Self {
        col.into_expr()
    }
}

macro_rules! impl_into_expr_literal {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoExpr for $t {
                fn into_expr(self) -> Expr {
                    Expr::literal(&self)
                }
            }
        )*
    };
}

impl_into_expr_literal!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, String,
    chrono::NaiveDate, chrono::NaiveTime, chrono::NaiveDateTime, uuid::Uuid,
);

#[cfg(feature = "rust_decimal")]
impl_into_expr_literal!(rust_decimal::Decimal);

impl IntoExpr for &str {
    fn into_expr(self) -> Expr {
        Expr::literal(self)
    }
}

impl IntoExpr for &String {
    fn into_expr(self) -> Expr {
        Expr::literal(self.as_str())
    }
}

impl<Tz: chrono::TimeZone> IntoExpr for chrono::DateTime<Tz>
where
    Tz::Offset: std::fmt::Display,
{
    fn into_expr(self) -> Expr {
        Expr::literal(&self)
    }
}

impl<T: ToLiteral> IntoExpr for Option<T> {
    fn into_expr(self) -> Expr {
        Expr::literal(&self)
    }
}

impl<T: ToLiteral> IntoExpr for Vec<T> {
    fn into_expr(self) -> Expr {
        Expr::literal(&self)
    }
}

/// The operator surface shared by expressions and columns.
///
/// Every method consumes its receiver (clones of [`Expr`] are cheap) and
/// returns a new node.
pub trait ExprOps: IntoExpr + Sized {
    fn add(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Add, rhs)
    }

    fn sub(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Sub, rhs)
    }

    fn mul(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Mul, rhs)
    }

    fn div(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Div, rhs)
    }

    fn modulo(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Mod, rhs)
    }

    /// Exponentiation (`^`).
    fn pow(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Exp, rhs)
    }

    fn is(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Is, rhs)
    }

    fn is_not(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::IsNot, rhs)
    }

    fn is_null(self) -> Expr {
        self.is(null())
    }

    fn is_not_null(self) -> Expr {
        self.is_not(null())
    }

    fn gt(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Gt, rhs)
    }

    fn gte(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Gte, rhs)
    }

    fn lt(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Lt, rhs)
    }

    fn lte(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Lte, rhs)
    }

    fn eq(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Eq, rhs)
    }

    fn ne(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Ne, rhs)
    }

    fn like(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Like, rhs)
    }

    fn not_like(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::NotLike, rhs)
    }

    fn similar(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Similar, rhs)
    }

    fn not_similar(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::NotSimilar, rhs)
    }

    /// POSIX regex match: `~`, or `~*` when `case_insensitive`.
    fn matches(self, rhs: impl IntoExpr, case_insensitive: bool) -> Expr {
        let op = if case_insensitive {
            BinaryOp::IMatch
        } else {
            BinaryOp::Match
        };
        Expr::binary(self, op, rhs)
    }

    /// Negated POSIX regex match: `!~`, or `!~*` when `case_insensitive`.
    fn not_matches(self, rhs: impl IntoExpr, case_insensitive: bool) -> Expr {
        let op = if case_insensitive {
            BinaryOp::NotIMatch
        } else {
            BinaryOp::NotMatch
        };
        Expr::binary(self, op, rhs)
    }

    /// `@>`
    fn contains(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Contains, rhs)
    }

    /// `<@`
    fn contained_by(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::ContainedBy, rhs)
    }

    /// `||`
    fn union(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Union, rhs)
    }

    /// `&&`
    fn intersect(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::Intersect, rhs)
    }

    fn in_(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::In, rhs)
    }

    fn not_in(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::NotIn, rhs)
    }

    fn bit_and(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::BitAnd, rhs)
    }

    fn bit_or(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::BitOr, rhs)
    }

    fn bit_xor(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::BitXor, rhs)
    }

    fn left_shift(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::LeftShift, rhs)
    }

    fn right_shift(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self, BinaryOp::RightShift, rhs)
    }

    /// Two-operand AND.
    fn and(self, rhs: impl IntoExpr) -> Expr {
        Expr::logical_of(LogicalOp::And, vec![self.into_expr(), rhs.into_expr()])
    }

    /// Two-operand OR.
    fn or(self, rhs: impl IntoExpr) -> Expr {
        Expr::logical_of(LogicalOp::Or, vec![self.into_expr(), rhs.into_expr()])
    }

    /// Name this expression. In a SELECT or RETURNING list it renders as
    /// `<expr> "name"`; everywhere else as `"name"`.
    fn alias(self, name: impl Into<String>) -> Expr {
        Expr::new(ExprKind::Alias {
            expr: self.into_expr(),
            alias: name.into(),
        })
    }

    fn asc(self) -> OrderExpr {
        OrderExpr::new(self, Direction::Asc)
    }

    fn desc(self) -> OrderExpr {
        OrderExpr::new(self, Direction::Desc)
    }
}

impl ExprOps for Expr {}
impl ExprOps for &Expr {}
impl ExprOps for Column {}
impl ExprOps for &Column {}

/// A literal expression.
pub fn lit<T: ToLiteral>(value: T) -> Expr {
    Expr::literal(&value)
}

/// `NULL`
pub fn null() -> Expr {
    Expr::new(ExprKind::Literal("NULL".to_string()))
}

/// `DEFAULT`, for INSERT values and UPDATE SET.
pub fn default_value() -> Expr {
    Expr::raw("DEFAULT", Vec::<Expr>::new())
}

/// An argument placeholder.
pub fn arg(tag: impl AsRef<str>) -> Expr {
    Expr::arg(tag)
}

/// An array literal: `'{a, b}'`.
pub fn array<T: ToLiteral>(values: &[T]) -> Expr {
    Expr::literal(values)
}

/// A tuple literal: `(a, b)`.
pub fn tuple<T: ToLiteral>(values: &[T]) -> Expr {
    Expr::new(ExprKind::Literal(tuple_literal(values)))
}

/// An unqualified `*`.
pub fn star() -> Expr {
    Expr::star_of(None)
}

/// Explicit parentheses.
pub fn group(expr: impl IntoExpr) -> Expr {
    Expr::group(expr)
}

/// A function call.
pub fn func<I>(name: impl Into<String>, args: I) -> Expr
where
    I: IntoIterator,
    I::Item: IntoExpr,
{
    Expr::func(name, args)
}

/// Raw SQL with `?` holes.
pub fn raw<I>(sql: impl Into<String>, args: I) -> Expr
where
    I: IntoIterator,
    I::Item: IntoExpr,
{
    Expr::raw(sql, args)
}

/// Variadic AND; every operand is parenthesized.
pub fn and<I>(operands: I) -> QbResult<Expr>
where
    I: IntoIterator,
    I::Item: IntoExpr,
{
    Expr::logical(LogicalOp::And, operands)
}

/// Variadic OR; every operand is parenthesized.
pub fn or<I>(operands: I) -> QbResult<Expr>
where
    I: IntoIterator,
    I::Item: IntoExpr,
{
    Expr::logical(LogicalOp::Or, operands)
}

/// `NOT (expr)`
pub fn not(expr: impl IntoExpr) -> Expr {
    Expr::unary(UnaryOp::Not, Expr::group(expr))
}

/// `-expr`
pub fn neg(expr: impl IntoExpr) -> Expr {
    Expr::unary(UnaryOp::Neg, expr)
}

/// `@expr`
pub fn abs(expr: impl IntoExpr) -> Expr {
    Expr::unary(UnaryOp::Abs, expr)
}

/// `expr!`
pub fn factorial(expr: impl IntoExpr) -> Expr {
    Expr::unary(UnaryOp::Factorial, expr)
}

/// `EXISTS (<select>)`
pub fn exists(stmt: &SelectStmt) -> Expr {
    Expr::subquery(SubQueryOp::Exists, stmt.snapshot())
}

/// `ALL (<select>)`
pub fn all(stmt: &SelectStmt) -> Expr {
    Expr::subquery(SubQueryOp::All, stmt.snapshot())
}

/// `SOME (<select>)`
pub fn some(stmt: &SelectStmt) -> Expr {
    Expr::subquery(SubQueryOp::Some, stmt.snapshot())
}

/// `ANY (<select>)`
pub fn any(stmt: &SelectStmt) -> Expr {
    Expr::subquery(SubQueryOp::Any, stmt.snapshot())
}

/// A reusable constructor for calls to one function.
///
/// # Example
/// ```
/// use pgqb::prelude::*;
///
/// let max = FunctionFactory::new("max");
/// assert_eq!(max.call([lit(1), lit(2)]).to_sql().unwrap(), "max(1, 2)");
/// ```
#[derive(Clone, Debug)]
pub struct FunctionFactory {
    name: String,
}

impl FunctionFactory {
    /// A factory for calls to `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call the function with `args`.
    pub fn call<I>(&self, args: I) -> Expr
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Expr::func(self.name.clone(), args)
    }

    /// Call with no arguments: `name()`.
    pub fn call0(&self) -> Expr {
        Expr::func(self.name.clone(), Vec::<Expr>::new())
    }
}

/// Shorthand for [`FunctionFactory::new`].
pub fn function_factory(name: impl Into<String>) -> FunctionFactory {
    FunctionFactory::new(name)
}
