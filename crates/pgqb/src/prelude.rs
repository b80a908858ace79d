//! Convenient imports for typical `pgqb` usage.
//!
//! ```
//! use pgqb::prelude::*;
//! ```

pub use crate::{PlaceholderStyle, QbError, QbResult, RenderOptions, Rendered, ToLiteral};

pub use crate::qb::{
    Bindings, Column, ConflictUpdate, DeleteStmt, Direction, Expr, ExprOps, FunctionFactory,
    InsertStmt, IntoExpr, JoinKind, Joinable, OrderExpr, Param, SelectStmt, Source, SqlStatement,
    TableExpr, UpdateStmt,
};

pub use crate::qb::{
    abs, all, and, any, arg, array, default_value, delete_from, exists, factorial, func,
    function_factory, group, insert_into, lit, neg, not, null, or, raw, select, some, star,
    subquery, table, table_in, tuple, update,
};
