//! Query builder for pgqb.
//!
//! Statements are assembled from expression and table nodes, then rendered
//! to PostgreSQL text in a single pass.
//!
//! # Features
//!
//! - **Expression algebra**: immutable, shareable nodes with explicit
//!   parenthesization of nested operators
//! - **FROM inference**: tables referenced by columns are added to FROM
//!   (UPDATE: FROM, DELETE: USING) when missing
//! - **Argument numbering**: `$N` assigned per tag on first use, or `:tag`
//! - **Snapshots**: statements are `Clone`; copies share expression trees
//!
//! # Usage
//!
//! ```
//! use pgqb::prelude::*;
//!
//! let school = table("school");
//! let name = school.column("name");
//! let city = school.column("city");
//!
//! // SELECT
//! let sql = select([&name, &city])
//!     .where_(city.clone().ne("New York City"))
//!     .to_sql()
//!     .unwrap();
//! assert_eq!(
//!     sql,
//!     r#"SELECT "school"."name", "school"."city" FROM "school" WHERE "school"."city" != 'New York City'"#
//! );
//!
//! // INSERT
//! let sql = insert_into(&school, [&name, &city])
//!     .values([lit("Abc"), arg("x")])
//!     .on_conflict([&name])
//!     .do_nothing()
//!     .to_sql()
//!     .unwrap();
//! assert_eq!(
//!     sql,
//!     r#"INSERT INTO "school" ("name","city") VALUES ('Abc', $1) ON CONFLICT ("name") DO NOTHING"#
//! );
//!
//! // DELETE
//! let sql = delete_from(&school).where_(name.eq(arg("name"))).to_sql().unwrap();
//! assert_eq!(sql, r#"DELETE FROM "school" WHERE "school"."name" = $1"#);
//! ```

mod clause;
mod delete;
mod expr;
mod insert;
mod ops;
mod param;
mod select;
mod source;
mod traits;
mod update;


pub use clause::{ColumnName, OrderExpr};
pub use delete::{DeleteStmt, delete_from};
pub use expr::{
    Column, Expr, ExprOps, FunctionFactory, IntoExpr, abs, all, and, any, arg, array,
    default_value, exists, factorial, func, function_factory, group, lit, neg, not, null, or, raw,
    some, star, tuple,
};
pub use insert::{ConflictUpdate, InsertStmt, OnConflictBuilder, insert_into};
pub use ops::{BinaryOp, Direction, Fixity, JoinKind, LogicalOp, SubQueryOp, UnaryOp};
pub use param::{Bindings, Param, params_ref};
pub use select::{SelectStmt, select};
pub use source::{Join, Joinable, Source, TableExpr, subquery, table, table_in};
pub use traits::{SqlStatement, StatementKind};
pub use update::{UpdateStmt, update};
