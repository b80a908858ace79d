//! # pgqb
//!
//! An expression-tree query builder for PostgreSQL.
//!
//! ## Features
//!
//! - **Typed expression trees**: columns, literals, arguments and operators
//!   compose into immutable, shareable nodes
//! - **Deterministic text**: nested operators are always parenthesized, so the
//!   rendered SQL never depends on operator precedence
//! - **FROM inference**: referenced tables are added to FROM (or USING) at
//!   render time, including tables referenced from correlated sub-queries
//! - **Placeholders**: `$1, $2, ...` numbered per argument tag, or `:tag`
//! - **No I/O**: rendering produces text plus the argument slot list; running
//!   it is up to the caller
//!
//! ## Query Builder (qb)
//!
//! ```
//! use pgqb::prelude::*;
//!
//! let school = table("school");
//! let city = table("city");
//!
//! let stmt = select([school.column("name")])
//!     .where_(exists(
//!         &select([city.column("name")])
//!             .from([&city])
//!             .where_(city.column("name").eq(school.column("city"))),
//!     ))
//!     .order_by([school.column("enrollment").desc()])
//!     .limit(30);
//!
//! assert_eq!(
//!     stmt.to_sql().unwrap(),
//!     concat!(
//!         r#"SELECT "school"."name" FROM "school" "#,
//!         r#"WHERE EXISTS (SELECT "city"."name" FROM "city" WHERE "city"."name" = "school"."city") "#,
//!         r#"ORDER BY "school"."enrollment" DESC LIMIT 30"#,
//!     )
//! );
//! ```
//!
//! ## Logging
//!
//! Every top-level render emits a `debug` event on target `pgqb.sql`; each
//! table added by FROM inference emits a `trace` event on `pgqb.auto_from`.
//! The crate installs no subscriber.

pub mod catalog;
pub mod context;
pub mod error;
pub mod ident;
pub mod literal;
pub mod prelude;
pub mod qb;

pub use context::{PlaceholderStyle, RenderContext, RenderOptions, RenderState, Rendered, SourceSet};
pub use error::{QbError, QbResult};
pub use ident::quote_ident;
pub use literal::{ToLiteral, json_literal};

// Re-export qb module for easy access
pub use qb::{
    DeleteStmt, Expr, ExprOps, InsertStmt, IntoExpr, SelectStmt, Source, SqlStatement, TableExpr,
    UpdateStmt, delete_from, insert_into, select, table, table_in, update,
};
