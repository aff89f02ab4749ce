//! # sqlwhere
//!
//! Composable WHERE/HAVING expressions and ORDER BY/LIMIT/OFFSET constraints
//! for dynamic SQL.
//!
//! ## Features
//!
//! - **Expressions**: leaf conditions (`eq`, `in_list`, `between`, ...) combined
//!   with `and`/`or`/`not`. Optional filters simply become no-ops.
//! - **Dialects**: `?`, `$n` or `@pn` placeholders, ANSI/back-tick/bracket
//!   identifier quoting, or fully inlined values for logging.
//! - **Query constraints**: ORDER BY with per-group directions, NULLS FIRST/LAST,
//!   LIMIT/OFFSET and SQL Server `TOP`.
//! - **No execution**: everything renders to a string plus an argument list.
//!   With the `postgres` feature the arguments bind directly in tokio-postgres.
//!
//! ## Example
//!
//! ```
//! use sqlwhere::{and, eq, gt, in_list, not, order_by, where_clause, Dialect, FormatOptions};
//!
//! let name: Option<&str> = Some("Fred");
//! let filter = and([
//!     name.map(|n| eq("name", n)),
//!     Some(gt("age", 18)),
//!     Some(not(in_list("status", ["banned", "deleted"]))),
//! ]);
//!
//! let (wh, args) = where_clause(&filter, &FormatOptions::from(Dialect::Postgres));
//! let qc = order_by(["created_at"]).desc().limit(20);
//!
//! let sql = format!("SELECT * FROM users{wh}{}", qc.format(Dialect::Postgres));
//! assert_eq!(
//!     sql,
//!     r#"SELECT * FROM users WHERE ("name"=$1) AND ("age">$2) AND (NOT ("status" IN ($3,$4))) ORDER BY "created_at" DESC LIMIT 20"#
//! );
//! assert_eq!(args.len(), 4);
//! ```

pub mod constraint;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod prelude;
pub mod quote;
pub mod value;

pub use constraint::{NullsOrder, OrderingTerm, QueryConstraint, SortDir, limit, offset, order_by};
pub use dialect::{Dialect, FormatOption, FormatOptions, PlaceholderStyle, QuoteStyle};
pub use error::{WhereError, WhereResult};
pub use expr::{
    Clause, Condition, Conjunction, Expression, and, between, eq, gt, gt_eq, having_clause,
    in_list, in_slice, inline_placeholders, like, literal, lt, lt_eq, no_op, not, not_eq,
    not_null, null, or, predicate, replace_placeholders, try_in_slice, where_clause,
};
pub use quote::Quoter;
pub use value::Value;
