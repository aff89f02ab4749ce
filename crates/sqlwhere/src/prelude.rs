//! Convenient imports for typical `sqlwhere` usage.
//!
//! ```
//! use sqlwhere::prelude::*;
//!
//! let (sql, _) = where_clause(&eq("id", 1), &FormatOptions::default());
//! assert_eq!(sql, " WHERE id=?");
//! ```

pub use crate::{
    Dialect, Expression, FormatOptions, QueryConstraint, Value, WhereError, WhereResult, and,
    between, eq, gt, gt_eq, having_clause, in_list, in_slice, like, limit, lt, lt_eq, no_op, not,
    not_eq, not_null, null, offset, or, order_by, where_clause,
};
pub use crate::values;
