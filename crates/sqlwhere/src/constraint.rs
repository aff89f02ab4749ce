//! ORDER BY / LIMIT / OFFSET / TOP constraints.
//!
//! Unlike [`Expression`](crate::Expression), a [`QueryConstraint`] is a
//! fluent builder: each call extends the same value and hands it back.
//!
//! ```
//! use sqlwhere::{order_by, Dialect};
//!
//! let qc = order_by(["foo", "bar"]).desc().order_by(["baz"]).asc().limit(10).offset(20);
//! assert_eq!(
//!     qc.format(Dialect::Sqlite),
//!     r#" ORDER BY "foo" DESC, "bar" DESC, "baz" ASC LIMIT 10 OFFSET 20"#
//! );
//!
//! // SQL Server puts the limit after SELECT instead.
//! assert_eq!(qc.format_top(Dialect::SqlServer), " TOP (10)");
//! assert_eq!(
//!     qc.format(Dialect::SqlServer),
//!     r#" ORDER BY "foo" DESC, "bar" DESC, "baz" ASC OFFSET 20"#
//! );
//! ```

use crate::dialect::Dialect;
use crate::quote::Quoter;
use std::fmt;

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    fn to_sql(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// NULLS ordering for ORDER BY. Applies to the whole clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

impl NullsOrder {
    fn to_sql(self) -> &'static str {
        match self {
            NullsOrder::First => "NULLS FIRST",
            NullsOrder::Last => "NULLS LAST",
        }
    }
}

/// One ORDER BY column. `dir` is `None` until `asc`/`desc` (or a later `order_by`) sets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingTerm {
    pub column: String,
    pub dir: Option<SortDir>,
}

/// Accumulated ORDER BY, NULLS, LIMIT and OFFSET settings.
///
/// A zero limit or offset means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryConstraint {
    order_by: Vec<OrderingTerm>,
    nulls: Option<NullsOrder>,
    limit: u64,
    offset: u64,
}

/// Start a constraint that sorts by `columns`.
///
/// Columns are quoted when formatting; never pass untrusted text here.
pub fn order_by<I>(columns: I) -> QueryConstraint
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    QueryConstraint::new().order_by(columns)
}

/// Start a constraint with a row limit. Zero means no limit.
pub fn limit(n: u64) -> QueryConstraint {
    QueryConstraint::new().limit(n)
}

/// Start a constraint that skips the first `n` rows.
pub fn offset(n: u64) -> QueryConstraint {
    QueryConstraint::new().offset(n)
}

impl QueryConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append sort columns.
    ///
    /// Earlier columns still without a direction become ascending, so a
    /// following `asc`/`desc` only affects the columns added here.
    pub fn order_by<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for term in &mut self.order_by {
            if term.dir.is_none() {
                term.dir = Some(SortDir::Asc);
            }
        }
        self.order_by
            .extend(columns.into_iter().map(|c| OrderingTerm {
                column: c.into(),
                dir: None,
            }));
        self
    }

    /// Sort ascending by the trailing columns that have no direction yet.
    pub fn asc(self) -> Self {
        self.set_direction(SortDir::Asc)
    }

    /// Sort descending by the trailing columns that have no direction yet.
    pub fn desc(self) -> Self {
        self.set_direction(SortDir::Desc)
    }

    fn set_direction(mut self, dir: SortDir) -> Self {
        for term in self.order_by.iter_mut().rev() {
            if term.dir.is_some() {
                break;
            }
            term.dir = Some(dir);
        }
        self
    }

    /// Put nulls before non-null values. By default nulls sort as if larger
    /// than any value, i.e. first for DESC and last for ASC.
    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsOrder::First);
        self
    }

    /// Put nulls after non-null values.
    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsOrder::Last);
        self
    }

    /// Set the row limit. Zero removes it.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = n;
        self
    }

    /// Set the number of rows to skip. Zero removes it.
    ///
    /// Usually only meaningful with an explicit ordering.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = n;
        self
    }

    pub fn ordering(&self) -> &[OrderingTerm] {
        &self.order_by
    }

    pub fn nulls_order(&self) -> Option<NullsOrder> {
        self.nulls
    }

    pub fn limit_value(&self) -> u64 {
        self.limit
    }

    pub fn offset_value(&self) -> u64 {
        self.offset
    }

    /// True when formatting would produce nothing for any dialect.
    pub fn is_empty(&self) -> bool {
        self.order_by.is_empty() && self.limit == 0 && self.offset == 0
    }

    /// Render `" ORDER BY ... LIMIT n OFFSET m"`, quoting columns the way `dialect` does.
    pub fn format(&self, dialect: Dialect) -> String {
        self.format_with(dialect, dialect.quoter())
    }

    /// Like [`format`](Self::format) with an explicit quoter.
    ///
    /// If any column sorts descending, every column gets an explicit
    /// direction; otherwise none do. `LIMIT` is omitted for dialects that use
    /// `TOP` (see [`format_top`](Self::format_top)).
    pub fn format_with(&self, dialect: Dialect, quoter: &dyn Quoter) -> String {
        let mut out = String::with_capacity(self.estimate_len());

        if !self.order_by.is_empty() {
            out.push_str(" ORDER BY ");
            let explicit = self
                .order_by
                .iter()
                .any(|t| t.dir == Some(SortDir::Desc));

            for (i, term) in self.order_by.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                quoter.quote_into(&mut out, &term.column);
                if explicit {
                    out.push(' ');
                    out.push_str(term.dir.unwrap_or_default().to_sql());
                }
            }

            if let Some(nulls) = self.nulls {
                out.push(' ');
                out.push_str(nulls.to_sql());
            }
        }

        if self.limit > 0 && !dialect.uses_top() {
            out.push_str(" LIMIT ");
            out.push_str(&self.limit.to_string());
        }

        if self.offset > 0 {
            out.push_str(" OFFSET ");
            out.push_str(&self.offset.to_string());
        }

        out
    }

    /// Render `" TOP (n)"` for dialects that limit rows that way, else `""`.
    ///
    /// Insert the result after `SELECT [DISTINCT]` and before the column list.
    pub fn format_top(&self, dialect: Dialect) -> String {
        if !dialect.uses_top() || self.limit == 0 {
            return String::new();
        }
        format!(" TOP ({})", self.limit)
    }

    fn estimate_len(&self) -> usize {
        let mut n = 0;
        if !self.order_by.is_empty() {
            // " ORDER BY" plus a direction and NULLS suffix
            n += 24;
            n += self
                .order_by
                .iter()
                .map(|t| t.column.len() + 9)
                .sum::<usize>();
        }
        if self.limit > 0 {
            n += 27;
        }
        if self.offset > 0 {
            n += 28;
        }
        n
    }
}

/// Formats for the default dialect.
impl fmt::Display for QueryConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Dialect::default()))
    }
}

/// Format an optional constraint; `None` gives `""`.
pub fn build(qc: Option<&QueryConstraint>, dialect: Dialect) -> String {
    qc.map(|qc| qc.format(dialect)).unwrap_or_default()
}

/// Format the `TOP` part of an optional constraint; `None` gives `""`.
pub fn build_top(qc: Option<&QueryConstraint>, dialect: Dialect) -> String {
    qc.map(|qc| qc.format_top(dialect)).unwrap_or_default()
}
