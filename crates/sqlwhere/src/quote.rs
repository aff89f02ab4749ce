//! Identifier quoting.
//!
//! A [`Quoter`] wraps column names in the quote marks a dialect expects:
//!
//! - double quotes for ANSI SQL (PostgreSQL, SQLite),
//! - back-ticks for MySQL,
//! - square brackets for SQL Server,
//! - or nothing at all.
//!
//! Dotted identifiers such as `excluded.created_at` are quoted segment by
//! segment: `"excluded"."created_at"`. Each segment must look like a plain
//! identifier (a letter followed by letters, digits or `_`); if any segment
//! does not, the whole string is passed through unaltered. This is not a SQL
//! parser and makes no attempt to fix up arbitrary expressions.
//!
//! # Example
//! ```
//! use sqlwhere::quote::{self, Quoter};
//!
//! assert_eq!(quote::ANSI.quote("p.name"), r#""p"."name""#);
//! assert_eq!(quote::pick("mysql").quote("name"), "`name`");
//! assert_eq!(quote::NONE.quote("p.name"), "p.name");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static VALID_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{L}[\p{L}\p{N}_]*$").expect("identifier pattern is valid")
});

/// Maps identifier text to its quoted form.
///
/// Implementations must be cheap to share; rendering borrows them as `&dyn Quoter`.
pub trait Quoter: fmt::Debug + Send + Sync {
    /// Append the quoted identifier to `out`. Empty identifiers append nothing.
    fn quote_into(&self, out: &mut String, identifier: &str);

    /// Render an identifier within quote marks.
    fn quote(&self, identifier: &str) -> String {
        let mut out = String::with_capacity(identifier.len() + 4);
        self.quote_into(&mut out, identifier);
        out
    }
}

/// Leaves identifiers unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoQuoter;

impl Quoter for NoQuoter {
    fn quote_into(&self, out: &mut String, identifier: &str) {
        out.push_str(identifier);
    }
}

/// Wraps every segment of an identifier in fixed delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedQuoter {
    before: &'static str,
    between: &'static str,
    after: &'static str,
}

impl DelimitedQuoter {
    /// Create a quoter. `between` is written between segments, e.g. `"."` for ANSI.
    pub const fn new(before: &'static str, between: &'static str, after: &'static str) -> Self {
        Self {
            before,
            between,
            after,
        }
    }
}

impl Quoter for DelimitedQuoter {
    fn quote_into(&self, out: &mut String, identifier: &str) {
        if identifier.is_empty() {
            return;
        }

        if !identifier.split('.').all(|seg| VALID_SEGMENT.is_match(seg)) {
            out.push_str(identifier);
            return;
        }

        out.push_str(self.before);
        for (i, seg) in identifier.split('.').enumerate() {
            if i > 0 {
                out.push_str(self.between);
            }
            out.push_str(seg);
        }
        out.push_str(self.after);
    }
}

/// Leaves identifiers unchanged.
pub const NONE: NoQuoter = NoQuoter;

/// Double quotes, as in ANSI SQL (PostgreSQL, SQLite).
pub const ANSI: DelimitedQuoter = DelimitedQuoter::new("\"", "\".\"", "\"");

/// Back-ticks, as in MySQL.
pub const BACKTICKS: DelimitedQuoter = DelimitedQuoter::new("`", "`.`", "`");

/// Square brackets, as in SQL Server.
pub const SQUARE_BRACKETS: DelimitedQuoter = DelimitedQuoter::new("[", "].[", "]");

/// Pick a quoter by name, ignoring case.
///
/// Accepts "ansi", "backtick"/"backticks" and "none" as well as dialect names
/// ("postgres", "sqlite", "sqlite3", "mysql", "mssql", "ms-sql", "sql-server").
/// Unknown names give [`NONE`].
pub fn pick(name: &str) -> &'static dyn Quoter {
    match name.to_ascii_lowercase().as_str() {
        "ansi" | "postgres" | "sqlite" | "sqlite3" => &ANSI,
        "backtick" | "backticks" | "mysql" => &BACKTICKS,
        "mssql" | "ms-sql" | "sql-server" => &SQUARE_BRACKETS,
        _ => &NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifier_is_empty() {
        for name in ["none", "ansi", "mysql", "mssql"] {
            assert_eq!(pick(name).quote(""), "", "{name}");
        }
    }

    #[test]
    fn simple_identifier() {
        assert_eq!(pick("none").quote("ccc"), "ccc");
        assert_eq!(pick("ansi").quote("ccc"), r#""ccc""#);
        assert_eq!(pick("postgres").quote("ccc"), r#""ccc""#);
        assert_eq!(pick("sqlite").quote("ccc"), r#""ccc""#);
        assert_eq!(pick("mysql").quote("ccc"), "`ccc`");
        assert_eq!(pick("ms-sql").quote("ccc"), "[ccc]");
    }

    #[test]
    fn dotted_identifier() {
        assert_eq!(pick("none").quote("a.ccc.ddd"), "a.ccc.ddd");
        assert_eq!(pick("ansi").quote("a.ccc.ddd"), r#""a"."ccc"."ddd""#);
        assert_eq!(pick("mysql").quote("a.ccc.ddd"), "`a`.`ccc`.`ddd`");
        assert_eq!(pick("backtick").quote("a.ccc.ddd"), "`a`.`ccc`.`ddd`");
        assert_eq!(pick("mssql").quote("a.ccc.ddd"), "[a].[ccc].[ddd]");
    }

    #[test]
    fn invalid_identifier_passes_through() {
        assert_eq!(pick("mssql").quote("a,ccc,ddd"), "a,ccc,ddd");
        assert_eq!(pick("mssql").quote("a ccc ddd"), "a ccc ddd");
        assert_eq!(ANSI.quote("COUNT(id)"), "COUNT(id)");
        assert_eq!(ANSI.quote("schema..table"), "schema..table");
        assert_eq!(ANSI.quote("1table"), "1table");
    }

    #[test]
    fn unicode_letters_are_identifiers() {
        assert_eq!(ANSI.quote("größe"), r#""größe""#);
    }

    #[test]
    fn pick_ignores_case() {
        assert_eq!(pick("ANSI").quote("x"), r#""x""#);
        assert_eq!(pick("MySQL").quote("x"), "`x`");
        assert_eq!(pick("unknown").quote("x"), "x");
    }

    #[test]
    fn quote_into_appends() {
        let mut out = String::from("ORDER BY ");
        BACKTICKS.quote_into(&mut out, "t.id");
        assert_eq!(out, "ORDER BY `t`.`id`");
    }
}
