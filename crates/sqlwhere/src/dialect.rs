//! SQL dialects and formatting options.
//!
//! Expressions are always built with `?` placeholders. A [`Dialect`] (or an
//! explicit [`FormatOptions`] value) decides how those placeholders and the
//! column identifiers end up in the final SQL.
//!
//! All types here are plain configuration data and derive serde traits, so
//! they can be loaded from an application's config file:
//!
//! ```
//! use sqlwhere::{Dialect, FormatOptions, PlaceholderStyle, QuoteStyle};
//!
//! let d: Dialect = "PostgreSQL".parse().unwrap();
//! assert_eq!(d, Dialect::Postgres);
//!
//! let opts = FormatOptions::from(d);
//! assert_eq!(opts.placeholder, PlaceholderStyle::Dollar);
//! assert_eq!(opts.quotes, QuoteStyle::Ansi);
//! ```

use crate::error::{WhereError, WhereResult};
use crate::quote::{self, Quoter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How `?` placeholders appear in the rendered SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `?` placeholders, left as they are. For SQLite and MySQL.
    #[default]
    Query,
    /// Numbered `$1`, `$2`, ... placeholders. For PostgreSQL.
    Dollar,
    /// Numbered `@p1`, `@p2`, ... placeholders. For SQL Server.
    AtP,
    /// Each placeholder is removed and its value is inlined as a SQL literal.
    Inline,
}

impl PlaceholderStyle {
    /// The prefix written before each number, or `""` for non-numbered styles.
    pub fn prefix(self) -> &'static str {
        match self {
            PlaceholderStyle::Dollar => "$",
            PlaceholderStyle::AtP => "@p",
            PlaceholderStyle::Query | PlaceholderStyle::Inline => "",
        }
    }

    /// Whether placeholders are rewritten as `<prefix><n>`.
    pub fn is_numbered(self) -> bool {
        matches!(self, PlaceholderStyle::Dollar | PlaceholderStyle::AtP)
    }
}

/// How column identifiers are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    #[default]
    None,
    /// `"name"`
    Ansi,
    /// `` `name` ``
    Backticks,
    /// `[name]`
    SquareBrackets,
}

impl QuoteStyle {
    pub fn quoter(self) -> &'static dyn Quoter {
        match self {
            QuoteStyle::None => &quote::NONE,
            QuoteStyle::Ansi => &quote::ANSI,
            QuoteStyle::Backticks => &quote::BACKTICKS,
            QuoteStyle::SquareBrackets => &quote::SQUARE_BRACKETS,
        }
    }
}

/// A single formatting choice, as passed in a list to [`FormatOptions::from_options`].
///
/// The first four select a placeholder style, the rest a quoting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatOption {
    Query,
    Dollar,
    AtP,
    Inline,
    NoQuotes,
    AnsiQuotes,
    Backticks,
    SquareBrackets,
}

impl FormatOption {
    fn placeholder(self) -> Option<PlaceholderStyle> {
        match self {
            FormatOption::Query => Some(PlaceholderStyle::Query),
            FormatOption::Dollar => Some(PlaceholderStyle::Dollar),
            FormatOption::AtP => Some(PlaceholderStyle::AtP),
            FormatOption::Inline => Some(PlaceholderStyle::Inline),
            _ => None,
        }
    }

    fn quotes(self) -> Option<QuoteStyle> {
        match self {
            FormatOption::NoQuotes => Some(QuoteStyle::None),
            FormatOption::AnsiQuotes => Some(QuoteStyle::Ansi),
            FormatOption::Backticks => Some(QuoteStyle::Backticks),
            FormatOption::SquareBrackets => Some(QuoteStyle::SquareBrackets),
            _ => None,
        }
    }
}

/// Rendering configuration threaded through every formatting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub placeholder: PlaceholderStyle,
    pub quotes: QuoteStyle,
    /// First number used by numbered placeholder styles.
    pub start: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            placeholder: PlaceholderStyle::Query,
            quotes: QuoteStyle::None,
            start: 1,
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from a list. The first option of each kind wins;
    /// kinds that are absent keep their defaults.
    pub fn from_options(options: &[FormatOption]) -> Self {
        let defaults = Self::default();
        Self {
            placeholder: options
                .iter()
                .find_map(|o| o.placeholder())
                .unwrap_or(defaults.placeholder),
            quotes: options
                .iter()
                .find_map(|o| o.quotes())
                .unwrap_or(defaults.quotes),
            start: defaults.start,
        }
    }

    /// Options used by `Display`: no quoting and inlined values.
    pub fn inline() -> Self {
        Self {
            placeholder: PlaceholderStyle::Inline,
            ..Self::default()
        }
    }

    pub fn placeholder(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder = style;
        self
    }

    pub fn quotes(mut self, style: QuoteStyle) -> Self {
        self.quotes = style;
        self
    }

    /// Start numbered placeholders at `n` instead of 1.
    ///
    /// Useful when the fragment is appended to a query that already has
    /// `n - 1` numbered parameters.
    pub fn start_at(mut self, n: usize) -> Self {
        self.start = n;
        self
    }

    pub fn quoter(&self) -> &'static dyn Quoter {
        self.quotes.quoter()
    }
}

impl From<Dialect> for FormatOptions {
    fn from(dialect: Dialect) -> Self {
        dialect.format_options()
    }
}

impl From<&[FormatOption]> for FormatOptions {
    fn from(options: &[FormatOption]) -> Self {
        Self::from_options(options)
    }
}

/// A target SQL engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Dialect {
    /// SQLite: `?` placeholders, ANSI quotes.
    #[default]
    Sqlite,
    /// MySQL and MariaDB: `?` placeholders, back-tick quotes, case-insensitive identifiers.
    Mysql,
    /// PostgreSQL: `$n` placeholders, ANSI quotes.
    Postgres,
    /// SQL Server: `@pn` placeholders, ANSI quotes, `TOP (n)` instead of `LIMIT`.
    SqlServer,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::Sqlite,
        Dialect::Mysql,
        Dialect::Postgres,
        Dialect::SqlServer,
    ];

    /// Find a dialect by name or alias, ignoring case.
    pub fn pick(name: &str) -> Option<Dialect> {
        match name.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Some(Dialect::Sqlite),
            "mysql" | "mariadb" => Some(Dialect::Mysql),
            "postgres" | "postgresql" | "pgx" => Some(Dialect::Postgres),
            "sqlserver" | "sql_server" | "sql-server" | "mssql" | "ms-sql" => {
                Some(Dialect::SqlServer)
            }
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Sqlite => "Sqlite",
            Dialect::Mysql => "Mysql",
            Dialect::Postgres => "Postgres",
            Dialect::SqlServer => "SqlServer",
        }
    }

    pub fn placeholder_style(self) -> PlaceholderStyle {
        match self {
            Dialect::Sqlite | Dialect::Mysql => PlaceholderStyle::Query,
            Dialect::Postgres => PlaceholderStyle::Dollar,
            Dialect::SqlServer => PlaceholderStyle::AtP,
        }
    }

    pub fn quote_style(self) -> QuoteStyle {
        match self {
            Dialect::Mysql => QuoteStyle::Backticks,
            Dialect::Sqlite | Dialect::Postgres | Dialect::SqlServer => QuoteStyle::Ansi,
        }
    }

    /// Placeholder prefix: `$` for PostgreSQL, `@p` for SQL Server, otherwise empty.
    pub fn prefix(self) -> &'static str {
        self.placeholder_style().prefix()
    }

    pub fn quoter(self) -> &'static dyn Quoter {
        self.quote_style().quoter()
    }

    /// True when the engine treats identifiers case-insensitively.
    pub fn case_insensitive(self) -> bool {
        matches!(self, Dialect::Mysql)
    }

    /// Whether `LIMIT` is replaced by `TOP (n)` after `SELECT`.
    pub fn uses_top(self) -> bool {
        matches!(self, Dialect::SqlServer)
    }

    pub fn format_options(self) -> FormatOptions {
        FormatOptions {
            placeholder: self.placeholder_style(),
            quotes: self.quote_style(),
            start: 1,
        }
    }

    /// Rewrite the `?` placeholders in a whole query into this dialect's form.
    ///
    /// Queries for `?`-style dialects are returned unchanged.
    pub fn replace_placeholders(self, sql: &str) -> String {
        let prefix = self.prefix();
        if prefix.is_empty() {
            return sql.to_string();
        }
        number_placeholders(sql, prefix, 1)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = WhereError;

    fn from_str(s: &str) -> WhereResult<Self> {
        Dialect::pick(s).ok_or_else(|| WhereError::unknown_dialect(s))
    }
}

impl TryFrom<String> for Dialect {
    type Error = WhereError;

    fn try_from(s: String) -> WhereResult<Self> {
        s.parse()
    }
}

/// Replace every `?` with `<prefix><n>`, counting up from `from`.
pub(crate) fn number_placeholders(sql: &str, prefix: &str, from: usize) -> String {
    let n = sql.bytes().filter(|b| *b == b'?').count();
    let mut out = String::with_capacity(sql.len() + n * (prefix.len() + 2));
    let mut count = from;
    for ch in sql.chars() {
        if ch == '?' {
            out.push_str(prefix);
            out.push_str(&count.to_string());
            count += 1;
        } else {
            out.push(ch);
        }
    }
    out
}
