use super::{Clause, Expression};
use crate::dialect::{FormatOptions, PlaceholderStyle, number_placeholders};
use crate::quote::Quoter;
use crate::value::Value;
use std::fmt;

impl Expression {
    /// Render with `?` placeholders, quoting columns with `quoter`.
    ///
    /// Arguments are returned in the order their placeholders appear.
    pub fn render(&self, quoter: &dyn Quoter) -> (String, Vec<Value>) {
        let mut sql = String::new();
        let mut args = Vec::new();
        self.render_into(quoter, &mut sql, &mut args);
        (sql, args)
    }

    fn render_into(&self, quoter: &dyn Quoter, sql: &mut String, args: &mut Vec<Value>) {
        match self {
            Expression::Condition(c) => {
                quoter.quote_into(sql, &c.column);
                sql.push_str(&c.predicate);
                args.extend(c.args.iter().cloned());
            }
            Expression::Not(inner) => {
                let (inner_sql, inner_args) = inner.render(quoter);
                if inner_sql.is_empty() {
                    return;
                }
                sql.push_str("NOT (");
                sql.push_str(&inner_sql);
                sql.push(')');
                args.extend(inner_args);
            }
            Expression::Clause(clause) => clause.render_into(quoter, sql, args),
        }
    }

    /// Render without the WHERE/HAVING keyword, applying placeholder and
    /// quoting options.
    pub fn format(&self, options: &FormatOptions) -> (String, Vec<Value>) {
        let (sql, args) = self.render(options.quoter());
        replace_placeholders(&sql, args, options.placeholder, options.start)
    }
}

impl Clause {
    fn render_into(&self, quoter: &dyn Quoter, sql: &mut String, args: &mut Vec<Value>) {
        let mut first = true;
        for child in &self.children {
            let (child_sql, child_args) = child.render(quoter);
            // nested no-ops vanish here
            if child_sql.is_empty() {
                continue;
            }
            if !first {
                sql.push_str(self.conjunction.as_sql());
            }
            sql.push('(');
            sql.push_str(&child_sql);
            sql.push(')');
            args.extend(child_args);
            first = false;
        }
    }
}

/// Unquoted, with values inlined. Meant for logs and tests, not for execution.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sql, _) = self.format(&FormatOptions::inline());
        f.write_str(&sql)
    }
}

/// Build `" WHERE <expr>"` and its arguments.
///
/// A `None` or no-op expression gives an empty string and no arguments, so
/// the result can always be appended to a query.
///
/// ```
/// use sqlwhere::{eq, gt, where_clause, Dialect, FormatOptions, Value};
///
/// let e = eq("name", "Fred").and(gt("age", 10));
/// let (sql, args) = where_clause(&e, &FormatOptions::from(Dialect::Postgres));
/// assert_eq!(sql, r#" WHERE ("name"=$1) AND ("age">$2)"#);
/// assert_eq!(args, vec![Value::from("Fred"), Value::from(10)]);
/// ```
pub fn where_clause<'a>(
    expr: impl Into<Option<&'a Expression>>,
    options: &FormatOptions,
) -> (String, Vec<Value>) {
    keyword_clause(" WHERE ", expr.into(), options)
}

/// Build `" HAVING <expr>"` and its arguments. Empty input behaves as for [`where_clause`].
pub fn having_clause<'a>(
    expr: impl Into<Option<&'a Expression>>,
    options: &FormatOptions,
) -> (String, Vec<Value>) {
    keyword_clause(" HAVING ", expr.into(), options)
}

fn keyword_clause(
    keyword: &'static str,
    expr: Option<&Expression>,
    options: &FormatOptions,
) -> (String, Vec<Value>) {
    let Some(expr) = expr else {
        return (String::new(), Vec::new());
    };

    let (sql, args) = expr.format(options);
    if sql.is_empty() {
        return (String::new(), Vec::new());
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        target: "sqlwhere.render",
        keyword = keyword.trim(),
        sql = %sql,
        args = args.len(),
        "rendered clause"
    );

    let mut out = String::with_capacity(keyword.len() + sql.len());
    out.push_str(keyword);
    out.push_str(&sql);
    (out, args)
}

/// Rewrite `?` placeholders in `sql` according to `style`.
///
/// - `Query` returns the input unchanged.
/// - `Dollar` and `AtP` number each `?` from `from` upward; the arguments are
///   returned untouched.
/// - `Inline` splices the arguments in as literals (see [`inline_placeholders`]).
pub fn replace_placeholders(
    sql: &str,
    args: Vec<Value>,
    style: PlaceholderStyle,
    from: usize,
) -> (String, Vec<Value>) {
    match style {
        PlaceholderStyle::Inline => inline_placeholders(sql, args),
        _ if style.is_numbered() => (number_placeholders(sql, style.prefix(), from), args),
        _ => (sql.to_string(), args),
    }
}

/// Replace each `?` with the next argument rendered as a SQL literal.
///
/// Numbers and booleans are inserted bare, everything else in single quotes.
/// Placeholders beyond the last argument stay as `?`; arguments beyond the
/// last placeholder are returned.
pub fn inline_placeholders(sql: &str, args: Vec<Value>) -> (String, Vec<Value>) {
    let mut remaining = args.into_iter();
    let mut out = String::with_capacity(sql.len() + sql.len() / 2);
    for ch in sql.chars() {
        if ch != '?' {
            out.push(ch);
            continue;
        }
        match remaining.next() {
            Some(v) => out.push_str(&v.to_sql_literal()),
            None => out.push('?'),
        }
    }
    (out, remaining.collect())
}
