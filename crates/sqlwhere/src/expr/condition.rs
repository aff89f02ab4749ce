//! Leaf conditions and the factories that build them.

use super::{Expression, no_op, or};
use crate::error::{WhereError, WhereResult};
use crate::value::Value;

/// Operator templates used by the factories. Each already carries its own
/// `?` placeholders.
pub mod predicate {
    pub const IS_NULL: &str = " IS NULL";
    pub const IS_NOT_NULL: &str = " IS NOT NULL";
    pub const EQUAL_TO: &str = "=?";
    pub const NOT_EQUAL_TO: &str = "<>?";
    pub const GREATER_THAN: &str = ">?";
    pub const GREATER_THAN_OR_EQUAL_TO: &str = ">=?";
    pub const LESS_THAN: &str = "<?";
    pub const LESS_THAN_OR_EQUAL_TO: &str = "<=?";
    pub const BETWEEN: &str = " BETWEEN ? AND ?";
    pub const LIKE: &str = " LIKE ?";
}

/// An atomic predicate: `<column><predicate>` with positional arguments.
///
/// The number of `?` in `predicate` should equal `args.len()`. Factories
/// guarantee this; for hand-built conditions it is the caller's job
/// (see [`Expression::check`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Column name, possibly dotted (`p.name`). Empty for bare predicates.
    pub column: String,
    pub predicate: String,
    pub args: Vec<Value>,
}

impl Condition {
    pub fn new(column: impl Into<String>, predicate: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            column: column.into(),
            predicate: predicate.into(),
            args,
        }
    }

    /// Number of `?` placeholders in the predicate.
    pub fn placeholder_count(&self) -> usize {
        self.predicate.matches('?').count()
    }

    pub fn check(&self) -> WhereResult<()> {
        let expected = self.placeholder_count();
        if expected != self.args.len() {
            return Err(WhereError::PlaceholderMismatch {
                predicate: format!("{}{}", self.column, self.predicate),
                expected,
                actual: self.args.len(),
            });
        }
        Ok(())
    }
}

impl From<Condition> for Expression {
    fn from(cond: Condition) -> Self {
        Expression::Condition(cond)
    }
}

/// A column-less predicate, e.g. `EXISTS (SELECT 1 FROM offers WHERE expiry_date = CURRENT_DATE)`.
///
/// No quoting is applied. Never build `sql` from untrusted input.
pub fn predicate(sql: impl Into<String>, args: Vec<Value>) -> Expression {
    Condition::new(String::new(), sql, args).into()
}

/// A condition on a column with a caller-supplied operator template, e.g.
/// `literal("age", " > 45", vec![])`.
///
/// The column is quoted when rendering asks for it. This is the basis for
/// all the other factories; never build `column` or `predicate` from
/// untrusted input.
pub fn literal(column: impl Into<String>, predicate: impl Into<String>, args: Vec<Value>) -> Expression {
    Condition::new(column, predicate, args).into()
}

/// `column IS NULL`
pub fn null(column: impl Into<String>) -> Expression {
    literal(column, predicate::IS_NULL, Vec::new())
}

/// `column IS NOT NULL`. Equivalent to `not(null(column))` but shorter SQL.
pub fn not_null(column: impl Into<String>) -> Expression {
    literal(column, predicate::IS_NOT_NULL, Vec::new())
}

/// `column=?`
pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Expression {
    literal(column, predicate::EQUAL_TO, vec![value.into()])
}

/// `column<>?`
pub fn not_eq(column: impl Into<String>, value: impl Into<Value>) -> Expression {
    literal(column, predicate::NOT_EQUAL_TO, vec![value.into()])
}

/// `column>?`
pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Expression {
    literal(column, predicate::GREATER_THAN, vec![value.into()])
}

/// `column>=?`
pub fn gt_eq(column: impl Into<String>, value: impl Into<Value>) -> Expression {
    literal(column, predicate::GREATER_THAN_OR_EQUAL_TO, vec![value.into()])
}

/// `column<?`
pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Expression {
    literal(column, predicate::LESS_THAN, vec![value.into()])
}

/// `column<=?`
pub fn lt_eq(column: impl Into<String>, value: impl Into<Value>) -> Expression {
    literal(column, predicate::LESS_THAN_OR_EQUAL_TO, vec![value.into()])
}

/// `column BETWEEN ? AND ?`
pub fn between(column: impl Into<String>, low: impl Into<Value>, high: impl Into<Value>) -> Expression {
    literal(column, predicate::BETWEEN, vec![low.into(), high.into()])
}

/// `column LIKE ?`. Leading wildcards usually defeat indexes; use sparingly.
pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Expression {
    literal(column, predicate::LIKE, vec![Value::Text(pattern.into())])
}

/// `column IN (?,?,...)`.
///
/// - No values at all gives the no-op.
/// - Null values are not placed in the list (SQL `IN` never matches NULL);
///   instead `column IS NULL` is OR-ed with the `IN` condition.
/// - Only nulls gives `column IS NULL` alone.
///
/// Values are not expanded: an array value is a single argument. Use
/// [`in_slice`] to expand one.
///
/// ```
/// use sqlwhere::{in_list, Value};
///
/// let e = in_list("age", [Value::from(1), Value::Null, Value::from(2)]);
/// assert_eq!(e.to_string(), "(age IN (1,2)) OR (age IS NULL)");
/// ```
pub fn in_list<I>(column: impl Into<String>, values: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    in_values(column.into(), values.into_iter().map(Into::into))
}

/// Like [`in_list`], but the single argument is the collection to expand.
///
/// A null argument gives the no-op.
///
/// # Panics
/// If `arg` converts to anything other than [`Value::Array`] or [`Value::Null`].
/// Use [`try_in_slice`] to get an error instead.
pub fn in_slice(column: impl Into<String>, arg: impl Into<Value>) -> Expression {
    match try_in_slice(column, arg) {
        Ok(expr) => expr,
        Err(err) => panic!("{err}"),
    }
}

/// Fallible form of [`in_slice`].
pub fn try_in_slice(column: impl Into<String>, arg: impl Into<Value>) -> WhereResult<Expression> {
    match arg.into() {
        Value::Null => Ok(no_op()),
        Value::Array(items) => Ok(in_values(column.into(), items.into_iter())),
        other => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "sqlwhere.render",
                kind = other.kind(),
                "in_slice rejected a non-collection argument"
            );
            Err(WhereError::invalid_argument(format!(
                "arg must be an array or slice, got {}",
                other.kind()
            )))
        }
    }
}

fn in_values(column: String, values: impl Iterator<Item = Value>) -> Expression {
    let mut args = Vec::new();
    let mut has_null = false;
    for v in values {
        if v.is_null() {
            has_null = true;
        } else {
            args.push(v);
        }
    }

    let mut result = no_op();
    if !args.is_empty() {
        let mut pred = String::with_capacity(6 + args.len() * 2);
        pred.push_str(" IN (");
        for i in 0..args.len() {
            if i > 0 {
                pred.push(',');
            }
            pred.push('?');
        }
        pred.push(')');
        result = Condition::new(column.clone(), pred, args).into();
    }

    if has_null {
        result = or([result, null(column)]);
    }
    result
}
