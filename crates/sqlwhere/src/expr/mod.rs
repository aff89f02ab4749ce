//! Composable WHERE/HAVING expressions.
//!
//! An [`Expression`] is a tree of leaf [`Condition`]s combined with AND, OR
//! and NOT. The combinators keep the tree small:
//!
//! - combining with the no-op returns the other side unchanged,
//! - combining two clauses of the same conjunction concatenates their children,
//! - a one-child clause is never produced; the child is returned instead.
//!
//! Rendering wraps every child of a clause in parentheses, so operator
//! precedence never depends on how the tree was built.
//!
//! ```
//! use sqlwhere::{and, eq, gt, in_list, or};
//!
//! let e = and([or([eq("name", "John"), eq("name", "Peter")]), gt("age", 10), in_list("likes", ["cats", "dogs"])]);
//! assert_eq!(
//!     e.to_string(),
//!     "((name='John') OR (name='Peter')) AND (age>10) AND (likes IN ('cats','dogs'))"
//! );
//! ```

mod condition;
mod render;


pub use condition::{
    Condition, between, eq, gt, gt_eq, in_list, in_slice, like, literal, lt, lt_eq, not_eq,
    not_null, null, predicate, try_in_slice,
};
pub use render::{having_clause, inline_placeholders, replace_placeholders, where_clause};

use crate::error::WhereResult;
use std::ops;

/// How the children of a [`Clause`] are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

impl Conjunction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Conjunction::And => " AND ",
            Conjunction::Or => " OR ",
        }
    }
}

/// A list of expressions joined by one conjunction.
///
/// The empty clause is the no-op.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clause {
    children: Vec<Expression>,
    conjunction: Conjunction,
}

impl Clause {
    pub fn children(&self) -> &[Expression] {
        &self.children
    }

    pub fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A node in a WHERE/HAVING predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Condition(Condition),
    /// Negation. Renders as `NOT (<child>)`, or as nothing when the child is empty.
    Not(Box<Expression>),
    Clause(Clause),
}

impl Default for Expression {
    fn default() -> Self {
        no_op()
    }
}

/// The empty expression. Renders to nothing and disappears when combined.
///
/// Handy as the starting point when filters are added conditionally.
pub fn no_op() -> Expression {
    Expression::Clause(Clause::default())
}

/// Negate an expression. `None` gives the no-op.
pub fn not(expr: impl Into<Option<Expression>>) -> Expression {
    match expr.into() {
        Some(e) => Expression::Not(Box::new(e)),
        None => no_op(),
    }
}

/// Combine expressions so that all must be true. `None` items and no-ops are dropped.
pub fn and<I>(exprs: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<Option<Expression>>,
{
    combine(exprs, Conjunction::And)
}

/// Combine expressions so that any must be true. `None` items and no-ops are dropped.
pub fn or<I>(exprs: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<Option<Expression>>,
{
    combine(exprs, Conjunction::Or)
}

fn combine<I>(exprs: I, conjunction: Conjunction) -> Expression
where
    I: IntoIterator,
    I::Item: Into<Option<Expression>>,
{
    exprs
        .into_iter()
        .filter_map(Into::<Option<Expression>>::into)
        .fold(no_op(), |acc, e| acc.conjoin(e, conjunction))
}

impl Expression {
    /// Both this and `other` must be true.
    pub fn and(self, other: Expression) -> Expression {
        self.conjoin(other, Conjunction::And)
    }

    /// Either this or `other` must be true.
    pub fn or(self, other: Expression) -> Expression {
        self.conjoin(other, Conjunction::Or)
    }

    fn conjoin(self, other: Expression, conjunction: Conjunction) -> Expression {
        if other.is_no_op() {
            return self;
        }
        if self.is_no_op() {
            return other;
        }

        let mut children = self.into_children(conjunction);
        children.extend(other.into_children(conjunction));
        Expression::Clause(Clause {
            children,
            conjunction,
        })
    }

    // A clause with the same conjunction contributes its children; anything else is one child.
    fn into_children(self, conjunction: Conjunction) -> Vec<Expression> {
        match self {
            Expression::Clause(c) if c.conjunction == conjunction => c.children,
            other => vec![other],
        }
    }

    /// True when this expression renders to nothing.
    pub fn is_no_op(&self) -> bool {
        match self {
            Expression::Condition(c) => c.column.is_empty() && c.predicate.is_empty(),
            Expression::Not(inner) => inner.is_no_op(),
            Expression::Clause(c) => c.children.iter().all(Expression::is_no_op),
        }
    }

    /// Verify that every condition has as many arguments as `?` placeholders.
    ///
    /// Rendering never checks this; call it when conditions are built by hand.
    pub fn check(&self) -> WhereResult<()> {
        match self {
            Expression::Condition(c) => c.check(),
            Expression::Not(inner) => inner.check(),
            Expression::Clause(c) => c.children.iter().try_for_each(Expression::check),
        }
    }
}

impl ops::Not for Expression {
    type Output = Expression;

    fn not(self) -> Expression {
        Expression::Not(Box::new(self))
    }
}

impl ops::BitAnd for Expression {
    type Output = Expression;

    fn bitand(self, rhs: Expression) -> Expression {
        self.and(rhs)
    }
}

impl ops::BitOr for Expression {
    type Output = Expression;

    fn bitor(self, rhs: Expression) -> Expression {
        self.or(rhs)
    }
}
