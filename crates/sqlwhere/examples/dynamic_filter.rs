//! Dynamic filter composition example
//!
//! Run with: cargo run --example dynamic_filter -p sqlwhere -- [dialect] [sort column]
//!
//! e.g. `cargo run --example dynamic_filter -p sqlwhere -- postgres priority`

use sqlwhere::prelude::*;
use std::env;

/// Search parameters - all optional
#[derive(Default)]
struct TaskFilter {
    status: Option<String>,
    min_priority: Option<i32>,
    assignees: Vec<Option<String>>,
    title_contains: Option<String>,
    page: u64,
    per_page: u64,
}

impl TaskFilter {
    fn expression(&self) -> Expression {
        and([
            self.status.as_ref().map(|s| eq("status", s.as_str())),
            self.min_priority.map(|p| gt_eq("priority", p)),
            // a None assignee also matches unassigned tasks
            Some(in_list("assignee", self.assignees.iter().cloned())),
            self.title_contains
                .as_ref()
                .map(|t| like("title", format!("%{t}%"))),
        ])
    }

    fn constraint(&self, sort: &str) -> QueryConstraint {
        order_by([sort])
            .desc()
            .order_by(["id"])
            .limit(self.per_page)
            .offset(self.page.saturating_sub(1) * self.per_page)
    }
}

fn main() -> Result<(), WhereError> {
    let mut args = env::args().skip(1);
    let dialect: Dialect = args.next().as_deref().unwrap_or("postgres").parse()?;
    let sort = args.next().unwrap_or_else(|| "priority".to_string());

    let filter = TaskFilter {
        status: Some("open".into()),
        min_priority: Some(3),
        assignees: vec![Some("alice".into()), Some("bob".into()), None],
        page: 2,
        per_page: 25,
        ..Default::default()
    };

    let expr = filter.expression();
    expr.check()?;

    let qc = filter.constraint(&sort);
    let (wh, params) = where_clause(&expr, &FormatOptions::from(dialect));
    let sql = format!(
        "SELECT{} id, title, status, priority, assignee FROM tasks{wh}{}",
        qc.format_top(dialect),
        qc.format(dialect)
    );

    println!("dialect: {dialect}");
    println!("sql:     {sql}");
    println!("params:  {params:?}");
    println!("debug:   {expr}");

    Ok(())
}
