//! Query constraints composed into full SELECT statements.

use sqlwhere::constraint::{build, build_top};
use sqlwhere::prelude::*;

fn select_users(dialect: Dialect, filter: &Expression, qc: Option<&QueryConstraint>) -> String {
    let (wh, _) = where_clause(filter, &FormatOptions::from(dialect));
    format!(
        "SELECT{} id, name FROM users{wh}{}",
        build_top(qc, dialect),
        build(qc, dialect)
    )
}

#[test]
fn test_select_per_dialect() {
    let filter = eq("active", true);
    let qc = order_by(["name"]).order_by(["id"]).desc().limit(10).offset(20);

    assert_eq!(
        select_users(Dialect::Postgres, &filter, Some(&qc)),
        r#"SELECT id, name FROM users WHERE "active"=$1 ORDER BY "name" ASC, "id" DESC LIMIT 10 OFFSET 20"#
    );
    assert_eq!(
        select_users(Dialect::Mysql, &filter, Some(&qc)),
        "SELECT id, name FROM users WHERE `active`=? ORDER BY `name` ASC, `id` DESC LIMIT 10 OFFSET 20"
    );
    assert_eq!(
        select_users(Dialect::SqlServer, &filter, Some(&qc)),
        r#"SELECT TOP (10) id, name FROM users WHERE "active"=@p1 ORDER BY "name" ASC, "id" DESC OFFSET 20"#
    );
}

#[test]
fn test_select_without_constraint() {
    assert_eq!(
        select_users(Dialect::SqlServer, &no_op(), None),
        "SELECT id, name FROM users"
    );
}

#[test]
fn test_all_ascending_omits_directions() {
    let qc = order_by(["a", "b"]).asc().order_by(["c"]).nulls_last();
    assert_eq!(
        qc.format(Dialect::Postgres),
        r#" ORDER BY "a", "b", "c" NULLS LAST"#
    );
}

#[test]
fn test_user_chosen_sort_column() {
    // unparseable identifiers pass through unquoted
    let qc = order_by(["lower(name)"]).desc();
    assert_eq!(qc.format(Dialect::Sqlite), " ORDER BY lower(name) DESC");
}

#[test]
fn test_limit_then_order_by() {
    let qc = limit(5).order_by(["foo", "bar"]);
    assert_eq!(qc.format(Dialect::Sqlite), r#" ORDER BY "foo", "bar" LIMIT 5"#);
    assert_eq!(offset(0).format(Dialect::Sqlite), "");
}
