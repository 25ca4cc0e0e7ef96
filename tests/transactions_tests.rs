// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pennywise::db::{init_schema, load_summary, summary_source};
use pennywise::{cli, commands::transactions};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

fn run_tx(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["pennywise", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(conn, tx_m)
}

fn list(conn: &Connection, args: &[&str]) -> Vec<pennywise::models::Transaction> {
    let mut argv = vec!["pennywise", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    transactions::query_rows(conn, list_m).unwrap()
}

fn seed(conn: &Connection) {
    for (date, desc, amount, cat, kind) in [
        ("2025-03-01", "March salary", "1000", "Income", "income"),
        ("2025-03-03", "Grocery Store", "400", "Food", "expense"),
        ("2025-03-05", "Metro Card Recharge", "60", "Transport", "expense"),
        ("2025-03-09", "Swiggy Order", "120", "Food", "expense"),
    ] {
        run_tx(
            conn,
            &[
                "add",
                "--date",
                date,
                "--description",
                desc,
                "--amount",
                amount,
                "--category",
                cat,
                "--type",
                kind,
            ],
        )
        .unwrap();
    }
}

#[test]
fn add_builds_snapshot_from_nothing() {
    let conn = setup();
    seed(&conn);
    let s = load_summary(&conn).unwrap().unwrap();
    assert_eq!(s.transactions.len(), 4);
    assert_eq!(s.total_income, Decimal::from(1000));
    assert_eq!(s.total_expenses, Decimal::from(580));
    assert_eq!(s.balance, Decimal::from(420));
    assert_eq!(s.savings_rate, 42);
    assert_eq!(s.top_expense_categories[0].category, "Food");
    assert_eq!(s.top_expense_categories[0].amount, Decimal::from(520));
    assert!(s.transactions.iter().all(|t| t.id.starts_with("manual-")));
    let (source, _) = summary_source(&conn).unwrap().unwrap();
    assert_eq!(source, "manual");
}

#[test]
fn add_rejects_non_positive_amount_without_saving() {
    let conn = setup();
    let err = run_tx(
        &conn,
        &["add", "--description", "Refund", "--amount", "0", "--category", "Food"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("amount"));
    assert!(load_summary(&conn).unwrap().is_none());
}

#[test]
fn list_without_snapshot_is_empty() {
    let conn = setup();
    assert!(list(&conn, &[]).is_empty());
}

#[test]
fn list_is_newest_first_and_limited() {
    let conn = setup();
    seed(&conn);
    let rows = list(&conn, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2025-03-09");
    assert_eq!(rows[1].date.to_string(), "2025-03-05");
}

#[test]
fn list_filters_combine() {
    let conn = setup();
    seed(&conn);
    assert_eq!(list(&conn, &["--type", "income"]).len(), 1);
    assert_eq!(list(&conn, &["--type", "expense"]).len(), 3);
    assert_eq!(list(&conn, &["--category", "Food"]).len(), 2);
    let hits = list(&conn, &["--search", "ORDER", "--category", "Food"]);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].description, "Swiggy Order");
}

#[test]
fn add_that_overflows_leaves_snapshot_alone() {
    let conn = setup();
    run_tx(
        &conn,
        &["add", "--description", "Interest", "--amount", "0.01", "--category", "Income", "--type", "income"],
    )
    .unwrap();
    let before = load_summary(&conn).unwrap().unwrap();
    let err = run_tx(
        &conn,
        &[
            "add",
            "--description",
            "Typo",
            "--amount",
            "1000000000000000000000000000",
            "--category",
            "Food",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("range"));
    assert_eq!(load_summary(&conn).unwrap().unwrap(), before);
}
