// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pennywise::db::{init_schema, save_summary};
use pennywise::models::{Transaction, TxType};
use pennywise::summary::summarize;
use pennywise::{cli, commands::exporter};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::TempDir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    let tx = |id: &str, day: u32, desc: &str, amount: i64, cat: &str, kind| Transaction {
        id: id.into(),
        date: NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
        description: desc.into(),
        amount: Decimal::from(amount),
        category: cat.into(),
        r#type: kind,
    };
    let summary = summarize(
        vec![
            tx("3", 20, "Uber Trip, airport", 650, "Transportation", TxType::Expense),
            tx("1", 5, "Salary Credit", 85000, "Income", TxType::Income),
            tx("2", 9, "Big Basket", 2300, "Food & Dining", TxType::Expense),
        ],
        Vec::new(),
    )
    .unwrap();
    save_summary(&conn, &summary, "manual").unwrap();
    conn
}

fn export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "pennywise",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    let Some(("export", m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    exporter::handle(conn, m)
}

#[test]
fn csv_export_is_oldest_first_with_header() {
    let conn = setup();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("tx.csv");
    export(&conn, "csv", out.to_str().unwrap()).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        ["id", "date", "description", "amount", "category", "type"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[2][2], "Uber Trip, airport");
    assert_eq!(&rows[2][5], "expense");
}

#[test]
fn json_export_round_trips() {
    let conn = setup();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("tx.json");
    export(&conn, "JSON", out.to_str().unwrap()).unwrap();

    let body = std::fs::read_to_string(&out).unwrap();
    let rows: Vec<Transaction> = serde_json::from_str(&body).unwrap();
    let ids: Vec<_> = rows.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert!(body.contains("\"type\": \"income\""));
}

#[test]
fn unknown_format_is_an_error() {
    let conn = setup();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("tx.xml");
    let err = export(&conn, "xml", out.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out.exists());
}
