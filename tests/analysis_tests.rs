// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use pennywise::analysis::{
    EXPENSE_COUNT, HttpStatementAnalyzer, MockStatementAnalyzer, StatementAnalyzer,
    StatementFile, StatementKind,
};
use pennywise::db::{init_schema, load_summary, summary_source};
use pennywise::error::FinanceError;
use pennywise::latency::{CancelToken, Latency};
use pennywise::models::{Impact, TxType};
use pennywise::{cli, commands::analyze};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

fn june() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn statement(suffix: &str, bytes: usize) -> NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    f.write_all(&vec![b'x'; bytes]).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn only_csv_and_pdf_are_accepted() {
    let csv = statement(".csv", 10);
    let pdf = statement(".PDF", 10);
    let txt = statement(".txt", 10);
    assert_eq!(StatementFile::open(csv.path()).unwrap().kind, StatementKind::Csv);
    assert_eq!(StatementFile::open(pdf.path()).unwrap().kind, StatementKind::Pdf);
    let err = StatementFile::open(txt.path()).unwrap_err();
    assert!(matches!(err, FinanceError::UnsupportedFile(_)));
}

#[test]
fn processing_time_scales_with_size_and_caps() {
    let small = StatementFile::open(statement(".csv", 0).path()).unwrap();
    assert_eq!(small.processing_time(), Duration::from_millis(2000));
    let mid = StatementFile::open(statement(".csv", 100 * 1024).path()).unwrap();
    assert_eq!(mid.processing_time(), Duration::from_millis(2100));
    let big = StatementFile {
        size: 10 * 1024 * 1024,
        ..mid.clone()
    };
    assert_eq!(big.processing_time(), Duration::from_millis(5000));
}

#[test]
fn mock_generates_a_month_of_activity() {
    let analyzer = MockStatementAnalyzer::seeded(7, june(), Latency::none());
    let s = analyzer.generate().unwrap();

    assert_eq!(s.transactions.len(), EXPENSE_COUNT + 2);
    let incomes: Vec<_> = s
        .transactions
        .iter()
        .filter(|t| t.r#type == TxType::Income)
        .collect();
    assert_eq!(incomes.len(), 2);
    assert_eq!(s.total_income, Decimal::from(97_500));
    for t in &s.transactions {
        assert_eq!((t.date.year(), t.date.month()), (2025, 6));
        if t.r#type == TxType::Expense {
            assert!(t.amount >= Decimal::from(200) && t.amount < Decimal::from(5200));
            assert!(t.date.day() <= 28);
        }
    }
    for pair in s.transactions.windows(2) {
        assert!(pair[0].date >= pair[1].date);
    }
    assert_eq!(s.balance, s.total_income - s.total_expenses);
    let share: i64 = s.top_expense_categories.iter().map(|c| c.percentage).sum();
    assert!((95..=105).contains(&share));
    assert_eq!(s.insights.len(), 5);
}

#[test]
fn savings_insight_tracks_rate() {
    let s = MockStatementAnalyzer::seeded(3, june(), Latency::none())
        .generate()
        .unwrap();
    let savings = s.insights.iter().find(|i| i.id == "2").unwrap();
    if s.savings_rate >= 20 {
        assert_eq!(savings.impact, Impact::Positive);
        assert!(!savings.actionable);
    } else {
        assert_eq!(savings.impact, Impact::Negative);
        assert!(savings.action.is_some());
    }
    assert!(savings.description.contains(&format!("{}%", s.savings_rate)));
}

#[test]
fn same_seed_same_statement() {
    let a = MockStatementAnalyzer::seeded(42, june(), Latency::none())
        .generate()
        .unwrap();
    let b = MockStatementAnalyzer::seeded(42, june(), Latency::none())
        .generate()
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn cancelled_analysis_returns_error() {
    let token = CancelToken::new();
    token.cancel();
    let analyzer =
        MockStatementAnalyzer::seeded(1, june(), Latency::new(true).with_token(token));
    let f = statement(".csv", 10);
    let file = StatementFile::open(f.path()).unwrap();
    let err = analyzer.analyze(&file).unwrap_err();
    assert!(matches!(err, FinanceError::Cancelled));
}

#[test]
fn http_backend_requires_a_key() {
    let analyzer = HttpStatementAnalyzer::new("http://127.0.0.1:9/", None);
    assert_eq!(analyzer.endpoint(), "http://127.0.0.1:9/v1/finance/analyze");
    let f = statement(".csv", 10);
    let file = StatementFile::open(f.path()).unwrap();
    let err = analyzer.analyze(&file).unwrap_err();
    assert!(matches!(err, FinanceError::Validation { field: "api_key", .. }));
}

#[test]
fn run_replaces_the_dashboard_snapshot() {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    let f = statement(".csv", 64);
    let path = f.path().to_string_lossy().into_owned();
    let matches = cli::build_cli().get_matches_from(["pennywise", "analyze", "--path", &path]);
    let Some(("analyze", sub)) = matches.subcommand() else {
        panic!("no analyze subcommand");
    };

    let analyzer = MockStatementAnalyzer::seeded(9, june(), Latency::none());
    analyze::run(&conn, &analyzer, "INR", sub).unwrap();

    let stored = load_summary(&conn).unwrap().unwrap();
    let expected = MockStatementAnalyzer::seeded(9, june(), Latency::none())
        .generate()
        .unwrap();
    assert_eq!(stored, expected);
    let (source, _) = summary_source(&conn).unwrap().unwrap();
    assert!(source.starts_with("analysis:"));
}

#[test]
fn failed_analysis_keeps_previous_snapshot() {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    let f = statement(".txt", 64);
    let path = f.path().to_string_lossy().into_owned();
    let matches = cli::build_cli().get_matches_from(["pennywise", "analyze", "--path", &path]);
    let Some(("analyze", sub)) = matches.subcommand() else {
        panic!("no analyze subcommand");
    };
    let analyzer = MockStatementAnalyzer::seeded(9, june(), Latency::none());
    assert!(analyze::run(&conn, &analyzer, "INR", sub).is_err());
    assert!(load_summary(&conn).unwrap().is_none());
}
