// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis::{StatementAnalyzer, StatementFile};
use crate::config::Settings;
use crate::db::save_summary;
use crate::utils::{fmt_money, today};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let analyzer = settings.analyzer(today());
    run(conn, analyzer.as_ref(), &settings.currency, m)
}

/// Analyze the statement named by `--path` and make it the current dashboard.
pub fn run(
    conn: &Connection,
    analyzer: &dyn StatementAnalyzer,
    currency: &str,
    m: &clap::ArgMatches,
) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let file = StatementFile::open(path).with_context(|| format!("Open statement {}", path))?;
    println!("Analyzing {} ({:.2} KB)...", file.name, file.size as f64 / 1024.0);
    let summary = analyzer
        .analyze(&file)
        .with_context(|| format!("Analyze statement {}", file.name))?;
    save_summary(conn, &summary, &format!("analysis:{}", file.name))?;
    println!(
        "Analysis complete: {} transactions, income {}, expenses {}, savings rate {}%",
        summary.transactions.len(),
        fmt_money(&summary.total_income, currency),
        fmt_money(&summary.total_expenses, currency),
        summary.savings_rate
    );
    Ok(())
}
