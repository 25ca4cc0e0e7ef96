// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::db::{load_summary, summary_source};
use crate::models::FinancialSummary;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let summary = load_summary(conn)?.unwrap_or_else(FinancialSummary::empty);
    match m.subcommand() {
        Some(("overview", sub)) => overview(conn, settings, &summary, sub)?,
        Some(("categories", sub)) => categories(settings, &summary, sub)?,
        Some(("insights", sub)) => insights(&summary, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_income: String,
    pub total_expenses: String,
    pub balance: String,
    pub savings_rate: i64,
    pub transactions: usize,
    pub source: Option<String>,
}

pub fn overview_data(conn: &Connection, s: &FinancialSummary) -> Result<Overview> {
    Ok(Overview {
        total_income: format!("{:.2}", s.total_income),
        total_expenses: format!("{:.2}", s.total_expenses),
        balance: format!("{:.2}", s.balance),
        savings_rate: s.savings_rate,
        transactions: s.transactions.len(),
        source: summary_source(conn)?.map(|(src, _)| src),
    })
}

fn overview(
    conn: &Connection,
    settings: &Settings,
    s: &FinancialSummary,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let data = overview_data(conn, s)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = &settings.currency;
    let rows = vec![
        vec!["Total income".into(), fmt_money(&s.total_income, ccy)],
        vec!["Total expenses".into(), fmt_money(&s.total_expenses, ccy)],
        vec!["Balance".into(), fmt_money(&s.balance, ccy)],
        vec!["Savings rate".into(), format!("{}%", s.savings_rate)],
        vec!["Transactions".into(), s.transactions.len().to_string()],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    match summary_source(conn)? {
        Some((src, at)) => println!("Source: {} (updated {})", src, at),
        None => println!("No data yet: run `pennywise analyze --path <statement>` or `pennywise tx add`."),
    }
    Ok(())
}

#[derive(Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub amount: String,
    pub percentage: i64,
    pub transactions: usize,
}

/// Top expense categories in stored order, amounts at two decimals.
pub fn category_rows(s: &FinancialSummary) -> Vec<CategoryRow> {
    s.top_expense_categories
        .iter()
        .map(|c| CategoryRow {
            category: c.category.clone(),
            amount: format!("{:.2}", c.amount),
            percentage: c.percentage,
            transactions: c.transactions.len(),
        })
        .collect()
}

fn categories(settings: &Settings, s: &FinancialSummary, sub: &clap::ArgMatches) -> Result<()> {
    let data = category_rows(s);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = s
            .top_expense_categories
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    fmt_money(&c.amount, &settings.currency),
                    format!("{}%", c.percentage),
                    c.transactions.len().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Share", "Count"], rows)
        );
    }
    Ok(())
}

fn insights(s: &FinancialSummary, sub: &clap::ArgMatches) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s.insights)? {
        let rows = s
            .insights
            .iter()
            .map(|i| {
                vec![
                    i.impact.to_string(),
                    i.title.clone(),
                    i.description.clone(),
                    i.action.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Impact", "Insight", "Detail", "Suggested action"], rows)
        );
    }
    Ok(())
}
