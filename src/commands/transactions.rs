// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{load_summary, save_summary};
use crate::models::{Transaction, TxType};
use crate::summary::apply_transaction;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let kind: TxType = sub.get_one::<String>("type").unwrap().parse()?;

    let prior = load_summary(conn)?;
    let seq = prior.as_ref().map_or(0, |s| s.transactions.len()) + 1;
    let tx = Transaction {
        id: format!("manual-{}-{}", chrono::Utc::now().timestamp_millis(), seq),
        date,
        description,
        amount,
        category,
        r#type: kind,
    };
    let next = apply_transaction(prior.as_ref(), tx.clone())?;
    save_summary(conn, &next, "manual")?;
    println!(
        "Recorded {} {} on {} for '{}' ({})",
        tx.r#type, tx.amount, tx.date, tx.description, tx.category
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.description.clone(),
                    t.category.clone(),
                    t.r#type.to_string(),
                    format!("{:.2}", t.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Type", "Amount"], rows)
        );
    }
    Ok(())
}

/// Dashboard transactions after search/type/category filters, newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let Some(summary) = load_summary(conn)? else {
        return Ok(Vec::new());
    };
    let search = sub
        .get_one::<String>("search")
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    let kind = match sub
        .get_one::<String>("type")
        .map(|s| s.trim().to_ascii_lowercase())
        .as_deref()
    {
        None | Some("all") => None,
        Some(other) => Some(
            other
                .parse::<TxType>()
                .map_err(|_| anyhow!("Invalid type filter '{}', expected all|income|expense", other))?,
        ),
    };
    let category = sub.get_one::<String>("category").map(|s| s.trim());

    let mut rows: Vec<Transaction> = summary
        .transactions
        .into_iter()
        .filter(|t| {
            search
                .as_ref()
                .is_none_or(|q| t.description.to_lowercase().contains(q))
        })
        .filter(|t| kind.is_none_or(|k| t.r#type == k))
        .filter(|t| category.is_none_or(|c| t.category == c))
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}
