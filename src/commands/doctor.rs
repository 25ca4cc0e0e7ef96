// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::load_summary;
use crate::loans::list_loans;
use crate::summary::drift;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Snapshot totals that no longer match their own transactions
    if let Some(summary) = load_summary(conn)? {
        match drift(&summary) {
            Ok(fields) => {
                for (field, stored, expected) in fields {
                    rows.push(vec![
                        "summary_drift".into(),
                        format!("{}: stored {}, expected {}", field, stored, expected),
                    ]);
                }
            }
            Err(e) => rows.push(vec!["summary_drift".into(), e.to_string()]),
        }
    }

    // 2) Reminders whose loan is gone
    let mut stmt = conn.prepare(
        "SELECT r.id, r.loan_id FROM reminders r LEFT JOIN loans l ON r.loan_id=l.id WHERE l.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let loan_id: i64 = r.get(1)?;
        rows.push(vec![
            "orphan_reminder".into(),
            format!("reminder {} -> loan {}", id, loan_id),
        ]);
    }

    // 3) Loans owing more than was borrowed
    for loan in list_loans(conn)? {
        if loan.remaining_amount > loan.amount {
            rows.push(vec![
                "remaining_exceeds_amount".into(),
                format!("loan {} '{}'", loan.id, loan.name),
            ]);
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = issues(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
