// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::PathBuf;

use crate::models::FinancialSummary;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pennywise", "pennywise"));

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

pub fn db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("pennywise.sqlite"))
}

pub fn session_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("session.json"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- Current dashboard snapshot, serialized FinancialSummary
    CREATE TABLE IF NOT EXISTS summaries(
        key TEXT PRIMARY KEY,
        source TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        body TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS loans(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        remaining_amount TEXT NOT NULL,
        interest_rate TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        payment_amount TEXT NOT NULL,
        payment_frequency TEXT NOT NULL CHECK(payment_frequency IN ('monthly','weekly','biweekly')),
        type TEXT NOT NULL,
        next_payment_date TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS reminders(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        loan_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        is_paid INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY(loan_id) REFERENCES loans(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_reminders_date ON reminders(date);
    "#,
    )?;
    Ok(())
}

const CURRENT: &str = "current";

pub fn load_summary(conn: &Connection) -> Result<Option<FinancialSummary>> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM summaries WHERE key=?1",
            params![CURRENT],
            |r| r.get(0),
        )
        .optional()?;
    match body {
        Some(b) => Ok(Some(
            serde_json::from_str(&b).context("Stored summary is not valid JSON")?,
        )),
        None => Ok(None),
    }
}

pub fn summary_source(conn: &Connection) -> Result<Option<(String, String)>> {
    Ok(conn
        .query_row(
            "SELECT source, updated_at FROM summaries WHERE key=?1",
            params![CURRENT],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?)
}

pub fn save_summary(conn: &Connection, summary: &FinancialSummary, source: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO summaries(key, source, body, updated_at) VALUES (?1, ?2, ?3, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET source=excluded.source, body=excluded.body, updated_at=excluded.updated_at",
        params![CURRENT, source, serde_json::to_string(summary)?],
    )?;
    Ok(())
}
