// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

use crate::advisor::{HttpInvestmentAdvisor, InvestmentAdvisor, MockInvestmentAdvisor};
use crate::analysis::{HttpStatementAnalyzer, MockStatementAnalyzer, StatementAnalyzer};
use crate::latency::Latency;

pub const API_KEY_ENV: &str = "PENNYWISE_API_KEY";
pub const KEYS: [&str; 5] = ["currency", "backend", "api_base_url", "api_key", "simulate_latency"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Mock,
    Http,
}

#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub currency: String,
    pub backend: Backend,
    pub api_base_url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub simulate_latency: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: "INR".into(),
            backend: Backend::Mock,
            api_base_url: "https://api.deepseek.com".into(),
            api_key: None,
            simulate_latency: true,
        }
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    Ok(conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?)
}

fn put_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

fn parse_backend(v: &str) -> Result<Backend> {
    match v.trim().to_ascii_lowercase().as_str() {
        "mock" => Ok(Backend::Mock),
        "http" => Ok(Backend::Http),
        other => Err(anyhow!("Invalid backend '{}', expected mock|http", other)),
    }
}

fn parse_bool(v: &str) -> Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(anyhow!("Invalid boolean '{}', expected true|false", other)),
    }
}

/// Normalize and check a value before it is stored.
fn normalize(key: &str, value: &str) -> Result<String> {
    let v = value.trim();
    match key {
        "currency" => {
            if v.len() != 3 || !v.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(anyhow!("Invalid currency '{}', expected a 3-letter code", v));
            }
            Ok(v.to_uppercase())
        }
        "backend" => Ok(match parse_backend(v)? {
            Backend::Mock => "mock".into(),
            Backend::Http => "http".into(),
        }),
        "api_base_url" => {
            if !(v.starts_with("http://") || v.starts_with("https://")) {
                return Err(anyhow!("Invalid api_base_url '{}', expected http(s)://...", v));
            }
            Ok(v.trim_end_matches('/').to_string())
        }
        "api_key" => {
            if v.is_empty() {
                return Err(anyhow!("api_key must not be empty"));
            }
            Ok(v.to_string())
        }
        "simulate_latency" => Ok(parse_bool(v)?.to_string()),
        other => Err(anyhow!(
            "Unknown setting '{}' (known: {})",
            other,
            KEYS.join(", ")
        )),
    }
}

impl Settings {
    /// Stored settings over defaults, with the API key overridable from the environment.
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut s = Settings::default();
        if let Some(v) = get_setting(conn, "currency")? {
            s.currency = v;
        }
        if let Some(v) = get_setting(conn, "backend")? {
            s.backend = parse_backend(&v)?;
        }
        if let Some(v) = get_setting(conn, "api_base_url")? {
            s.api_base_url = v;
        }
        s.api_key = get_setting(conn, "api_key")?;
        if let Ok(v) = std::env::var(API_KEY_ENV) {
            if !v.trim().is_empty() {
                s.api_key = Some(v);
            }
        }
        if let Some(v) = get_setting(conn, "simulate_latency")? {
            s.simulate_latency = parse_bool(&v)?;
        }
        Ok(s)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<String> {
        let key = key.trim();
        let v = normalize(key, value)?;
        put_setting(conn, key, &v)?;
        Ok(v)
    }

    pub fn latency(&self) -> Latency {
        Latency::new(self.simulate_latency)
    }

    pub fn analyzer(&self, today: NaiveDate) -> Box<dyn StatementAnalyzer> {
        match self.backend {
            Backend::Mock => Box::new(MockStatementAnalyzer::new(today, self.latency())),
            Backend::Http => Box::new(HttpStatementAnalyzer::new(
                self.api_base_url.clone(),
                self.api_key.clone(),
            )),
        }
    }

    pub fn advisor(&self) -> Box<dyn InvestmentAdvisor> {
        match self.backend {
            Backend::Mock => Box::new(MockInvestmentAdvisor::new(self.latency())),
            Backend::Http => Box::new(HttpInvestmentAdvisor::new(
                self.api_base_url.clone(),
                self.api_key.clone(),
            )),
        }
    }
}
