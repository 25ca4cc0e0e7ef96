// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{API_KEY_ENV, Settings};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let s = Settings::load(conn)?;
            let key_state = match (&s.api_key, std::env::var(API_KEY_ENV).is_ok()) {
                (Some(_), true) => format!("set (from {})", API_KEY_ENV),
                (Some(_), false) => "set".to_string(),
                (None, _) => "not set".to_string(),
            };
            let rows = vec![
                vec!["currency".into(), s.currency.clone()],
                vec!["backend".into(), format!("{:?}", s.backend).to_lowercase()],
                vec!["api_base_url".into(), s.api_base_url.clone()],
                vec!["api_key".into(), key_state],
                vec!["simulate_latency".into(), s.simulate_latency.to_string()],
            ];
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = sub.get_one::<String>("value").unwrap();
            let stored = Settings::set(conn, key, value)?;
            if key.trim() == "api_key" {
                println!("api_key updated");
            } else {
                println!("{} = {}", key.trim(), stored);
            }
        }
        _ => {}
    }
    Ok(())
}
