// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analyze;
pub mod auth;
pub mod doctor;
pub mod exporter;
pub mod invest;
pub mod loans;
pub mod reports;
pub mod settings;
pub mod transactions;

use anyhow::Result;
use rusqlite::Connection;

use crate::config::Settings;
use crate::session::Session;
use crate::{cli, db};

/// Route one parsed invocation. Everything except `init`, `auth`, `config`
/// and `invest project` needs a logged-in session.
pub fn dispatch(
    conn: &Connection,
    settings: &Settings,
    session: &mut Session,
    matches: &clap::ArgMatches,
) -> Result<()> {
    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("auth", sub)) => auth::handle(session, sub)?,
        Some(("config", sub)) => self::settings::handle(conn, sub)?,
        Some(("invest", sub)) if sub.subcommand_name() == Some("project") => {
            invest::handle(settings, sub)?
        }
        Some((name, sub)) => {
            session.require_user()?;
            match name {
                "analyze" => analyze::handle(conn, settings, sub)?,
                "tx" => transactions::handle(conn, sub)?,
                "report" => reports::handle(conn, settings, sub)?,
                "loan" => loans::handle(conn, settings, sub)?,
                "invest" => invest::handle(settings, sub)?,
                "export" => exporter::handle(conn, sub)?,
                "doctor" => doctor::handle(conn)?,
                _ => {}
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
