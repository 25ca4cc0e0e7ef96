// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use pennywise::config::Settings;
use pennywise::session::{Session, SessionStore};
use pennywise::{cli, commands, db};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PENNYWISE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let settings = Settings::load(&conn)?;
    let mut session = Session::load(SessionStore::new(db::session_path()?), settings.latency());

    commands::dispatch(&conn, &settings, &mut session, &matches)
}
