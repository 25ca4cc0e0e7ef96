// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let user = session.login(email, password)?;
            println!("Welcome back, {} <{}>", user.name, user.email);
        }
        Some(("signup", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let user = session.signup(name, email, password)?;
            println!("Account created for {} <{}>", user.name, user.email);
        }
        Some(("logout", _)) => {
            session.logout()?;
            println!("Logged out");
        }
        Some(("whoami", _)) => match session.user() {
            Some(u) => println!("{} <{}> ({})", u.name, u.email, u.id),
            None => println!("Not logged in"),
        },
        _ => {}
    }
    Ok(())
}
