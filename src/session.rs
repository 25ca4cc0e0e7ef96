// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Login state. The user record is read once when a [`Session`] is loaded
//! and removed from disk on logout. No credentials are checked.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::FinanceError;
use crate::latency::Latency;
use crate::models::User;

const AUTH_DELAY: Duration = Duration::from_millis(1000);

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable records both mean "logged out".
    pub fn read(&self) -> Option<User> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read session");
                return None;
            }
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt session");
                None
            }
        }
    }

    pub fn write(&self, user: &User) -> Result<(), FinanceError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let body = serde_json::to_string_pretty(user).map_err(std::io::Error::other)?;
        fs::write(&self.path, body)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), FinanceError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

pub struct Session {
    store: SessionStore,
    user: Option<User>,
    latency: Latency,
}

fn check_email(email: &str) -> Result<String, FinanceError> {
    let email = email.trim();
    if !EMAIL.is_match(email) {
        return Err(FinanceError::validation("email", format!("'{}' is not an email address", email)));
    }
    Ok(email.to_string())
}

fn check_password(password: &str) -> Result<(), FinanceError> {
    if password.trim().is_empty() {
        return Err(FinanceError::validation("password", "must not be empty"));
    }
    Ok(())
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

impl Session {
    pub fn load(store: SessionStore, latency: Latency) -> Self {
        let user = store.read();
        debug!(authenticated = user.is_some(), "session loaded");
        Session {
            store,
            user,
            latency,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn require_user(&self) -> Result<&User, FinanceError> {
        self.user.as_ref().ok_or(FinanceError::NotAuthenticated)
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<&User, FinanceError> {
        let email = check_email(email)?;
        check_password(password)?;
        self.latency.wait(AUTH_DELAY)?;
        let name = local_part(&email).to_string();
        self.establish(User {
            id: format!("user-{}", name.to_lowercase()),
            email,
            name,
        })
    }

    pub fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<&User, FinanceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinanceError::validation("name", "must not be empty"));
        }
        let email = check_email(email)?;
        check_password(password)?;
        self.latency.wait(AUTH_DELAY)?;
        self.establish(User {
            id: format!("user-{}", local_part(&email).to_lowercase()),
            email,
            name: name.to_string(),
        })
    }

    fn establish(&mut self, user: User) -> Result<&User, FinanceError> {
        self.store.write(&user)?;
        info!(email = %user.email, "logged in");
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) -> Result<(), FinanceError> {
        self.user = None;
        self.store.clear()?;
        info!("logged out");
        Ok(())
    }
}
