// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pennywise::config::{Backend, Settings, get_setting};
use pennywise::db::init_schema;
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

#[test]
fn defaults_without_stored_values() {
    let conn = setup();
    let s = Settings::load(&conn).unwrap();
    assert_eq!(s.currency, "INR");
    assert_eq!(s.backend, Backend::Mock);
    assert_eq!(s.api_base_url, "https://api.deepseek.com");
    assert!(s.simulate_latency);
}

#[test]
fn set_normalizes_before_storing() {
    let conn = setup();
    assert_eq!(Settings::set(&conn, "currency", " usd ").unwrap(), "USD");
    assert_eq!(Settings::set(&conn, "backend", "HTTP").unwrap(), "http");
    assert_eq!(
        Settings::set(&conn, "api_base_url", "http://localhost:8080/").unwrap(),
        "http://localhost:8080"
    );
    assert_eq!(Settings::set(&conn, "simulate_latency", "off").unwrap(), "false");

    let s = Settings::load(&conn).unwrap();
    assert_eq!(s.currency, "USD");
    assert_eq!(s.backend, Backend::Http);
    assert_eq!(s.api_base_url, "http://localhost:8080");
    assert!(!s.simulate_latency);
}

#[test]
fn set_rejects_bad_values_and_unknown_keys() {
    let conn = setup();
    assert!(Settings::set(&conn, "currency", "rupees").is_err());
    assert!(Settings::set(&conn, "backend", "grpc").is_err());
    assert!(Settings::set(&conn, "api_base_url", "ftp://x").is_err());
    assert!(Settings::set(&conn, "simulate_latency", "maybe").is_err());
    let err = Settings::set(&conn, "theme", "dark").unwrap_err();
    assert!(err.to_string().contains("Unknown setting"));
    assert_eq!(get_setting(&conn, "currency").unwrap(), None);
    assert_eq!(get_setting(&conn, "theme").unwrap(), None);
}

#[test]
fn api_key_is_never_serialized() {
    let conn = setup();
    Settings::set(&conn, "api_key", "sk-test").unwrap();
    let s = Settings::load(&conn).unwrap();
    assert!(s.api_key.is_some());
    let body = serde_json::to_string(&s).unwrap();
    assert!(!body.contains("sk-test"));
    assert!(!body.contains("api_key"));
}
