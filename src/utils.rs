// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const UA: &str = concat!(
    "pennywise/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/pennywise)"
);

pub fn http_client() -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .user_agent(UA)
        .build()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Round half toward positive infinity, the way dashboard figures are shown.
/// `None` on overflow.
pub fn half_up(x: Decimal) -> Option<Decimal> {
    x.checked_add(Decimal::new(5, 1)).map(|v| v.floor())
}

/// [`half_up`] as an integer; `None` when the result does not fit in `i64`.
pub fn round_half_up(x: Decimal) -> Option<i64> {
    half_up(x)?.to_i64()
}

/// `part / whole * 100` rounded; zero when `whole` is zero, `None` on overflow.
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<i64> {
    if whole.is_zero() {
        return Some(0);
    }
    round_half_up(part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)?)
}

/// `(1 + rate)^periods`; `None` on overflow.
pub fn compound(rate: Decimal, periods: u32) -> Option<Decimal> {
    let factor = Decimal::ONE.checked_add(rate)?;
    (0..periods).try_fold(Decimal::ONE, |acc, _| acc.checked_mul(factor))
}

/// Same calendar day `months` later, clamped to the last day of the target month.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.month0() + months;
    let year = date.year() + (total / 12) as i32;
    let month = total % 12 + 1;
    let mut day = date.day();
    loop {
        if let Some(d) = NaiveDate::from_ymd_opt(year, month, day) {
            return d;
        }
        day -= 1;
    }
}

/// Whole months from `start` to `end`, ignoring trailing days.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }
    let mut months =
        (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
