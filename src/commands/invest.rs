// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor::{InvestmentAdvisor, InvestmentRequest, future_value, parse_horizon_years};
use crate::config::Settings;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("advise", sub)) => {
            let advisor = settings.advisor();
            advise(advisor.as_ref(), &settings.currency, sub)?
        }
        Some(("project", sub)) => project(&settings.currency, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn advise(
    advisor: &dyn InvestmentAdvisor,
    currency: &str,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let req = InvestmentRequest {
        risk_tolerance: sub.get_one::<String>("risk").unwrap().parse()?,
        goal: sub.get_one::<String>("goal").unwrap().trim().to_string(),
        time_horizon: sub.get_one::<String>("horizon").unwrap().trim().to_string(),
        currency: currency.to_string(),
    };
    let advice = advisor
        .recommend(&req)
        .context("Could not generate investment recommendations")?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &advice)? {
        return Ok(());
    }
    let rows = advice
        .recommendations
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.r#type.clone(),
                r.risk_level.clone(),
                r.expected_return.clone(),
                r.suitability.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Product", "Type", "Risk", "Expected return", "Suitability"], rows)
    );
    for line in &advice.insights {
        println!("- {}", line);
    }
    Ok(())
}

pub fn project(currency: &str, sub: &clap::ArgMatches) -> Result<()> {
    let initial = parse_decimal(sub.get_one::<String>("initial").unwrap())?;
    let monthly = parse_decimal(sub.get_one::<String>("monthly").unwrap())?;
    let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
    let years = parse_horizon_years(sub.get_one::<String>("horizon").unwrap())?;
    let fv = future_value(initial, monthly, rate, years)?;
    println!(
        "Projected value after {} years at {}%: {}",
        years,
        rate,
        fmt_money(&fv, currency)
    );
    Ok(())
}
