// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::loans::{
    LoanPatch, NewLoan, add_loan, delete_loan, emi, list_loans, list_reminders, overdue,
    pay_reminder, progress, reminder_status, total_debt, total_monthly_payment, update_loan,
    upcoming,
};
use crate::utils::{
    fmt_money, maybe_print_json, months_between, parse_date, parse_decimal, pretty_table, today,
};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, settings, sub, today())?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            delete_loan(conn, id)?;
            println!("Removed loan {} and its reminders", id);
        }
        Some(("list", sub)) => list(conn, settings, sub)?,
        Some(("summary", sub)) => summary(conn, settings, sub, today())?,
        Some(("reminders", sub)) => reminders(conn, settings, sub, today())?,
        Some(("pay", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            pay_reminder(conn, id)?;
            println!("Reminder {} marked as paid", id);
        }
        Some(("emi", sub)) => {
            let principal = parse_decimal(sub.get_one::<String>("principal").unwrap())?;
            let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
            let months = *sub.get_one::<u32>("months").unwrap();
            let v = emi(principal, rate, months)?;
            println!(
                "EMI for {} at {}% over {} months: {}",
                fmt_money(&principal, &settings.currency),
                rate,
                months,
                fmt_money(&v, &settings.currency)
            );
        }
        _ => {}
    }
    Ok(())
}

fn opt_decimal(sub: &clap::ArgMatches, id: &str) -> Result<Option<Decimal>> {
    sub.get_one::<String>(id).map(|s| parse_decimal(s)).transpose()
}

fn opt_date(sub: &clap::ArgMatches, id: &str) -> Result<Option<NaiveDate>> {
    sub.get_one::<String>(id).map(|s| parse_date(s)).transpose()
}

pub fn add(
    conn: &Connection,
    settings: &Settings,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let end = parse_date(sub.get_one::<String>("end").unwrap())?;
    let payment = match opt_decimal(sub, "payment")? {
        Some(p) => p,
        None => emi(amount, rate, months_between(start, end))
            .context("Cannot derive the EMI; pass --payment explicitly")?,
    };
    let new = NewLoan {
        name: sub.get_one::<String>("name").unwrap().clone(),
        amount,
        remaining_amount: opt_decimal(sub, "remaining")?,
        interest_rate: rate,
        start_date: start,
        end_date: end,
        payment_amount: payment,
        payment_frequency: sub.get_one::<String>("frequency").unwrap().parse()?,
        kind: sub.get_one::<String>("type").unwrap().parse()?,
    };
    let (loan, reminder) = add_loan(conn, new, today)?;
    println!(
        "Added loan {} '{}' ({} {}), first payment {} due {}",
        loan.id,
        loan.name,
        fmt_money(&loan.payment_amount, &settings.currency),
        loan.payment_frequency,
        reminder.id,
        reminder.date
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = LoanPatch {
        name: sub.get_one::<String>("name").cloned(),
        amount: opt_decimal(sub, "amount")?,
        remaining_amount: opt_decimal(sub, "remaining")?,
        interest_rate: opt_decimal(sub, "rate")?,
        start_date: opt_date(sub, "start")?,
        end_date: opt_date(sub, "end")?,
        payment_amount: opt_decimal(sub, "payment")?,
        payment_frequency: sub
            .get_one::<String>("frequency")
            .map(|s| s.parse())
            .transpose()?,
        kind: sub.get_one::<String>("type").map(|s| s.parse()).transpose()?,
    };
    let loan = update_loan(conn, id, patch)?;
    println!("Updated loan {} '{}'", loan.id, loan.name);
    Ok(())
}

fn list(conn: &Connection, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let loans = list_loans(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &loans)? {
        return Ok(());
    }
    let ccy = &settings.currency;
    let rows = loans
        .iter()
        .map(|l| {
            vec![
                l.id.to_string(),
                l.name.clone(),
                l.r#type.to_string(),
                fmt_money(&l.amount, ccy),
                fmt_money(&l.remaining_amount, ccy),
                format!("{}%", l.interest_rate),
                format!("{} {}", fmt_money(&l.payment_amount, ccy), l.payment_frequency),
                l.next_payment_date.to_string(),
                format!("{}%", progress(l)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Type", "Amount", "Remaining", "Rate", "Payment", "Next", "Paid off"],
            rows
        )
    );
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub loans: usize,
    pub total_debt: Decimal,
    pub monthly_payments: Decimal,
    pub overdue: usize,
    pub upcoming: usize,
}

pub fn loan_summary(conn: &Connection, today: NaiveDate) -> Result<LoanSummary> {
    let loans = list_loans(conn)?;
    let reminders = list_reminders(conn)?;
    Ok(LoanSummary {
        loans: loans.len(),
        total_debt: total_debt(&loans),
        monthly_payments: total_monthly_payment(&loans),
        overdue: overdue(&reminders, today).len(),
        upcoming: upcoming(&reminders, today).len(),
    })
}

fn summary(
    conn: &Connection,
    settings: &Settings,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    let s = loan_summary(conn, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let rows = vec![
        vec![
            "Total debt".into(),
            format!("{} across {} loans", fmt_money(&s.total_debt, &settings.currency), s.loans),
        ],
        vec![
            "Monthly payments".into(),
            fmt_money(&s.monthly_payments, &settings.currency),
        ],
        vec![
            "Upcoming payments".into(),
            format!(
                "{} ({} overdue, {} upcoming)",
                s.overdue + s.upcoming,
                s.overdue,
                s.upcoming
            ),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRow {
    pub id: i64,
    pub loan_id: i64,
    pub loan: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub status: String,
}

fn reminders(
    conn: &Connection,
    settings: &Settings,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    let all = list_reminders(conn)?;
    let selected = match sub.get_one::<String>("filter").unwrap().trim() {
        "all" => all,
        "overdue" => overdue(&all, today),
        "upcoming" => upcoming(&all, today),
        other => return Err(anyhow!("Invalid filter '{}', expected all|overdue|upcoming", other)),
    };
    let loans = list_loans(conn)?;
    let data: Vec<ReminderRow> = selected
        .into_iter()
        .map(|r| ReminderRow {
            id: r.id,
            loan_id: r.loan_id,
            loan: loans
                .iter()
                .find(|l| l.id == r.loan_id)
                .map(|l| l.name.clone())
                .unwrap_or_default(),
            date: r.date,
            amount: r.amount,
            status: reminder_status(r.date, r.is_paid, today).to_string(),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.loan.clone(),
                    r.date.to_string(),
                    fmt_money(&r.amount, &settings.currency),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Loan", "Due", "Amount", "Status"], rows)
        );
    }
    Ok(())
}
