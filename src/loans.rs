// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::FinanceError;
use crate::models::{Loan, LoanKind, PaymentFrequency, Reminder, ReminderStatus};
use crate::utils::{add_months, compound};

const UPCOMING_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct NewLoan {
    pub name: String,
    pub amount: Decimal,
    pub remaining_amount: Option<Decimal>,
    pub interest_rate: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub payment_amount: Decimal,
    pub payment_frequency: PaymentFrequency,
    pub kind: LoanKind,
}

#[derive(Debug, Clone, Default)]
pub struct LoanPatch {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub remaining_amount: Option<Decimal>,
    pub interest_rate: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub payment_amount: Option<Decimal>,
    pub payment_frequency: Option<PaymentFrequency>,
    pub kind: Option<LoanKind>,
}

pub fn validate_loan(loan: &Loan) -> Result<(), FinanceError> {
    if loan.name.trim().is_empty() {
        return Err(FinanceError::validation("name", "must not be empty"));
    }
    for (field, value) in [
        ("amount", loan.amount),
        ("interest rate", loan.interest_rate),
        ("payment amount", loan.payment_amount),
    ] {
        if value <= Decimal::ZERO {
            return Err(FinanceError::validation(field, "must be greater than zero"));
        }
    }
    if loan.remaining_amount < Decimal::ZERO || loan.remaining_amount > loan.amount {
        return Err(FinanceError::validation(
            "remaining amount",
            format!("{} must be between 0 and {}", loan.remaining_amount, loan.amount),
        ));
    }
    if loan.end_date < loan.start_date {
        return Err(FinanceError::validation(
            "end date",
            format!("{} is before start date {}", loan.end_date, loan.start_date),
        ));
    }
    Ok(())
}

/// Share of the principal already repaid, in percent (2 dp).
pub fn progress(loan: &Loan) -> Decimal {
    if loan.amount.is_zero() {
        return Decimal::ZERO;
    }
    ((loan.amount - loan.remaining_amount) / loan.amount * Decimal::ONE_HUNDRED).round_dp(2)
}

pub fn monthly_equivalent(payment: Decimal, frequency: PaymentFrequency) -> Decimal {
    match frequency {
        PaymentFrequency::Monthly => payment,
        PaymentFrequency::Weekly => payment * Decimal::from(52) / Decimal::from(12),
        PaymentFrequency::Biweekly => payment * Decimal::from(26) / Decimal::from(12),
    }
}

pub fn total_debt(loans: &[Loan]) -> Decimal {
    loans.iter().map(|l| l.remaining_amount).sum()
}

pub fn total_monthly_payment(loans: &[Loan]) -> Decimal {
    loans
        .iter()
        .map(|l| monthly_equivalent(l.payment_amount, l.payment_frequency))
        .sum::<Decimal>()
        .round_dp(2)
}

/// Longest tenure `emi` will price.
pub const MAX_TENURE_MONTHS: u32 = 1200;

/// Equated monthly installment for `principal` over `months` at an annual rate.
pub fn emi(principal: Decimal, annual_rate_pct: Decimal, months: u32) -> Result<Decimal, FinanceError> {
    if months == 0 || months > MAX_TENURE_MONTHS {
        return Err(FinanceError::validation(
            "tenure",
            format!("{} months is outside 1..={}", months, MAX_TENURE_MONTHS),
        ));
    }
    if principal <= Decimal::ZERO {
        return Err(FinanceError::validation("principal", "must be greater than zero"));
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(FinanceError::validation("interest rate", "must not be negative"));
    }
    let too_large = || FinanceError::validation("emi", "loan terms are too large to compute");
    let n = Decimal::from(months);
    let r = annual_rate_pct / Decimal::from(12) / Decimal::ONE_HUNDRED;
    if r.is_zero() {
        return Ok((principal / n).round_dp(2));
    }
    let factor = compound(r, months).ok_or_else(too_large)?;
    let payment = principal
        .checked_mul(r)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(factor - Decimal::ONE))
        .ok_or_else(too_large)?;
    Ok(payment.round_dp(2))
}

pub fn reminder_status(date: NaiveDate, is_paid: bool, today: NaiveDate) -> ReminderStatus {
    if is_paid {
        ReminderStatus::Paid
    } else if date <= today {
        ReminderStatus::Due
    } else if date <= today + Duration::days(UPCOMING_WINDOW_DAYS) {
        ReminderStatus::Upcoming
    } else {
        ReminderStatus::Scheduled
    }
}

fn with_status(reminders: &[Reminder], today: NaiveDate, want: ReminderStatus) -> Vec<Reminder> {
    let mut out: Vec<Reminder> = reminders
        .iter()
        .filter(|r| reminder_status(r.date, r.is_paid, today) == want)
        .cloned()
        .collect();
    out.sort_by_key(|r| r.date);
    out
}

pub fn overdue(reminders: &[Reminder], today: NaiveDate) -> Vec<Reminder> {
    with_status(reminders, today, ReminderStatus::Due)
}

pub fn upcoming(reminders: &[Reminder], today: NaiveDate) -> Vec<Reminder> {
    with_status(reminders, today, ReminderStatus::Upcoming)
}

fn dec(s: &str, what: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid {} '{}' in database", what, s))
}

type LoanRow = (
    i64,
    String,
    String,
    String,
    String,
    NaiveDate,
    NaiveDate,
    String,
    String,
    String,
    NaiveDate,
);

const LOAN_COLUMNS: &str = "id, name, amount, remaining_amount, interest_rate, start_date, end_date, payment_amount, payment_frequency, type, next_payment_date";

fn read_loan_row(r: &Row<'_>) -> rusqlite::Result<LoanRow> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
        r.get(8)?,
        r.get(9)?,
        r.get(10)?,
    ))
}

fn decode_loan(row: LoanRow) -> Result<Loan> {
    let (id, name, amount, remaining, rate, start, end, payment, freq, kind, next) = row;
    Ok(Loan {
        id,
        name,
        amount: dec(&amount, "amount")?,
        remaining_amount: dec(&remaining, "remaining amount")?,
        interest_rate: dec(&rate, "interest rate")?,
        start_date: start,
        end_date: end,
        payment_amount: dec(&payment, "payment amount")?,
        payment_frequency: freq.parse()?,
        r#type: kind.parse()?,
        next_payment_date: next,
    })
}

pub fn get_loan(conn: &Connection, id: i64) -> Result<Loan> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM loans WHERE id=?1", LOAN_COLUMNS),
            params![id],
            read_loan_row,
        )
        .optional()?
        .ok_or_else(|| FinanceError::not_found("Loan", id))?;
    decode_loan(row)
}

pub fn list_loans(conn: &Connection) -> Result<Vec<Loan>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM loans ORDER BY id", LOAN_COLUMNS))?;
    let rows = stmt.query_map([], read_loan_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(decode_loan(row?)?);
    }
    Ok(out)
}

/// Insert a loan plus the reminder for its first payment, a month from `today`.
pub fn add_loan(conn: &Connection, new: NewLoan, today: NaiveDate) -> Result<(Loan, Reminder)> {
    let remaining = new
        .remaining_amount
        .filter(|r| !r.is_zero())
        .unwrap_or(new.amount);
    let mut loan = Loan {
        id: 0,
        name: new.name.trim().to_string(),
        amount: new.amount,
        remaining_amount: remaining,
        interest_rate: new.interest_rate,
        start_date: new.start_date,
        end_date: new.end_date,
        payment_amount: new.payment_amount,
        payment_frequency: new.payment_frequency,
        r#type: new.kind,
        next_payment_date: add_months(today, 1),
    };
    validate_loan(&loan)?;

    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO loans(name, amount, remaining_amount, interest_rate, start_date, end_date, payment_amount, payment_frequency, type, next_payment_date)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)",
        params![
            loan.name,
            loan.amount.to_string(),
            loan.remaining_amount.to_string(),
            loan.interest_rate.to_string(),
            loan.start_date,
            loan.end_date,
            loan.payment_amount.to_string(),
            loan.payment_frequency.as_str(),
            loan.r#type.as_str(),
            loan.next_payment_date,
        ],
    )?;
    loan.id = tx.last_insert_rowid();
    tx.execute(
        "INSERT INTO reminders(loan_id, date, amount, is_paid) VALUES (?1,?2,?3,0)",
        params![loan.id, loan.next_payment_date, loan.payment_amount.to_string()],
    )?;
    let reminder = Reminder {
        id: tx.last_insert_rowid(),
        loan_id: loan.id,
        date: loan.next_payment_date,
        amount: loan.payment_amount,
        is_paid: false,
    };
    tx.commit()?;
    info!(loan = loan.id, reminder = reminder.id, "loan added");
    Ok((loan, reminder))
}

pub fn update_loan(conn: &Connection, id: i64, patch: LoanPatch) -> Result<Loan> {
    let mut loan = get_loan(conn, id)?;
    if let Some(name) = patch.name {
        loan.name = name.trim().to_string();
    }
    if let Some(v) = patch.amount {
        loan.amount = v;
    }
    if let Some(v) = patch.remaining_amount {
        loan.remaining_amount = v;
    }
    if let Some(v) = patch.interest_rate {
        loan.interest_rate = v;
    }
    if let Some(v) = patch.start_date {
        loan.start_date = v;
    }
    if let Some(v) = patch.end_date {
        loan.end_date = v;
    }
    if let Some(v) = patch.payment_amount {
        loan.payment_amount = v;
    }
    if let Some(v) = patch.payment_frequency {
        loan.payment_frequency = v;
    }
    if let Some(v) = patch.kind {
        loan.r#type = v;
    }
    validate_loan(&loan)?;

    conn.execute(
        "UPDATE loans SET name=?2, amount=?3, remaining_amount=?4, interest_rate=?5, start_date=?6,
         end_date=?7, payment_amount=?8, payment_frequency=?9, type=?10 WHERE id=?1",
        params![
            id,
            loan.name,
            loan.amount.to_string(),
            loan.remaining_amount.to_string(),
            loan.interest_rate.to_string(),
            loan.start_date,
            loan.end_date,
            loan.payment_amount.to_string(),
            loan.payment_frequency.as_str(),
            loan.r#type.as_str(),
        ],
    )?;
    info!(loan = id, "loan updated");
    Ok(loan)
}

/// Remove a loan together with all of its reminders.
pub fn delete_loan(conn: &Connection, id: i64) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM reminders WHERE loan_id=?1", params![id])?;
    let removed = tx.execute("DELETE FROM loans WHERE id=?1", params![id])?;
    if removed == 0 {
        return Err(FinanceError::not_found("Loan", id).into());
    }
    tx.commit()?;
    info!(loan = id, "loan deleted");
    Ok(())
}

fn read_reminder_row(r: &Row<'_>) -> rusqlite::Result<(i64, i64, NaiveDate, String, bool)> {
    Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?))
}

pub fn list_reminders(conn: &Connection) -> Result<Vec<Reminder>> {
    let mut stmt =
        conn.prepare("SELECT id, loan_id, date, amount, is_paid FROM reminders ORDER BY date, id")?;
    let rows = stmt.query_map([], read_reminder_row)?;
    let mut out = Vec::new();
    for row in rows {
        let (id, loan_id, date, amount, is_paid) = row?;
        out.push(Reminder {
            id,
            loan_id,
            date,
            amount: dec(&amount, "reminder amount")?,
            is_paid,
        });
    }
    Ok(out)
}

pub fn pay_reminder(conn: &Connection, id: i64) -> Result<()> {
    let updated = conn.execute("UPDATE reminders SET is_paid=1 WHERE id=?1", params![id])?;
    if updated == 0 {
        return Err(FinanceError::not_found("Reminder", id).into());
    }
    info!(reminder = id, "reminder marked paid");
    Ok(())
}
