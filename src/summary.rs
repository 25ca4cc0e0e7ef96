// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spending aggregates derived from a transaction list.
//!
//! Every derived field of a [`FinancialSummary`] is rebuilt from scratch on
//! each mutation. Category percentages are rounded independently and are not
//! normalized, so they may not sum to exactly 100.

use rust_decimal::Decimal;

use crate::error::FinanceError;
use crate::models::{CategoryData, FinancialInsight, FinancialSummary, Transaction, TxType};
use crate::utils::percent_of;

/// Reject transactions the aggregates cannot account for.
pub fn validate_transaction(tx: &Transaction) -> Result<(), FinanceError> {
    if tx.amount <= Decimal::ZERO {
        return Err(FinanceError::validation(
            "amount",
            format!("{} must be greater than zero", tx.amount),
        ));
    }
    if tx.description.trim().is_empty() {
        return Err(FinanceError::validation("description", "must not be empty"));
    }
    if tx.category.trim().is_empty() {
        return Err(FinanceError::validation("category", "must not be empty"));
    }
    Ok(())
}

fn overflow(field: &'static str) -> FinanceError {
    FinanceError::validation(field, "exceeds the range the dashboard can total")
}

fn checked_sum(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, FinanceError> {
    a.checked_add(b).ok_or_else(|| overflow(field))
}

/// Savings rate in whole percent; zero when there is no income.
pub fn savings_rate(balance: Decimal, total_income: Decimal) -> Result<i64, FinanceError> {
    percent_of(balance, total_income).ok_or_else(|| overflow("savings rate"))
}

/// Fold one new transaction into an existing summary (or the empty state).
/// `prior` is never modified.
pub fn apply_transaction(
    prior: Option<&FinancialSummary>,
    tx: Transaction,
) -> Result<FinancialSummary, FinanceError> {
    validate_transaction(&tx)?;
    let mut next = prior.cloned().unwrap_or_else(FinancialSummary::empty);

    match tx.r#type {
        TxType::Income => {
            next.total_income = checked_sum(next.total_income, tx.amount, "total income")?
        }
        TxType::Expense => {
            next.total_expenses = checked_sum(next.total_expenses, tx.amount, "total expenses")?
        }
    }
    next.balance = next
        .total_income
        .checked_sub(next.total_expenses)
        .ok_or_else(|| overflow("balance"))?;
    next.savings_rate = savings_rate(next.balance, next.total_income)?;

    if tx.r#type == TxType::Expense {
        add_to_category(&mut next.top_expense_categories, &tx)?;
        rebalance(&mut next.top_expense_categories, next.total_expenses)?;
    }

    next.transactions.insert(0, tx);
    Ok(next)
}

fn add_to_category(categories: &mut Vec<CategoryData>, tx: &Transaction) -> Result<(), FinanceError> {
    match categories.iter_mut().find(|c| c.category == tx.category) {
        Some(cat) => {
            cat.amount = checked_sum(cat.amount, tx.amount, "category total")?;
            cat.transactions.push(tx.clone());
        }
        None => categories.push(CategoryData {
            category: tx.category.clone(),
            amount: tx.amount,
            percentage: 0,
            transactions: vec![tx.clone()],
        }),
    }
    Ok(())
}

/// Build a summary from scratch.
pub fn summarize(
    transactions: Vec<Transaction>,
    insights: Vec<FinancialInsight>,
) -> Result<FinancialSummary, FinanceError> {
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut categories: Vec<CategoryData> = Vec::new();

    for tx in &transactions {
        match tx.r#type {
            TxType::Income => total_income = checked_sum(total_income, tx.amount, "total income")?,
            TxType::Expense => {
                total_expenses = checked_sum(total_expenses, tx.amount, "total expenses")?;
                add_to_category(&mut categories, tx)?;
            }
        }
    }
    rebalance(&mut categories, total_expenses)?;

    let balance = total_income
        .checked_sub(total_expenses)
        .ok_or_else(|| overflow("balance"))?;
    Ok(FinancialSummary {
        total_income,
        total_expenses,
        balance,
        savings_rate: savings_rate(balance, total_income)?,
        top_expense_categories: categories,
        transactions,
        insights,
    })
}

// Stable sort keeps insertion order among equal amounts.
fn rebalance(categories: &mut [CategoryData], total_expenses: Decimal) -> Result<(), FinanceError> {
    for cat in categories.iter_mut() {
        cat.percentage =
            percent_of(cat.amount, total_expenses).ok_or_else(|| overflow("category share"))?;
    }
    categories.sort_by(|a, b| b.amount.cmp(&a.amount));
    Ok(())
}

fn find_category<'a>(list: &'a [CategoryData], name: &str) -> Option<&'a CategoryData> {
    list.iter().find(|c| c.category == name)
}

fn describe(cat: Option<&CategoryData>) -> String {
    match cat {
        Some(c) => format!("{} {} ({}%)", c.category, c.amount, c.percentage),
        None => "absent".into(),
    }
}

/// Fields of `stored` that disagree with a rebuild from its own transactions.
/// Categories are matched by name, since equal amounts may be ordered
/// differently by incremental and full rebuilds.
pub fn drift(stored: &FinancialSummary) -> Result<Vec<(&'static str, String, String)>, FinanceError> {
    let fresh = summarize(stored.transactions.clone(), Vec::new())?;
    let mut out = Vec::new();
    if stored.total_income != fresh.total_income {
        out.push(("totalIncome", stored.total_income.to_string(), fresh.total_income.to_string()));
    }
    if stored.total_expenses != fresh.total_expenses {
        out.push((
            "totalExpenses",
            stored.total_expenses.to_string(),
            fresh.total_expenses.to_string(),
        ));
    }
    if stored.total_income.checked_sub(stored.total_expenses) != Some(stored.balance) {
        out.push(("balance", stored.balance.to_string(), fresh.balance.to_string()));
    }
    if stored.savings_rate != fresh.savings_rate {
        out.push(("savingsRate", stored.savings_rate.to_string(), fresh.savings_rate.to_string()));
    }

    for cat in &stored.top_expense_categories {
        let expected = find_category(&fresh.top_expense_categories, &cat.category);
        let matches =
            expected.is_some_and(|f| f.amount == cat.amount && f.percentage == cat.percentage);
        if !matches {
            out.push(("topExpenseCategories", describe(Some(cat)), describe(expected)));
        }
    }
    for cat in &fresh.top_expense_categories {
        if find_category(&stored.top_expense_categories, &cat.category).is_none() {
            out.push(("topExpenseCategories", describe(None), describe(Some(cat))));
        }
    }
    if stored
        .top_expense_categories
        .windows(2)
        .any(|w| w[0].amount < w[1].amount)
    {
        out.push(("topExpenseCategories", "unsorted".into(), "descending by amount".into()));
    }
    Ok(out)
}
