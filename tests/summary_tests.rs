// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pennywise::error::FinanceError;
use pennywise::models::{FinancialSummary, Transaction, TxType};
use pennywise::summary::{apply_transaction, summarize};
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn tx(id: &str, amount: &str, category: &str, kind: TxType) -> Transaction {
    Transaction {
        id: id.into(),
        date: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
        description: format!("{} {}", category, id),
        amount: dec(amount),
        category: category.into(),
        r#type: kind,
    }
}

/// Income 1000, one Food expense of 400.
fn base() -> FinancialSummary {
    summarize(
        vec![
            tx("i1", "1000", "Income", TxType::Income),
            tx("e1", "400", "Food", TxType::Expense),
        ],
        Vec::new(),
    )
    .unwrap()
}

/// Several categories with different totals.
fn busy() -> FinancialSummary {
    summarize(
        vec![
            tx("i1", "5200", "Income", TxType::Income),
            tx("e1", "320.50", "Food", TxType::Expense),
            tx("e2", "1400", "Housing", TxType::Expense),
            tx("e3", "75.25", "Transport", TxType::Expense),
            tx("e4", "210", "Food", TxType::Expense),
        ],
        Vec::new(),
    )
    .unwrap()
}

fn assert_balanced(s: &FinancialSummary) {
    assert_eq!(s.balance, s.total_income - s.total_expenses);
}

fn assert_sorted(s: &FinancialSummary) {
    for pair in s.top_expense_categories.windows(2) {
        assert!(pair[0].amount >= pair[1].amount, "categories not sorted");
    }
}

#[test]
fn base_fixture_matches_scenario() {
    let s = base();
    assert_eq!(s.total_income, dec("1000"));
    assert_eq!(s.total_expenses, dec("400"));
    assert_eq!(s.balance, dec("600"));
    assert_eq!(s.savings_rate, 60);
    assert_eq!(s.top_expense_categories.len(), 1);
    assert_eq!(s.top_expense_categories[0].percentage, 100);
}

#[test]
fn income_adds_to_total_and_leaves_categories() {
    for start in [base(), busy()] {
        for amount in ["1", "250", "999.99"] {
            let before: Vec<_> = start
                .top_expense_categories
                .iter()
                .map(|c| (c.category.clone(), c.amount))
                .collect();
            let next =
                apply_transaction(Some(&start), tx("n", amount, "Income", TxType::Income)).unwrap();
            assert_eq!(next.total_income, start.total_income + dec(amount));
            assert_eq!(next.total_expenses, start.total_expenses);
            let after: Vec<_> = next
                .top_expense_categories
                .iter()
                .map(|c| (c.category.clone(), c.amount))
                .collect();
            assert_eq!(before, after);
            assert_balanced(&next);
        }
    }
}

#[test]
fn expense_in_existing_category_grows_that_entry() {
    let start = busy();
    for category in ["Food", "Housing", "Transport"] {
        let prior = start
            .top_expense_categories
            .iter()
            .find(|c| c.category == category)
            .unwrap()
            .clone();
        let next =
            apply_transaction(Some(&start), tx("n", "42.10", category, TxType::Expense)).unwrap();
        let entry = next
            .top_expense_categories
            .iter()
            .find(|c| c.category == category)
            .unwrap();
        assert_eq!(entry.amount, prior.amount + dec("42.10"));
        assert_eq!(entry.transactions.len(), prior.transactions.len() + 1);
        assert_eq!(
            next.top_expense_categories.len(),
            start.top_expense_categories.len()
        );
        assert_sorted(&next);
        assert_balanced(&next);
    }
}

#[test]
fn expense_in_new_category_appends_one_entry() {
    let start = busy();
    let next =
        apply_transaction(Some(&start), tx("n", "12", "Pets", TxType::Expense)).unwrap();
    assert_eq!(
        next.top_expense_categories.len(),
        start.top_expense_categories.len() + 1
    );
    let pets = next
        .top_expense_categories
        .iter()
        .find(|c| c.category == "Pets")
        .unwrap();
    assert_eq!(pets.amount, dec("12"));
    assert_eq!(pets.transactions.len(), 1);
    assert_sorted(&next);
}

#[test]
fn balance_invariant_holds_across_a_sequence() {
    let mut s: Option<FinancialSummary> = None;
    let steps = [
        ("300", "Food", TxType::Expense),
        ("2000", "Income", TxType::Income),
        ("80", "Travel", TxType::Expense),
        ("1250", "Food", TxType::Expense),
        ("45", "Income", TxType::Income),
    ];
    for (i, (amount, category, kind)) in steps.into_iter().enumerate() {
        let next = apply_transaction(s.as_ref(), tx(&i.to_string(), amount, category, kind)).unwrap();
        assert_balanced(&next);
        assert_sorted(&next);
        assert_eq!(next.transactions.len(), i + 1);
        assert_eq!(next.transactions[0].id, i.to_string());
        s = Some(next);
    }
}

#[test]
fn adding_food_expense_updates_totals_and_share() {
    let next = apply_transaction(Some(&base()), tx("n", "100", "Food", TxType::Expense)).unwrap();
    assert_eq!(next.total_expenses, dec("500"));
    assert_eq!(next.balance, dec("500"));
    assert_eq!(next.savings_rate, 50);
    assert_eq!(next.top_expense_categories.len(), 1);
    assert_eq!(next.top_expense_categories[0].category, "Food");
    assert_eq!(next.top_expense_categories[0].amount, dec("500"));
    assert_eq!(next.top_expense_categories[0].percentage, 100);
}

#[test]
fn adding_travel_expense_recomputes_every_percentage() {
    let next =
        apply_transaction(Some(&base()), tx("n", "50", "Travel", TxType::Expense)).unwrap();
    let got: Vec<_> = next
        .top_expense_categories
        .iter()
        .map(|c| (c.category.as_str(), c.amount, c.percentage))
        .collect();
    assert_eq!(got, vec![("Food", dec("400"), 89), ("Travel", dec("50"), 11)]);
    assert_eq!(next.savings_rate, 55);
}

#[test]
fn percentages_are_rounded_independently() {
    let s = summarize(
        vec![
            tx("a", "1", "A", TxType::Expense),
            tx("b", "1", "B", TxType::Expense),
            tx("c", "1", "C", TxType::Expense),
        ],
        Vec::new(),
    )
    .unwrap();
    let total: i64 = s.top_expense_categories.iter().map(|c| c.percentage).sum();
    assert_eq!(total, 99);
}

#[test]
fn zero_income_yields_zero_savings_rate() {
    let only_expense = apply_transaction(None, tx("e", "80", "Food", TxType::Expense)).unwrap();
    assert_eq!(only_expense.total_income, Decimal::ZERO);
    assert_eq!(only_expense.savings_rate, 0);
    assert_eq!(only_expense.balance, dec("-80"));

    let empty = summarize(Vec::new(), Vec::new()).unwrap();
    assert_eq!(empty.savings_rate, 0);
    assert!(empty.top_expense_categories.is_empty());
}

#[test]
fn rejects_malformed_transactions() {
    let start = base();
    let cases = [
        tx("z", "0", "Food", TxType::Expense),
        tx("neg", "-5", "Food", TxType::Expense),
        tx("c", "5", "   ", TxType::Expense),
        Transaction {
            description: " ".into(),
            ..tx("d", "5", "Food", TxType::Income)
        },
    ];
    for bad in cases {
        let err = apply_transaction(Some(&start), bad).unwrap_err();
        assert!(matches!(err, FinanceError::Validation { .. }));
    }
}

#[test]
fn oversized_amounts_fail_instead_of_overflowing() {
    // 0.01 of income against a near-limit expense
    let tiny_income = apply_transaction(None, tx("i", "0.01", "Income", TxType::Income)).unwrap();
    let huge = "1000000000000000000000000000";
    let err = apply_transaction(Some(&tiny_income), tx("e", huge, "Food", TxType::Expense))
        .unwrap_err();
    assert!(matches!(err, FinanceError::Validation { .. }));
    assert_eq!(tiny_income.transactions.len(), 1);

    // totals past Decimal::MAX
    let near_max = "70000000000000000000000000000";
    let first = apply_transaction(None, tx("a", near_max, "Rent", TxType::Expense)).unwrap();
    let err = apply_transaction(Some(&first), tx("b", near_max, "Rent", TxType::Expense))
        .unwrap_err();
    assert!(matches!(err, FinanceError::Validation { .. }));

    let err = summarize(
        vec![
            tx("a", near_max, "Income", TxType::Income),
            tx("b", near_max, "Income", TxType::Income),
        ],
        Vec::new(),
    )
    .unwrap_err();
    assert!(matches!(err, FinanceError::Validation { .. }));
}
