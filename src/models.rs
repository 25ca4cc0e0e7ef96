// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinanceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Expense,
    Income,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(rename = "type")]
    pub r#type: TxType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryData {
    pub category: String,
    pub amount: Decimal,
    pub percentage: i64,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInsight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub actionable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub savings_rate: i64,
    pub top_expense_categories: Vec<CategoryData>,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub insights: Vec<FinancialInsight>,
}

impl FinancialSummary {
    pub fn empty() -> Self {
        FinancialSummary {
            total_income: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            balance: Decimal::ZERO,
            savings_rate: 0,
            top_expense_categories: Vec::new(),
            transactions: Vec::new(),
            insights: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    Monthly,
    Weekly,
    Biweekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanKind {
    Mortgage,
    Auto,
    Personal,
    Student,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub remaining_amount: Decimal,
    pub interest_rate: Decimal, // annual, percent
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub payment_amount: Decimal,
    pub payment_frequency: PaymentFrequency,
    #[serde(rename = "type")]
    pub r#type: LoanKind,
    pub next_payment_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: i64,
    pub loan_id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub is_paid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderStatus {
    Paid,
    Due,
    Upcoming,
    Scheduled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suitability {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecommendation {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub risk_level: String,
    pub expected_return: String,
    pub description: String,
    pub suitability: Suitability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAdvice {
    pub recommendations: Vec<InvestmentRecommendation>,
    pub insights: Vec<String>,
}

macro_rules! keyword_enum {
    ($ty:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = FinanceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Ok($ty::$variant);
                    }
                )+
                Err(FinanceError::validation(
                    $field,
                    format!("'{}' (expected one of: {})", s, [$($text),+].join(", ")),
                ))
            }
        }
    };
}

keyword_enum!(TxType, "type", { Expense => "expense", Income => "income" });
keyword_enum!(PaymentFrequency, "payment frequency", {
    Monthly => "monthly",
    Weekly => "weekly",
    Biweekly => "biweekly",
});
keyword_enum!(LoanKind, "loan type", {
    Mortgage => "mortgage",
    Auto => "auto",
    Personal => "personal",
    Student => "student",
    Other => "other",
});
keyword_enum!(RiskTolerance, "risk tolerance", {
    Low => "low",
    Medium => "medium",
    High => "high",
});
keyword_enum!(Impact, "impact", {
    Positive => "positive",
    Negative => "negative",
    Neutral => "neutral",
});
keyword_enum!(Suitability, "suitability", { High => "High", Medium => "Medium", Low => "Low" });
keyword_enum!(ReminderStatus, "status", {
    Paid => "Paid",
    Due => "Due",
    Upcoming => "Upcoming",
    Scheduled => "Scheduled",
});
