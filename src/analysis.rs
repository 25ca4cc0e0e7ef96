// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Statement analysis backends.
//!
//! Nothing here interprets statement contents. The mock backend fabricates a
//! plausible month of spending, the HTTP backend delegates to the
//! `/v1/finance/analyze` endpoint.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::FinanceError;
use crate::latency::Latency;
use crate::models::{FinancialInsight, FinancialSummary, Impact, Transaction, TxType};
use crate::summary::summarize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Csv,
    Pdf,
}

#[derive(Debug, Clone)]
pub struct StatementFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub kind: StatementKind,
}

impl StatementFile {
    /// Accepts `.csv` and `.pdf` by extension only; reads nothing but the size.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FinanceError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let kind = match ext.as_str() {
            "csv" => StatementKind::Csv,
            "pdf" => StatementKind::Pdf,
            _ => return Err(FinanceError::UnsupportedFile(name)),
        };
        let size = std::fs::metadata(path)?.len();
        Ok(StatementFile {
            path: path.to_path_buf(),
            name,
            size,
            kind,
        })
    }

    /// 2s plus 1ms per KiB, capped at 5s.
    pub fn processing_time(&self) -> Duration {
        Duration::from_millis((2000 + self.size / 1024).min(5000))
    }
}

pub trait StatementAnalyzer {
    fn analyze(&self, file: &StatementFile) -> Result<FinancialSummary, FinanceError>;
}

const CATEGORIES: [(&str, &[&str]); 10] = [
    (
        "Housing",
        &["Rent Payment", "Home Maintenance", "Property Tax", "Housing Society Fees"],
    ),
    (
        "Food & Dining",
        &["Swiggy Order", "Zomato Order", "Big Basket", "Grocery Store", "Restaurant Bill"],
    ),
    (
        "Transportation",
        &["Ola Ride", "Uber Trip", "Petrol Pump", "Metro Card Recharge", "Bus Pass"],
    ),
    (
        "Entertainment",
        &["BookMyShow", "Netflix Subscription", "Amazon Prime", "Hotstar Premium", "PVR Cinema"],
    ),
    (
        "Shopping",
        &["Myntra", "Amazon.in", "Flipkart", "Reliance Digital", "Croma Purchase"],
    ),
    (
        "Utilities",
        &["Electricity Bill", "Water Bill", "Jio Fiber", "Airtel Recharge", "Tata Power"],
    ),
    (
        "Healthcare",
        &["Apollo Pharmacy", "Medical Test", "Doctor Consultation", "Health Insurance", "Gym Membership"],
    ),
    (
        "Travel",
        &["MakeMyTrip", "IRCTC Train Booking", "Hotel Stay", "Flight Tickets", "Yatra.com"],
    ),
    (
        "Education",
        &["Course Fees", "School Tuition", "Byju's Subscription", "Coursera Payment", "Book Purchase"],
    ),
    (
        "Miscellaneous",
        &["Gift Purchase", "Donation", "Subscription Service", "Home Supplies"],
    ),
];

pub const EXPENSE_COUNT: usize = 30;

pub struct MockStatementAnalyzer {
    rng: Mutex<StdRng>,
    today: NaiveDate,
    latency: Latency,
}

impl MockStatementAnalyzer {
    pub fn new(today: NaiveDate, latency: Latency) -> Self {
        MockStatementAnalyzer {
            rng: Mutex::new(StdRng::from_entropy()),
            today,
            latency,
        }
    }

    pub fn seeded(seed: u64, today: NaiveDate, latency: Latency) -> Self {
        MockStatementAnalyzer {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            today,
            latency,
        }
    }

    pub fn generate(&self) -> Result<FinancialSummary, FinanceError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| FinanceError::Analysis("random generator poisoned".into()))?;
        let day = |d: u32| {
            self.today
                .with_day(d)
                .ok_or_else(|| FinanceError::Analysis(format!("day {} outside {}", d, self.today)))
        };

        let mut transactions = vec![
            Transaction {
                id: "1".into(),
                date: day(5)?,
                description: "Salary Credit".into(),
                amount: Decimal::from(85_000),
                category: "Income".into(),
                r#type: TxType::Income,
            },
            Transaction {
                id: "2".into(),
                date: day(20)?,
                description: "Freelance Payment".into(),
                amount: Decimal::from(12_500),
                category: "Income".into(),
                r#type: TxType::Income,
            },
        ];

        for i in 0..EXPENSE_COUNT {
            let (category, descriptions) = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
            let date = day(rng.gen_range(1..=28))?;
            let amount = Decimal::from(rng.gen_range(200..5200));
            let description = descriptions[rng.gen_range(0..descriptions.len())];
            transactions.push(Transaction {
                id: format!("expense-{}", i + 3),
                date,
                description: description.into(),
                amount,
                category: category.into(),
                r#type: TxType::Expense,
            });
        }
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        let mut summary = summarize(transactions, Vec::new())?;
        summary.insights = statement_insights(summary.savings_rate);
        Ok(summary)
    }
}

impl StatementAnalyzer for MockStatementAnalyzer {
    fn analyze(&self, file: &StatementFile) -> Result<FinancialSummary, FinanceError> {
        let delay = file.processing_time();
        info!(file = %file.name, size = file.size, ?delay, "analyzing statement");
        self.latency.wait(delay)?;
        let summary = self.generate()?;
        info!(
            transactions = summary.transactions.len(),
            categories = summary.top_expense_categories.len(),
            "statement analysis complete"
        );
        Ok(summary)
    }
}

fn insight(
    id: &str,
    title: &str,
    description: String,
    impact: Impact,
    action: Option<&str>,
) -> FinancialInsight {
    FinancialInsight {
        id: id.into(),
        title: title.into(),
        description,
        impact,
        actionable: action.is_some(),
        action: action.map(String::from),
    }
}

pub fn statement_insights(savings_rate: i64) -> Vec<FinancialInsight> {
    let savings = if savings_rate >= 20 {
        insight(
            "2",
            "Good Savings Rate",
            format!(
                "Your current savings rate is {}%, which is above the recommended 20%.",
                savings_rate
            ),
            Impact::Positive,
            None,
        )
    } else {
        insight(
            "2",
            "Low Savings Rate",
            format!(
                "Your current savings rate is {}%, which is below the recommended 20%.",
                savings_rate
            ),
            Impact::Negative,
            Some("Set a monthly savings target before discretionary spending"),
        )
    };
    vec![
        insight(
            "1",
            "High Food & Dining Expenses",
            "Your food and online delivery expenses are higher than average. Consider meal planning and reducing restaurant orders.".into(),
            Impact::Negative,
            Some("Create a weekly meal plan and reduce food delivery orders"),
        ),
        savings,
        insight(
            "3",
            "Subscription Audit Needed",
            "You have multiple subscription services. Review these to eliminate unused ones.".into(),
            Impact::Neutral,
            Some("Review and cancel unused OTT and other subscriptions"),
        ),
        insight(
            "4",
            "Transportation Costs",
            "Consider carpooling or using metro/bus to reduce your transportation expenses.".into(),
            Impact::Neutral,
            Some("Research public transportation options"),
        ),
        insight(
            "5",
            "Emergency Fund",
            "Based on your spending patterns, aim to save at least ₹2,50,000 for emergencies.".into(),
            Impact::Neutral,
            Some("Set up automatic transfers to emergency savings"),
        ),
    ]
}

/// Client for `POST {base}/v1/finance/analyze`.
pub struct HttpStatementAnalyzer {
    base_url: String,
    api_key: Option<String>,
}

impl HttpStatementAnalyzer {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        HttpStatementAnalyzer {
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/finance/analyze", self.base_url.trim_end_matches('/'))
    }
}

impl StatementAnalyzer for HttpStatementAnalyzer {
    fn analyze(&self, file: &StatementFile) -> Result<FinancialSummary, FinanceError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| FinanceError::validation("api_key", "required for the http backend"))?;
        let url = self.endpoint();
        debug!(%url, file = %file.name, "uploading statement");

        let form = reqwest::blocking::multipart::Form::new().file("file", &file.path)?;
        let client = crate::utils::http_client().map_err(|e| FinanceError::Analysis(e.to_string()))?;
        let resp = client
            .post(&url)
            .bearer_auth(key)
            .multipart(form)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| FinanceError::Analysis(e.to_string()))?;
        let summary: FinancialSummary = resp
            .json()
            .map_err(|e| FinanceError::Analysis(format!("invalid response body: {}", e)))?;
        info!(transactions = summary.transactions.len(), "remote analysis complete");
        Ok(summary)
    }
}
