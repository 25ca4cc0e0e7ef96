// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::FinanceError;
use crate::latency::Latency;
use crate::models::{InvestmentAdvice, InvestmentRecommendation, RiskTolerance, Suitability};
use crate::utils::{compound, half_up};

const ADVICE_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Serialize)]
pub struct InvestmentRequest {
    pub risk_tolerance: RiskTolerance,
    #[serde(rename = "investment_goal")]
    pub goal: String,
    pub time_horizon: String,
    pub currency: String,
}

impl InvestmentRequest {
    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.goal.trim().is_empty() {
            return Err(FinanceError::validation("goal", "please enter your investment goal"));
        }
        Ok(())
    }
}

pub trait InvestmentAdvisor {
    fn recommend(&self, req: &InvestmentRequest) -> Result<InvestmentAdvice, FinanceError>;
}

pub struct MockInvestmentAdvisor {
    latency: Latency,
}

impl MockInvestmentAdvisor {
    pub fn new(latency: Latency) -> Self {
        MockInvestmentAdvisor { latency }
    }
}

fn product(
    name: &str,
    kind: &str,
    risk_level: &str,
    expected_return: &str,
    description: &str,
    suitability: Suitability,
) -> InvestmentRecommendation {
    InvestmentRecommendation {
        name: name.into(),
        r#type: kind.into(),
        risk_level: risk_level.into(),
        expected_return: expected_return.into(),
        description: description.into(),
        suitability,
    }
}

/// The fixed product shelf, ranked for the given appetite.
pub fn recommendations_for(risk: RiskTolerance) -> Vec<InvestmentRecommendation> {
    use RiskTolerance as R;
    use Suitability as S;
    let pick = |hit: R, on_hit: S, otherwise: S| if risk == hit { on_hit } else { otherwise };
    vec![
        product(
            "Nifty 50 Index Fund",
            "Index Fund",
            "Medium",
            "12-14% annually",
            "Exposure to top 50 companies in India",
            pick(R::Low, S::Medium, S::High),
        ),
        product(
            "Government Bonds",
            "Debt",
            "Low",
            "7-8% annually",
            "Safe government-backed securities",
            pick(R::Low, S::High, S::Medium),
        ),
        product(
            "Mid-Cap Growth Fund",
            "Mutual Fund",
            "High",
            "15-18% annually",
            "Focuses on mid-sized companies with growth potential",
            pick(R::High, S::High, S::Medium),
        ),
        product(
            "REITs (Real Estate Investment Trusts)",
            "Real Estate",
            "Medium-High",
            "8-10% annually",
            "Investment in commercial real estate without buying property",
            pick(R::Medium, S::High, S::Medium),
        ),
        product(
            "Fixed Deposit",
            "Fixed Income",
            "Very Low",
            "5-6.5% annually",
            "Safe investment with guaranteed returns",
            pick(R::Low, S::High, S::Low),
        ),
    ]
}

impl InvestmentAdvisor for MockInvestmentAdvisor {
    fn recommend(&self, req: &InvestmentRequest) -> Result<InvestmentAdvice, FinanceError> {
        req.validate()?;
        info!(risk = %req.risk_tolerance, horizon = %req.time_horizon, "generating investment advice");
        self.latency.wait(ADVICE_DELAY)?;
        Ok(InvestmentAdvice {
            recommendations: recommendations_for(req.risk_tolerance),
            insights: vec![
                format!(
                    "Based on your {} risk tolerance and {} time horizon, a diversified portfolio is recommended.",
                    req.risk_tolerance, req.time_horizon
                ),
                format!(
                    "For your goal of {}, consider allocating more to growth assets if your time horizon is long.",
                    req.goal.trim()
                ),
                "Regular SIP investments, even small ones, can significantly boost your investment growth over time.".into(),
                "Consider tax-saving ELSS funds to get both tax benefits under Section 80C and equity exposure.".into(),
            ],
        })
    }
}

/// Client for `POST {base}/v1/finance/investment-advice`.
pub struct HttpInvestmentAdvisor {
    base_url: String,
    api_key: Option<String>,
}

impl HttpInvestmentAdvisor {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        HttpInvestmentAdvisor {
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1/finance/investment-advice",
            self.base_url.trim_end_matches('/')
        )
    }
}

impl InvestmentAdvisor for HttpInvestmentAdvisor {
    fn recommend(&self, req: &InvestmentRequest) -> Result<InvestmentAdvice, FinanceError> {
        req.validate()?;
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| FinanceError::validation("api_key", "required for the http backend"))?;
        let url = self.endpoint();
        debug!(%url, "requesting investment advice");
        let client = crate::utils::http_client().map_err(|e| FinanceError::Advice(e.to_string()))?;
        client
            .post(&url)
            .bearer_auth(key)
            .json(req)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| FinanceError::Advice(e.to_string()))?
            .json::<InvestmentAdvice>()
            .map_err(|e| FinanceError::Advice(format!("invalid response body: {}", e)))
    }
}

/// Longest horizon `future_value` will project.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Leading number of a horizon label such as "5-10 years"; 5 when absent or zero.
pub fn parse_horizon_years(horizon: &str) -> Result<u32, FinanceError> {
    let digits: String = horizon
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return Ok(5);
    }
    match digits.parse::<u32>() {
        Ok(0) => Ok(5),
        Ok(years) if years <= MAX_HORIZON_YEARS => Ok(years),
        _ => Err(FinanceError::validation(
            "horizon",
            format!("'{}' is longer than {} years", horizon.trim(), MAX_HORIZON_YEARS),
        )),
    }
}

/// Projected corpus after `years` of annual compounding on a lump sum plus
/// yearly-aggregated monthly contributions, rounded to a whole amount.
pub fn future_value(
    initial: Decimal,
    monthly: Decimal,
    annual_rate_pct: Decimal,
    years: u32,
) -> Result<Decimal, FinanceError> {
    if years > MAX_HORIZON_YEARS {
        return Err(FinanceError::validation(
            "horizon",
            format!("{} years is longer than {}", years, MAX_HORIZON_YEARS),
        ));
    }
    for (field, value) in [
        ("initial amount", initial),
        ("monthly contribution", monthly),
        ("expected return", annual_rate_pct),
    ] {
        if value < Decimal::ZERO {
            return Err(FinanceError::validation(field, "must not be negative"));
        }
    }
    let too_large = || FinanceError::validation("projection", "result is too large to compute");
    let yearly = monthly.checked_mul(Decimal::from(12)).ok_or_else(too_large)?;
    let rate = annual_rate_pct / Decimal::ONE_HUNDRED;
    let value = if rate.is_zero() {
        yearly
            .checked_mul(Decimal::from(years))
            .and_then(|v| v.checked_add(initial))
    } else {
        compound(rate, years).and_then(|g| {
            let lump = initial.checked_mul(g)?;
            let contributions = yearly.checked_mul((g - Decimal::ONE).checked_div(rate)?)?;
            lump.checked_add(contributions)
        })
    }
    .ok_or_else(too_large)?;
    half_up(value).ok_or_else(too_large)
}
