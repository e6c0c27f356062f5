use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct FireInputs {
    pub monthly_expense: f64,
    pub withdrawal_rate_pct: f64,
    pub expected_return_pct: f64,
    pub invested_total: f64,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireMetrics {
    pub annual_expense: f64,
    pub fire_target: f64,
    pub fire_progress: f64,
    // None means undefined; Some may be +inf, zero, or negative. Those are
    // answers, not errors, and are never clamped.
    pub years_to_fire: Option<f64>,
    pub current_age: Option<f64>,
    pub fire_age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// The active sort column is either an acquisition date in YYYY-MM-DD form
// or a monetary amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortValue {
    Amount(f64),
    Date(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorData {
    pub last_id: String,
    pub last_sort_value: SortValue,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    DateAsc,
    DateDesc,
    AmountAsc,
    AmountDesc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecord {
    pub id: String,
    pub acquired_on: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPage {
    pub items: Vec<InvestmentRecord>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}
