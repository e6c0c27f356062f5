use chrono::{Datelike, NaiveDate, Utc};

use super::types::{FireInputs, FireMetrics};

pub const NOTE_TARGET_UNREACHABLE: &str = "target unreachable at this return rate";
pub const NOTE_ZERO_INVESTMENTS: &str = "zero investments";

pub fn compute_fire_metrics(inputs: &FireInputs) -> FireMetrics {
    compute_fire_metrics_at(inputs, Utc::now().date_naive())
}

// No numeric edge case raises an error: every degenerate combination maps
// to None, a signed non-finite value, or a note string.
pub fn compute_fire_metrics_at(inputs: &FireInputs, today: NaiveDate) -> FireMetrics {
    let annual_expense = inputs.monthly_expense * 12.0;
    let fire_target = annual_expense / (inputs.withdrawal_rate_pct / 100.0);
    let fire_progress = inputs.invested_total / fire_target;
    let current_age = inputs.birth_date.map(|birth| fractional_age(birth, today));

    // The portfolio shrinks faster than it grows; no amount of waiting
    // reaches the target. Headline figures are still reported.
    if inputs.expected_return_pct <= inputs.withdrawal_rate_pct {
        return FireMetrics {
            annual_expense,
            fire_target,
            fire_progress,
            years_to_fire: None,
            current_age,
            fire_age: None,
            note: Some(NOTE_TARGET_UNREACHABLE.to_string()),
        };
    }

    let years_to_fire = years_to_target(
        inputs.invested_total,
        fire_target,
        inputs.expected_return_pct,
    );
    let fire_age = match (current_age, years_to_fire) {
        (Some(age), Some(years)) => Some(age + years),
        _ => None,
    };
    let note =
        (inputs.invested_total <= 0.0).then(|| NOTE_ZERO_INVESTMENTS.to_string());

    FireMetrics {
        annual_expense,
        fire_target,
        fire_progress,
        years_to_fire,
        current_age,
        fire_age,
        note,
    }
}

// Closed-form compound-growth inversion. The raw IEEE quotient is returned
// unclamped: a flat rate gives +inf, a target already met gives 0, and an
// exceeded or diverging position gives a negative number.
pub fn years_to_target(
    invested_total: f64,
    fire_target: f64,
    expected_return_pct: f64,
) -> Option<f64> {
    let growth_factor = 1.0 + expected_return_pct / 100.0;
    if invested_total <= 0.0 || fire_target <= 0.0 || growth_factor <= 0.0 {
        return None;
    }
    Some((fire_target / invested_total).ln() / growth_factor.ln())
}

// 30-day months over a 365.25-day year. Intentionally not calendar-exact;
// displayed ages depend on it staying this way.
pub fn fractional_age(birth: NaiveDate, today: NaiveDate) -> f64 {
    let mut years = today.year() - birth.year();
    let mut months = today.month() as i32 - birth.month() as i32;
    let days = today.day() as i32 - birth.day() as i32;
    if months < 0 || (months == 0 && days < 0) {
        years -= 1;
        months += 12;
    }
    years as f64 + f64::from(months * 30 + days) / 365.25
}
