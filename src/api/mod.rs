use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{FireInputs, compute_fire_metrics};

// The HTTP payload overlays these defaults field by field before the shared
// checks run.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dofire",
    about = "FIRE metrics service (annual expense, target, progress, years to target)"
)]
struct Cli {
    #[arg(long, default_value_t = 3000.0, help = "Monthly living expense")]
    monthly_expense: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "Annual withdrawal rate in percent, e.g. 4 for the classic 4% rule"
    )]
    withdrawal_rate: f64,
    #[arg(
        long,
        default_value_t = 7.0,
        help = "Expected annual portfolio return in percent"
    )]
    expected_return: f64,
    #[arg(long, default_value_t = 0.0, help = "Total currently invested")]
    invested_total: f64,
    #[arg(long, help = "Birth date as YYYY-MM-DD; enables age-based outputs")]
    birth_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MetricsPayload {
    monthly_expense: Option<f64>,
    withdrawal_rate_pct: Option<f64>,
    expected_return_pct: Option<f64>,
    invested_total: Option<f64>,
    birth_date: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: String,
}

const ERROR_MESSAGES: &[(&str, &str)] = &[
    (
        "monthlyExpense.invalid",
        "monthlyExpense must be a finite number greater than or equal to 0",
    ),
    (
        "withdrawalRatePct.range",
        "withdrawalRatePct must be between 0 and 100",
    ),
    (
        "expectedReturnPct.range",
        "expectedReturnPct must be a finite number greater than -100",
    ),
    (
        "investedTotal.invalid",
        "investedTotal must be a finite number greater than or equal to 0",
    ),
    (
        "birthDate.format",
        "birthDate must be a calendar date in YYYY-MM-DD form",
    ),
];

fn error_message(code: &str) -> &'static str {
    ERROR_MESSAGES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, message)| *message)
        .unwrap_or("Invalid request")
}

fn build_inputs(cli: Cli) -> Result<FireInputs, &'static str> {
    if !cli.monthly_expense.is_finite() || cli.monthly_expense < 0.0 {
        return Err("monthlyExpense.invalid");
    }

    if !cli.withdrawal_rate.is_finite() || !(0.0..=100.0).contains(&cli.withdrawal_rate) {
        return Err("withdrawalRatePct.range");
    }

    if !cli.expected_return.is_finite() || cli.expected_return <= -100.0 {
        return Err("expectedReturnPct.range");
    }

    if !cli.invested_total.is_finite() || cli.invested_total < 0.0 {
        return Err("investedTotal.invalid");
    }

    let birth_date = match cli.birth_date.as_deref() {
        Some(text) => Some(
            NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| "birthDate.format")?,
        ),
        None => None,
    };

    Ok(FireInputs {
        monthly_expense: cli.monthly_expense,
        withdrawal_rate_pct: cli.withdrawal_rate,
        expected_return_pct: cli.expected_return,
        invested_total: cli.invested_total,
        birth_date,
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        monthly_expense: 3_000.0,
        withdrawal_rate: 4.0,
        expected_return: 7.0,
        invested_total: 0.0,
        birth_date: None,
    }
}

fn inputs_from_payload(payload: MetricsPayload) -> Result<FireInputs, &'static str> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.monthly_expense {
        cli.monthly_expense = v;
    }
    if let Some(v) = payload.withdrawal_rate_pct {
        cli.withdrawal_rate = v;
    }
    if let Some(v) = payload.expected_return_pct {
        cli.expected_return = v;
    }
    if let Some(v) = payload.invested_total {
        cli.invested_total = v;
    }
    if let Some(v) = payload.birth_date {
        cli.birth_date = Some(v);
    }

    build_inputs(cli)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/metrics",
            get(metrics_get_handler).post(metrics_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("DoFIRE metrics API listening on http://{addr}");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "notFound")
}

async fn metrics_get_handler(Query(payload): Query<MetricsPayload>) -> Response {
    metrics_handler_impl(payload)
}

async fn metrics_post_handler(Json(payload): Json<MetricsPayload>) -> Response {
    metrics_handler_impl(payload)
}

fn metrics_handler_impl(payload: MetricsPayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(code) => {
            tracing::debug!(code, "rejected metrics request");
            return error_response(StatusCode::BAD_REQUEST, code);
        }
    };

    json_response(StatusCode::OK, compute_fire_metrics(&inputs))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, code: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: error_message(code).to_string(),
            code: code.to_string(),
        },
    )
}
