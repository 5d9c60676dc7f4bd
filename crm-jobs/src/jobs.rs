//! The jobs themselves. Each one makes a single GraphQL call and appends
//! timestamped human-readable lines to its own log file; a failed call
//! degrades to a logged status line instead of an error bubbling out.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::client::GraphQlClient;

pub const HEARTBEAT_LOG: &str = "crm_heartbeat_log.txt";
pub const LOW_STOCK_LOG: &str = "low_stock_updates_log.txt";
pub const REPORT_LOG: &str = "crm_report_log.txt";
pub const REMINDERS_LOG: &str = "order_reminders_log.txt";

fn append_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    Ok(())
}

pub fn heartbeat_line(now: DateTime<Utc>, status: &str) -> String {
    format!("{} {}", now.format("%d/%m/%Y-%H:%M:%S"), status)
}

/// Pings the `hello` field and records whether the API answered.
pub async fn run_heartbeat(client: &GraphQlClient, log_dir: &Path) -> Result<()> {
    let status = match client.execute("{ hello }").await {
        Ok(data) if data["hello"] == "Hello, GraphQL!" => {
            "CRM is alive and GraphQL responsive".to_string()
        }
        Ok(_) => "CRM is alive but GraphQL failed".to_string(),
        Err(e) => format!("CRM alive but GraphQL error: {:#}", e),
    };

    info!("Heartbeat: {}", status);
    append_lines(
        &log_dir.join(HEARTBEAT_LOG),
        &[heartbeat_line(Utc::now(), &status)],
    )
}

pub fn low_stock_lines(now: DateTime<Utc>, payload: &Value) -> Vec<String> {
    let ts = now.format("%Y-%m-%d %H:%M:%S");
    let summary = payload["message"]
        .as_str()
        .unwrap_or("Low-stock update completed");

    let mut lines = vec![format!("{} - {}", ts, summary)];
    for item in payload["output"].as_array().into_iter().flatten() {
        lines.push(format!(
            "{} - {}: {}",
            ts,
            item["name"].as_str().unwrap_or("?"),
            item["stock"]
        ));
    }
    lines
}

/// Triggers the low-stock restock mutation and records each updated product.
pub async fn run_low_stock_update(client: &GraphQlClient, log_dir: &Path) -> Result<()> {
    const MUTATION: &str =
        "mutation { updateLowStockProducts { success message output { name stock } } }";

    let lines = match client.execute(MUTATION).await {
        Ok(data) => low_stock_lines(Utc::now(), &data["updateLowStockProducts"]),
        Err(e) => vec![format!(
            "{} - Low-stock update failed: {:#}",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            e
        )],
    };

    append_lines(&log_dir.join(LOW_STOCK_LOG), &lines)
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(_) => value.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        _ => None,
    }
}

pub fn report_line(now: DateTime<Utc>, data: &Value) -> String {
    let customers = data["allCustomers"]["totalCount"].as_i64().unwrap_or(0);
    let orders = data["allOrders"]["totalCount"].as_i64().unwrap_or(0);
    let revenue: Decimal = data["allOrders"]["items"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|order| decimal_from_value(&order["totalAmount"]))
        .sum();

    format!(
        "{} - Report: {} customers, {} orders, ${} revenue.",
        now.format("%Y-%m-%d %H:%M:%S"),
        customers,
        orders,
        revenue
    )
}

/// Fetches the customer count and order totals and appends one report line.
pub async fn run_report(client: &GraphQlClient, log_dir: &Path) -> Result<()> {
    const QUERY: &str =
        "{ allCustomers { totalCount } allOrders { totalCount items { totalAmount } } }";

    let line = match client.execute(QUERY).await {
        Ok(data) => report_line(Utc::now(), &data),
        Err(e) => format!(
            "{} - Failed to fetch CRM report: {:#}",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            e
        ),
    };

    append_lines(&log_dir.join(REPORT_LOG), &[line])
}

pub fn reminder_lines(now: DateTime<Utc>, data: &Value) -> Vec<String> {
    data["allOrders"]["items"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|order| {
            format!(
                "{} - Order ID: {}, Customer Email: {}",
                now.to_rfc3339(),
                order["id"].as_str().unwrap_or("?"),
                order["customer"]["email"].as_str().unwrap_or("?"),
            )
        })
        .collect()
}

/// Logs a reminder line for every order placed within the lookback window.
pub async fn run_order_reminders(
    client: &GraphQlClient,
    log_dir: &Path,
    lookback_days: i64,
) -> Result<()> {
    let since = (Utc::now() - Duration::days(lookback_days)).to_rfc3339();
    let query = format!(
        r#"{{ allOrders(filter: {{ orderDateGte: "{}" }}) {{ items {{ id orderDate customer {{ email }} }} }} }}"#,
        since
    );

    let lines = match client.execute(&query).await {
        Ok(data) => {
            let lines = reminder_lines(Utc::now(), &data);
            info!("Order reminders processed: {} orders", lines.len());
            lines
        }
        Err(e) => vec![format!(
            "{} - Failed to fetch order reminders: {:#}",
            Utc::now().to_rfc3339(),
            e
        )],
    };

    append_lines(&log_dir.join(REMINDERS_LOG), &lines)
}
