//! Fixed-width console report of the headline KPIs.

use std::fmt::Write;

use super::{DeliveryMetrics, RevenueMetrics};
use crate::utils::{format_count, format_thousands};

const RULE_WIDTH: usize = 60;

fn money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:>12}", format_thousands(v, 2)),
        None => format!("{:>13}", "N/A"),
    }
}

fn growth(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:>+11.2}%", v),
        None => format!("{:>12}", "N/A"),
    }
}

fn decimal(value: Option<f64>, width: usize, places: usize) -> String {
    match value {
        Some(v) => format!("{:>width$.places$}", v),
        None => format!("{:>width$}", "N/A"),
    }
}

/// Render the `BUSINESS METRICS SUMMARY` report
pub fn format_metrics_summary(
    revenue: &RevenueMetrics,
    delivery: &DeliveryMetrics,
) -> Result<String, std::fmt::Error> {
    let cy = revenue.current_year;
    let py = revenue.comparison_year;
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    writeln!(out, "BUSINESS METRICS SUMMARY - {}", cy)?;
    writeln!(out, "{}", rule)?;

    writeln!(out, "\nREVENUE PERFORMANCE")?;
    writeln!(
        out,
        "  Total Revenue ({}):        {}",
        cy,
        money(Some(revenue.total_revenue_current))
    )?;
    writeln!(
        out,
        "  Total Revenue ({}):        {}",
        py,
        money(Some(revenue.total_revenue_previous))
    )?;
    writeln!(
        out,
        "  YoY Revenue Growth:          {}",
        growth(revenue.revenue_growth_pct)
    )?;

    writeln!(out, "\nORDERS")?;
    writeln!(
        out,
        "  Total Orders ({}):         {:>12}",
        cy,
        format_count(revenue.total_orders_current)
    )?;
    writeln!(
        out,
        "  Total Orders ({}):         {:>12}",
        py,
        format_count(revenue.total_orders_previous)
    )?;
    writeln!(
        out,
        "  YoY Order Growth:            {}",
        growth(revenue.order_growth_pct)
    )?;

    writeln!(out, "\nAVERAGE ORDER VALUE")?;
    writeln!(out, "  AOV ({}):                  {}", cy, money(revenue.aov_current))?;
    writeln!(out, "  AOV ({}):                  {}", py, money(revenue.aov_previous))?;
    writeln!(
        out,
        "  YoY AOV Growth:              {}",
        growth(revenue.aov_growth_pct)
    )?;

    writeln!(out, "\nCUSTOMER EXPERIENCE")?;
    writeln!(
        out,
        "  Average Review Score:        {} / 5.0",
        decimal(delivery.avg_review_score, 12, 2)
    )?;
    writeln!(
        out,
        "  Average Delivery Time:       {} days",
        decimal(delivery.avg_delivery_days, 11, 1)
    )?;
    writeln!(out, "{}", rule)?;

    Ok(out)
}
