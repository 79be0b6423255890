//! Dashboard page
//!
//! Server-rendered HTML: KPI cards, four inline SVG charts and the delivery
//! and review cards, all for the date range in the query string.

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use rust_embed::Embed;
use tracing::{debug, error, trace};

use crate::analytics::RevenueMetrics;
use crate::charts::{ChartKind, render_chart};
use crate::data::ReportPeriod;
use crate::errors::Result;
use crate::services::Report;
use crate::utils::format::{fmt_money, fmt_signed_pct, format_count};

use super::helpers::error_from_salesboard;
use super::state::{DashboardState, PeriodQuery};

// 使用 RustEmbed 嵌入页面模板和样式
#[derive(Embed)]
#[folder = "assets/"]
struct DashboardAssets;

/// Charts shown on the page, in grid order
const DASHBOARD_CHARTS: [ChartKind; 4] = [
    ChartKind::RevenueTrend,
    ChartKind::Categories,
    ChartKind::States,
    ChartKind::Delivery,
];

pub const EMPTY_NOTICE: &str =
    "No delivered orders found for the selected date range. Please adjust the filter.";

pub struct DashboardService;

impl DashboardService {
    pub async fn index(
        state: web::Data<DashboardState>,
        query: web::Query<PeriodQuery>,
    ) -> impl Responder {
        trace!("Serving dashboard {:?}", query);

        let (period, report) = match state.report(&query) {
            Ok(resolved) => resolved,
            Err(e) => return error_from_salesboard(&e),
        };

        let content = if report.is_empty() {
            debug!("Dashboard period {:?} has no rows", period.current);
            format!("    <div class=\"warning\">{}</div>\n", EMPTY_NOTICE)
        } else {
            match render_content(&state, &report) {
                Ok(content) => content,
                Err(e) => {
                    error!("Dashboard rendering failed: {}", e);
                    return error_from_salesboard(&e);
                }
            }
        };

        HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(render_page(&state, &period, &content))
    }

    /// 处理静态资源文件
    pub async fn handle_static(req: HttpRequest) -> HttpResponse {
        let path = req.match_info().query("path");
        trace!("Serving static file: {}", path);

        match DashboardAssets::get(path) {
            Some(content) => HttpResponse::Ok()
                .content_type(get_content_type(path))
                .body(content.data.into_owned()),
            None => {
                debug!("Static file not found: {}", path);
                HttpResponse::NotFound().body("File not found")
            }
        }
    }
}

fn template() -> String {
    match DashboardAssets::get("dashboard.html") {
        Some(content) => String::from_utf8_lossy(&content.data).into_owned(),
        // 使用编译时包含作为后备
        None => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/dashboard.html"))
            .to_string(),
    }
}

fn render_page(state: &DashboardState, period: &ReportPeriod, content: &str) -> String {
    let (min_date, max_date) = state
        .reports
        .bounds()
        .map(|(lo, hi)| (lo.to_string(), hi.to_string()))
        .unwrap_or_default();

    template()
        .replace("%START_DATE%", &period.current.start.to_string())
        .replace("%END_DATE%", &period.current.end.to_string())
        .replace("%MIN_DATE%", &min_date)
        .replace("%MAX_DATE%", &max_date)
        .replace("%VERSION%", env!("CARGO_PKG_VERSION"))
        .replace("%CONTENT%", content)
}

fn render_content(state: &DashboardState, report: &Report) -> Result<String> {
    let mut html = kpi_row(&report.revenue, report.average_mom_growth());

    let data = report.chart_data(state.top_categories);
    html.push_str("    <div class=\"grid-2\">\n");
    for kind in DASHBOARD_CHARTS {
        let svg = render_chart(kind, &data, state.chart_size)?;
        html.push_str(&format!(
            "      <div class=\"chart-card\" id=\"chart-{}\">{}</div>\n",
            kind, svg
        ));
    }
    html.push_str("    </div>\n");

    html.push_str(&bottom_row(report));
    Ok(html)
}

fn kpi_card(label: &str, value: &str, footer: &str) -> String {
    format!(
        "      <div class=\"kpi-card\">\n        <div class=\"card-label\">{}</div>\n        <div class=\"card-value\">{}</div>\n        {}\n      </div>\n",
        label, value, footer
    )
}

fn kpi_row(revenue: &RevenueMetrics, avg_mom: Option<f64>) -> String {
    let aov = revenue
        .aov_current
        .map(fmt_money)
        .unwrap_or_else(|| "N/A".to_string());

    let mut html = String::from("    <div class=\"grid-4\">\n");
    html.push_str(&kpi_card(
        "Total Revenue",
        &fmt_money(revenue.total_revenue_current),
        &trend_html(revenue.revenue_growth_pct, false),
    ));
    html.push_str(&kpi_card(
        "Monthly Growth",
        &fmt_signed_pct(avg_mom),
        "<div class=\"card-sub\">Avg month-over-month</div>",
    ));
    html.push_str(&kpi_card(
        "Avg Order Value",
        &aov,
        &trend_html(revenue.aov_growth_pct, false),
    ));
    html.push_str(&kpi_card(
        "Total Orders",
        &format_count(revenue.total_orders_current),
        &trend_html(revenue.order_growth_pct, false),
    ));
    html.push_str("    </div>\n");
    html
}

fn bottom_row(report: &Report) -> String {
    let days = report
        .delivery
        .avg_delivery_days
        .map(|d| format!("{:.1} days", d))
        .unwrap_or_else(|| "N/A".to_string());
    let score = report.delivery.avg_review_score;
    let score_text = score
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        r#"    <div class="grid-2">
      <div class="bottom-card">
        <div class="card-label">Average Delivery Time</div>
        <div class="card-value">{days}</div>
        {trend}
      </div>
      <div class="bottom-card">
        <div class="card-label">Review Score</div>
        <div class="score-row">
          <div class="card-value">{score}</div>
          <div class="stars">{stars}</div>
        </div>
        <div class="card-sub">Average Review Score</div>
      </div>
    </div>
"#,
        days = days,
        trend = trend_html(report.delivery_days_trend(), true),
        score = score_text,
        stars = stars(score.unwrap_or(0.0)),
    )
}

/// Trend badge; `inverted` marks metrics where a decrease is good
pub fn trend_html(pct: Option<f64>, inverted: bool) -> String {
    let Some(pct) = pct else {
        return r#"<span class="card-sub">No comparison data</span>"#.to_string();
    };
    let arrow = if pct >= 0.0 { "▲" } else { "▼" };
    let is_good = if inverted { pct <= 0.0 } else { pct >= 0.0 };
    let class = if is_good { "trend-up" } else { "trend-down" };
    format!(
        r#"<span class="{}">{} {:.2}% vs prior period</span>"#,
        class,
        arrow,
        pct.abs()
    )
}

/// Filled stars for the whole part of the score, empty for the rest
pub fn stars(score: f64) -> String {
    let full = (score.max(0.0) as usize).min(5);
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

/// 根据文件扩展名确定 Content-Type
fn get_content_type(path: &str) -> &'static str {
    match path.split('.').next_back() {
        Some("css") => "text/css",
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
