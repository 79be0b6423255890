//! Categorical bar charts: top categories, review scores, delivery buckets.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::style::{
    ACCENT, ChartSize, GRID, NEGATIVE, PRIMARY, SECONDARY, caption_style, headroom, label_style,
    last_index, no_data_svg,
};
use crate::analytics::{CategoryRevenue, DeliveryMetrics, ReviewScoreShare};
use crate::errors::Result;
use crate::utils::fmt_axis;

/// Label of the category drawn in segment `slot`
fn row_label(labels: &[String], slot: &SegmentValue<i32>) -> String {
    match slot {
        SegmentValue::CenterOf(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Horizontal revenue bars for the top `limit` categories, largest on top
pub fn plot_category_performance(
    categories: &[CategoryRevenue],
    current_year: i32,
    limit: usize,
    size: ChartSize,
) -> Result<String> {
    let title = format!("Top {} Product Categories by Revenue: {}", limit, current_year);
    let top = &categories[..categories.len().min(limit)];
    if top.is_empty() {
        return no_data_svg(size, &title);
    }

    let n = top.len();
    // slot 0 is the bottom row
    let labels: Vec<String> = top
        .iter()
        .rev()
        .map(|c| c.product_category_name.replace('_', " "))
        .collect();
    let x_max = headroom(top.iter().map(|c| c.revenue).fold(0.0, f64::max)) * 1.1;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size.dims()).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, caption_style())
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(170)
            .build_cartesian_2d(0f64..x_max, (0..last_index(n)).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .light_line_style(&GRID)
            .bold_line_style(&GRID)
            .y_labels(n + 1)
            .y_label_formatter(&|slot| row_label(&labels, slot))
            .x_label_formatter(&|v| fmt_axis(*v))
            .x_desc("Revenue")
            .label_style(label_style(12))
            .draw()?;

        chart.draw_series(top.iter().rev().enumerate().map(|(slot, c)| {
            let slot = slot as i32;
            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(slot)),
                    (c.revenue, SegmentValue::Exact(slot + 1)),
                ],
                PRIMARY.filled(),
            );
            bar.set_margin(3, 3, 0, 0);
            bar
        }))?;

        chart.draw_series(top.iter().rev().enumerate().map(|(slot, c)| {
            EmptyElement::at((c.revenue, SegmentValue::CenterOf(slot as i32)))
                + Text::new(
                    format!("{:.1}%", c.market_share_pct),
                    (6, 0),
                    label_style(11).pos(Pos::new(HPos::Left, VPos::Center)),
                )
        }))?;

        root.present()?;
    }
    Ok(svg)
}

fn score_color(score: u8) -> RGBColor {
    match score {
        5 => PRIMARY,
        4 => SECONDARY,
        3 => ACCENT,
        _ => NEGATIVE,
    }
}

/// Share of orders per review score, score 5 on top
pub fn plot_review_distribution(
    distribution: &[ReviewScoreShare],
    current_year: i32,
    size: ChartSize,
) -> Result<String> {
    let title = format!("Review Score Distribution: {}", current_year);
    if distribution.is_empty() {
        return no_data_svg(size, &title);
    }

    let n = distribution.len();
    // rows arrive sorted by ascending score, so slot 0 (bottom) is the lowest score
    let labels: Vec<String> = distribution
        .iter()
        .map(|d| format!("{} stars", d.review_score))
        .collect();
    let x_max = headroom(distribution.iter().map(|d| d.pct).fold(0.0, f64::max)).min(110.0);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size.dims()).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, caption_style())
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(80)
            .build_cartesian_2d(0f64..x_max, (0..last_index(n)).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .light_line_style(&GRID)
            .bold_line_style(&GRID)
            .y_labels(n + 1)
            .y_label_formatter(&|slot| row_label(&labels, slot))
            .x_label_formatter(&|v| format!("{:.0}%", v))
            .x_desc("Share of reviewed orders")
            .label_style(label_style(12))
            .draw()?;

        chart.draw_series(distribution.iter().enumerate().map(|(slot, d)| {
            let slot = slot as i32;
            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(slot)),
                    (d.pct, SegmentValue::Exact(slot + 1)),
                ],
                score_color(d.review_score).filled(),
            );
            bar.set_margin(4, 4, 0, 0);
            bar
        }))?;

        chart.draw_series(distribution.iter().enumerate().map(|(slot, d)| {
            EmptyElement::at((d.pct, SegmentValue::CenterOf(slot as i32)))
                + Text::new(
                    format!("{:.1}%", d.pct),
                    (6, 0),
                    label_style(11).pos(Pos::new(HPos::Left, VPos::Center)),
                )
        }))?;

        root.present()?;
    }
    Ok(svg)
}

/// Average review score per delivery-time bucket, annotated with order counts
pub fn plot_delivery_vs_score(
    delivery: &DeliveryMetrics,
    current_year: i32,
    size: ChartSize,
) -> Result<String> {
    let title = format!("Customer Satisfaction vs Delivery Time: {}", current_year);
    let buckets = &delivery.delivery_bucket_summary;
    if buckets.is_empty() {
        return no_data_svg(size, &title);
    }

    let n = buckets.len();
    let labels: Vec<String> = buckets
        .iter()
        .map(|b| b.delivery_bucket.label().to_string())
        .collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size.dims()).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, caption_style())
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d((0..last_index(n)).into_segmented(), 0f64..5.5f64)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(&GRID)
            .bold_line_style(&GRID)
            .x_labels(n + 1)
            .x_label_formatter(&|slot| row_label(&labels, slot))
            .y_label_formatter(&|v| format!("{:.1}", v))
            .y_desc("Average review score")
            .label_style(label_style(12))
            .draw()?;

        chart.draw_series(buckets.iter().enumerate().map(|(slot, b)| {
            let slot = slot as i32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(slot), 0.0),
                    (
                        SegmentValue::Exact(slot + 1),
                        b.avg_review_score.unwrap_or(0.0),
                    ),
                ],
                PRIMARY.filled(),
            );
            bar.set_margin(0, 0, 20, 20);
            bar
        }))?;

        chart.draw_series(buckets.iter().enumerate().map(|(slot, b)| {
            let score = b.avg_review_score.unwrap_or(0.0);
            let label = match b.avg_review_score {
                Some(s) => format!("{:.2} (n={})", s, b.order_count),
                None => format!("n/a (n={})", b.order_count),
            };
            EmptyElement::at((SegmentValue::CenterOf(slot as i32), score))
                + Text::new(
                    label,
                    (0, -4),
                    label_style(11).pos(Pos::new(HPos::Center, VPos::Bottom)),
                )
        }))?;

        root.present()?;
    }
    Ok(svg)
}
