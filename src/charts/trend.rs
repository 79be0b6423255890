//! Monthly revenue line chart and MoM growth bars.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::style::{
    ChartSize, GRID, NEGATIVE, POSITIVE, PRIMARY, SECONDARY, TEXT, caption_style, headroom,
    label_style, no_data_svg,
};
use crate::analytics::MonthlyRevenue;
use crate::errors::Result;
use crate::utils::{fmt_axis, month_abbr};

/// Revenue per month for both years on a shared Jan-Dec axis
pub fn plot_revenue_trend(
    current: &[MonthlyRevenue],
    comparison: &[MonthlyRevenue],
    current_year: i32,
    comparison_year: i32,
    size: ChartSize,
) -> Result<String> {
    let title = format!(
        "Monthly Revenue Trend: {} vs {}",
        current_year, comparison_year
    );
    if current.is_empty() && comparison.is_empty() {
        return no_data_svg(size, &title);
    }

    let y_max = headroom(
        current
            .iter()
            .chain(comparison)
            .map(|m| m.revenue)
            .fold(0.0, f64::max),
    );

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size.dims()).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, caption_style())
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(70)
            .build_cartesian_2d(1u32..12u32, 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(&GRID)
            .bold_line_style(&GRID)
            .x_labels(12)
            .x_label_formatter(&|m| month_abbr(*m))
            .y_label_formatter(&|v| fmt_axis(*v))
            .y_desc("Revenue")
            .label_style(label_style(12))
            .draw()?;

        let series = [
            (comparison, comparison_year, SECONDARY),
            (current, current_year, PRIMARY),
        ];
        for (monthly, year, color) in series {
            if monthly.is_empty() {
                continue;
            }
            chart
                .draw_series(LineSeries::new(
                    monthly.iter().map(|m| (m.month, m.revenue)),
                    color.stroke_width(2),
                ))?
                .label(year.to_string())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            chart.draw_series(
                monthly
                    .iter()
                    .map(|m| Circle::new((m.month, m.revenue), 4, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&GRID)
            .label_font(label_style(12))
            .draw()?;

        root.present()?;
    }
    Ok(svg)
}

/// Month-over-month growth bars, green when non-negative and red otherwise
pub fn plot_mom_growth(
    current: &[MonthlyRevenue],
    current_year: i32,
    size: ChartSize,
) -> Result<String> {
    let title = format!("Month-over-Month Revenue Growth: {}", current_year);
    let growth: Vec<(u32, f64)> = current
        .iter()
        .filter_map(|m| m.mom_growth_pct.map(|g| (m.month, g)))
        .collect();
    if growth.is_empty() {
        return no_data_svg(size, &title);
    }

    let max = growth.iter().map(|(_, g)| *g).fold(0.0, f64::max);
    let min = growth.iter().map(|(_, g)| *g).fold(0.0, f64::min);
    let y_max = if max > 0.0 { max * 1.2 } else { 1.0 };
    let y_min = if min < 0.0 { min * 1.2 } else { 0.0 };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size.dims()).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, caption_style())
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(60)
            .build_cartesian_2d((1u32..12u32).into_segmented(), y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(&GRID)
            .bold_line_style(&GRID)
            .x_labels(12)
            .x_label_formatter(&|v: &SegmentValue<u32>| match v {
                SegmentValue::CenterOf(m) => month_abbr(*m),
                _ => String::new(),
            })
            .y_label_formatter(&|v| format!("{:.0}%", v))
            .y_desc("MoM growth")
            .label_style(label_style(12))
            .draw()?;

        chart.draw_series(growth.iter().map(|&(month, pct)| {
            let color = if pct >= 0.0 { POSITIVE } else { NEGATIVE };
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(month), 0.0),
                    (SegmentValue::Exact(month + 1), pct),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 6, 6);
            bar
        }))?;

        // zero line
        chart.draw_series(LineSeries::new(
            vec![(SegmentValue::Exact(1), 0.0), (SegmentValue::Last, 0.0)],
            &TEXT,
        ))?;

        chart.draw_series(growth.iter().map(|&(month, pct)| {
            let (dy, v_anchor) = if pct >= 0.0 {
                (-4, VPos::Bottom)
            } else {
                (4, VPos::Top)
            };
            EmptyElement::at((SegmentValue::CenterOf(month), pct))
                + Text::new(
                    format!("{:+.1}%", pct),
                    (0, dy),
                    label_style(11).pos(Pos::new(HPos::Center, v_anchor)),
                )
        }))?;

        root.present()?;
    }
    Ok(svg)
}
