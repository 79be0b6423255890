//! Revenue by customer state as a tile-grid map.
//!
//! Each US state is one square tile at a fixed grid position, shaded on a
//! sequential blue scale by revenue. States outside the grid are listed in
//! the side panel.

use std::collections::HashMap;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::style::{
    ChartSize, EMPTY_TILE, FONT, MUTED, blue_scale, caption_style, label_style, no_data_svg,
    text_on,
};
use crate::analytics::StateMetrics;
use crate::errors::Result;
use crate::utils::fmt_axis;

const GRID_COLS: i32 = 12;
const GRID_ROWS: i32 = 8;
const PANEL_WIDTH: i32 = 190;
const TITLE_HEIGHT: i32 = 48;
const LEGEND_STEPS: i32 = 10;
const MAX_LISTED: usize = 12;

/// (state, column, row)
const TILE_LAYOUT: &[(&str, i32, i32)] = &[
    ("AK", 0, 0),
    ("ME", 11, 0),
    ("VT", 10, 1),
    ("NH", 11, 1),
    ("WA", 1, 2),
    ("ID", 2, 2),
    ("MT", 3, 2),
    ("ND", 4, 2),
    ("MN", 5, 2),
    ("IL", 6, 2),
    ("WI", 7, 2),
    ("MI", 8, 2),
    ("NY", 9, 2),
    ("RI", 10, 2),
    ("MA", 11, 2),
    ("OR", 1, 3),
    ("NV", 2, 3),
    ("WY", 3, 3),
    ("SD", 4, 3),
    ("IA", 5, 3),
    ("IN", 6, 3),
    ("OH", 7, 3),
    ("PA", 8, 3),
    ("NJ", 9, 3),
    ("CT", 10, 3),
    ("CA", 1, 4),
    ("UT", 2, 4),
    ("CO", 3, 4),
    ("NE", 4, 4),
    ("MO", 5, 4),
    ("KY", 6, 4),
    ("WV", 7, 4),
    ("VA", 8, 4),
    ("MD", 9, 4),
    ("DE", 10, 4),
    ("AZ", 2, 5),
    ("NM", 3, 5),
    ("KS", 4, 5),
    ("AR", 5, 5),
    ("TN", 6, 5),
    ("NC", 7, 5),
    ("SC", 8, 5),
    ("DC", 9, 5),
    ("OK", 4, 6),
    ("LA", 5, 6),
    ("MS", 6, 6),
    ("AL", 7, 6),
    ("GA", 8, 6),
    ("HI", 0, 7),
    ("TX", 4, 7),
    ("FL", 9, 7),
];

fn tile_position(state: &str) -> Option<(i32, i32)> {
    TILE_LAYOUT
        .iter()
        .find(|(code, _, _)| code.eq_ignore_ascii_case(state))
        .map(|&(_, col, row)| (col, row))
}

pub fn plot_geographic_performance(
    states: &[StateMetrics],
    current_year: i32,
    size: ChartSize,
) -> Result<String> {
    let title = format!("Revenue by State: {}", current_year);
    if states.is_empty() {
        return no_data_svg(size, &title);
    }

    let revenue: HashMap<String, f64> = states
        .iter()
        .map(|s| (s.customer_state.to_ascii_uppercase(), s.revenue))
        .collect();
    let max_revenue = states.iter().map(|s| s.revenue).fold(0.0, f64::max);
    let unmapped: Vec<&StateMetrics> = states
        .iter()
        .filter(|s| tile_position(&s.customer_state).is_none())
        .collect();

    let (width, height) = size.dims();
    let (width, height) = (width as i32, height as i32);
    let tile = ((width - PANEL_WIDTH - 30) / GRID_COLS)
        .min((height - TITLE_HEIGHT - 20) / GRID_ROWS)
        .max(12);
    let origin = (15, TITLE_HEIGHT);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size.dims()).into_drawing_area();
        root.fill(&WHITE)?;

        root.draw(&Text::new(
            title.clone(),
            (width / 2, TITLE_HEIGHT / 2),
            caption_style().pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;

        for &(code, col, row) in TILE_LAYOUT {
            let x0 = origin.0 + col * tile;
            let y0 = origin.1 + row * tile;
            let value = revenue.get(code).copied();
            let fill = match value {
                Some(v) if max_revenue > 0.0 => blue_scale(v / max_revenue),
                Some(_) => blue_scale(0.0),
                None => EMPTY_TILE,
            };

            let mut square = Rectangle::new([(x0, y0), (x0 + tile, y0 + tile)], fill.filled());
            square.set_margin(1, 1, 1, 1);
            root.draw(&square)?;

            let ink = text_on(fill);
            let center_x = x0 + tile / 2;
            let code_y = if value.is_some() {
                y0 + tile / 3
            } else {
                y0 + tile / 2
            };
            root.draw(&Text::new(
                code.to_string(),
                (center_x, code_y),
                (FONT, (tile / 4).max(8) as u32)
                    .into_font()
                    .color(&ink)
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            ))?;
            if let Some(v) = value {
                root.draw(&Text::new(
                    fmt_axis(v),
                    (center_x, y0 + tile * 2 / 3),
                    (FONT, (tile / 5).max(7) as u32)
                        .into_font()
                        .color(&ink)
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                ))?;
            }
        }

        // colour legend
        let panel_x = width - PANEL_WIDTH;
        let step_width = (PANEL_WIDTH - 30) / LEGEND_STEPS;
        let legend_y = TITLE_HEIGHT + 10;
        root.draw(&Text::new(
            "Revenue".to_string(),
            (panel_x, legend_y - 4),
            label_style(12).pos(Pos::new(HPos::Left, VPos::Bottom)),
        ))?;
        for step in 0..LEGEND_STEPS {
            let x0 = panel_x + step * step_width;
            root.draw(&Rectangle::new(
                [(x0, legend_y), (x0 + step_width, legend_y + 14)],
                blue_scale(step as f64 / (LEGEND_STEPS - 1) as f64).filled(),
            ))?;
        }
        root.draw(&Text::new(
            fmt_axis(0.0),
            (panel_x, legend_y + 18),
            label_style(11).pos(Pos::new(HPos::Left, VPos::Top)),
        ))?;
        root.draw(&Text::new(
            fmt_axis(max_revenue),
            (panel_x + LEGEND_STEPS * step_width, legend_y + 18),
            label_style(11).pos(Pos::new(HPos::Right, VPos::Top)),
        ))?;

        if !unmapped.is_empty() {
            let list_y = legend_y + 60;
            root.draw(&Text::new(
                "Other states".to_string(),
                (panel_x, list_y),
                label_style(12).pos(Pos::new(HPos::Left, VPos::Top)),
            ))?;
            for (i, s) in unmapped.iter().take(MAX_LISTED).enumerate() {
                root.draw(&Text::new(
                    format!("{}  {}", s.customer_state, fmt_axis(s.revenue)),
                    (panel_x, list_y + 18 + i as i32 * 16),
                    label_style(11).pos(Pos::new(HPos::Left, VPos::Top)),
                ))?;
            }
            if unmapped.len() > MAX_LISTED {
                root.draw(&Text::new(
                    format!("+{} more", unmapped.len() - MAX_LISTED),
                    (panel_x, list_y + 18 + MAX_LISTED as i32 * 16),
                    (FONT, 11)
                        .into_font()
                        .color(&MUTED)
                        .pos(Pos::new(HPos::Left, VPos::Top)),
                ))?;
            }
        }

        root.present()?;
    }
    Ok(svg)
}
