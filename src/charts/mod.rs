//! SVG chart rendering
//!
//! Every renderer takes aggregator output and returns a complete SVG
//! document. Empty inputs produce a "No data" placeholder.

pub mod bars;
pub mod map;
pub mod style;
pub mod trend;

pub use bars::{plot_category_performance, plot_delivery_vs_score, plot_review_distribution};
pub use map::plot_geographic_performance;
pub use style::ChartSize;
pub use trend::{plot_mom_growth, plot_revenue_trend};

use std::path::{Path, PathBuf};

use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};
use tracing::{debug, info};

use crate::analytics::{
    CategoryRevenue, DeliveryMetrics, MonthlyRevenue, ReviewScoreShare, StateMetrics,
};
use crate::errors::{Result, SalesboardError};

/// Chart names used in file names and URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ChartKind {
    RevenueTrend,
    MomGrowth,
    Categories,
    States,
    Reviews,
    Delivery,
}

impl ChartKind {
    pub fn name(&self) -> &str {
        self.as_ref()
    }

    pub fn file_name(&self) -> String {
        format!("{}.svg", self.as_ref())
    }

    /// Parse a chart name, returning `NotFound` for unknown names
    pub fn parse(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| SalesboardError::not_found(format!("Unknown chart: {}", name)))
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Aggregated inputs for one rendering pass
#[derive(Debug, Clone, Copy)]
pub struct ChartData<'a> {
    pub current_year: i32,
    pub comparison_year: i32,
    pub monthly_current: &'a [MonthlyRevenue],
    pub monthly_comparison: &'a [MonthlyRevenue],
    pub categories: &'a [CategoryRevenue],
    pub states: &'a [StateMetrics],
    pub reviews: &'a [ReviewScoreShare],
    pub delivery: &'a DeliveryMetrics,
    pub top_categories: usize,
}

pub fn render_chart(kind: ChartKind, data: &ChartData<'_>, size: ChartSize) -> Result<String> {
    debug!("Rendering chart {}", kind);
    match kind {
        ChartKind::RevenueTrend => plot_revenue_trend(
            data.monthly_current,
            data.monthly_comparison,
            data.current_year,
            data.comparison_year,
            size,
        ),
        ChartKind::MomGrowth => plot_mom_growth(data.monthly_current, data.current_year, size),
        ChartKind::Categories => plot_category_performance(
            data.categories,
            data.current_year,
            data.top_categories,
            size,
        ),
        ChartKind::States => plot_geographic_performance(data.states, data.current_year, size),
        ChartKind::Reviews => plot_review_distribution(data.reviews, data.current_year, size),
        ChartKind::Delivery => plot_delivery_vs_score(data.delivery, data.current_year, size),
    }
}

/// Render every chart into `output_dir` as `<name>.svg`
pub fn render_all_charts(
    data: &ChartData<'_>,
    size: ChartSize,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir).map_err(|e| {
        SalesboardError::file_operation(format!(
            "Failed to create {}: {}",
            output_dir.display(),
            e
        ))
    })?;

    let mut written = Vec::new();
    for kind in ChartKind::iter() {
        let svg = render_chart(kind, data, size)?;
        let path = output_dir.join(kind.file_name());
        std::fs::write(&path, svg).map_err(|e| {
            SalesboardError::file_operation(format!("Failed to write {}: {}", path.display(), e))
        })?;
        written.push(path);
    }

    info!(
        "Wrote {} charts to {}",
        written.len(),
        output_dir.display()
    );
    Ok(written)
}
