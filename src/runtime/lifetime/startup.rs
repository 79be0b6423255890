use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::services::DashboardState;
use crate::config::StaticConfig;
use crate::data::load_and_process_data;
use crate::services::ReportService;
use crate::utils::format::format_count;

pub struct StartupContext {
    pub state: DashboardState,
}

/// 准备服务器启动的上下文
/// 加载 CSV、合并数据集并构建共享状态
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let data_dir = &config.data.data_dir;
    let (loader, records) = load_and_process_data(data_dir)
        .with_context(|| format!("Failed to load dataset from {}", data_dir))?;

    if let Some(raw) = loader.raw() {
        for (table, rows) in raw.row_counts() {
            debug!("{}: {} rows", table, rows);
        }
    }

    let reports = ReportService::new(records, config.data.status_filter());
    match reports.bounds() {
        Some((lo, hi)) => info!(
            "Dataset ready: {} rows, purchases from {} to {}",
            format_count(reports.records().len()),
            lo,
            hi
        ),
        None => warn!("Dataset is empty; the dashboard will show no data"),
    }

    let state = DashboardState::new(reports, config);
    info!("Pre-startup completed in {:?}", start_time.elapsed());

    Ok(StartupContext { state })
}
