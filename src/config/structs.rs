use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: Dashboard 监听地址、端口、worker 数量
/// - data: CSV 数据目录与默认订单状态过滤
/// - dashboard: 默认日期范围与 Top N 类目
/// - charts: SVG 图表输出目录与尺寸
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：SB，分隔符：__
    /// 示例：SB__SERVER__PORT=9999
    ///
    /// 显式指定的路径（`-c`）必须存在；默认路径可以缺省。
    pub fn load_from(path: Option<&str>) -> crate::errors::Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("SB")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(
        path: Option<&str>,
        env: config::Environment,
    ) -> crate::errors::Result<Self> {
        use config::{Config, File};

        let (file, required) = match path {
            Some(path) => (path, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            // 1. 从 TOML 文件加载
            .add_source(File::with_name(file).required(required))
            // 2. 从环境变量覆盖
            .add_source(env)
            .build()?;
        let config = settings.try_deserialize::<StaticConfig>()?;

        if std::path::Path::new(file).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", file);
        }
        Ok(config)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> crate::errors::Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 六个 CSV 文件所在目录
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// 默认只统计该状态的订单；空字符串表示不过滤
    #[serde(default = "default_status")]
    pub default_status: String,
}

/// Dashboard 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_start")]
    pub default_start: NaiveDate,
    #[serde(default = "default_end")]
    pub default_end: NaiveDate,
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
}

/// 图表输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

impl DataConfig {
    /// 默认状态过滤，空字符串视为不过滤
    pub fn status_filter(&self) -> Option<String> {
        let status = self.default_status.trim();
        if status.is_empty() {
            None
        } else {
            Some(status.to_string())
        }
    }
}

impl DashboardConfig {
    /// 默认分析年份（默认日期范围结束日期所在年份）
    pub fn default_year(&self) -> i32 {
        use chrono::Datelike;
        self.default_end.year()
    }
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_data_dir() -> String {
    "ecommerce_data".to_string()
}

fn default_status() -> String {
    "delivered".to_string()
}

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

fn default_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default()
}

fn default_top_categories() -> usize {
    10
}

fn default_output_dir() -> String {
    "charts".to_string()
}

fn default_chart_width() -> u32 {
    960
}

fn default_chart_height() -> u32 {
    480
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_status: default_status(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_start: default_start(),
            default_end: default_end(),
            top_categories: default_top_categories(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SalesboardError;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.data.data_dir, "ecommerce_data");
        assert_eq!(config.data.status_filter(), Some("delivered".to_string()));
        assert_eq!(config.dashboard.default_year(), 2023);
        assert_eq!(config.dashboard.top_categories, 10);
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_empty_status_means_no_filter() {
        let data = DataConfig {
            default_status: "  ".to_string(),
            ..DataConfig::default()
        };
        assert_eq!(data.status_filter(), None);
    }

    #[test]
    fn test_sample_config_round_trips_through_toml() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[dashboard]"));
        assert!(sample.contains("default_start = \"2023-01-01\""));

        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.dashboard.default_end, default_end());
        assert_eq!(parsed.charts.width, 960);
    }

    fn env_from(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StaticConfig::environment().source(Some(map))
    }

    fn write_config(dir: &TempDir, content: &str) -> String {
        let path = dir.path().join("salesboard.toml");
        std::fs::write(&path, content).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_load_from_file_with_partial_sections() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[data]\ndata_dir = \"/srv/data\"\n\n[dashboard]\ntop_categories = 5\n",
        );

        let config = StaticConfig::load_with_env(Some(&path), env_from(&[])).unwrap();
        assert_eq!(config.data.data_dir, "/srv/data");
        assert_eq!(config.data.default_status, "delivered");
        assert_eq!(config.dashboard.top_categories, 5);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_env_overrides_file_values() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[data]\ndata_dir = \"/srv/data\"\n\n[server]\nport = 9000\n");

        let config = StaticConfig::load_with_env(
            Some(&path),
            env_from(&[("SB__SERVER__PORT", "9999"), ("SB__DATA__DEFAULT_STATUS", "shipped")]),
        )
        .unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.data.default_status, "shipped");
        // Untouched by the environment
        assert_eq!(config.data.data_dir, "/srv/data");
    }

    #[test]
    fn test_invalid_env_value_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[data]\ndata_dir = \"/srv/data\"\n");

        let err = StaticConfig::load_with_env(
            Some(&path),
            env_from(&[("SB__SERVER__PORT", "notaport")]),
        )
        .unwrap_err();
        assert!(matches!(err, SalesboardError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = StaticConfig::load_with_env(
            Some("/definitely/missing/explicit.toml"),
            env_from(&[]),
        )
        .unwrap_err();
        assert!(matches!(err, SalesboardError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let config = StaticConfig::load_with_env(None, env_from(&[])).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_save_to_file_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        StaticConfig::default().save_to_file(&path).unwrap();
        assert!(path.exists());
    }
}
