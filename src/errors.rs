use std::fmt;

#[derive(Debug, Clone)]
pub enum SalesboardError {
    FileOperation(String),
    CsvParse(String),
    MissingTable(String),
    Validation(String),
    InvalidDateRange(String),
    Chart(String),
    Serialization(String),
    Config(String),
    NotFound(String),
}

impl SalesboardError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SalesboardError::FileOperation(_) => "E001",
            SalesboardError::CsvParse(_) => "E002",
            SalesboardError::MissingTable(_) => "E003",
            SalesboardError::Validation(_) => "E004",
            SalesboardError::InvalidDateRange(_) => "E005",
            SalesboardError::Chart(_) => "E006",
            SalesboardError::Serialization(_) => "E007",
            SalesboardError::Config(_) => "E008",
            SalesboardError::NotFound(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SalesboardError::FileOperation(_) => "File Operation Error",
            SalesboardError::CsvParse(_) => "CSV Parse Error",
            SalesboardError::MissingTable(_) => "Missing Table",
            SalesboardError::Validation(_) => "Validation Error",
            SalesboardError::InvalidDateRange(_) => "Invalid Date Range",
            SalesboardError::Chart(_) => "Chart Rendering Error",
            SalesboardError::Serialization(_) => "Serialization Error",
            SalesboardError::Config(_) => "Configuration Error",
            SalesboardError::NotFound(_) => "Resource Not Found",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            SalesboardError::FileOperation(msg)
            | SalesboardError::CsvParse(msg)
            | SalesboardError::MissingTable(msg)
            | SalesboardError::Validation(msg)
            | SalesboardError::InvalidDateRange(msg)
            | SalesboardError::Chart(msg)
            | SalesboardError::Serialization(msg)
            | SalesboardError::Config(msg)
            | SalesboardError::NotFound(msg) => msg,
        }
    }

    /// HTTP status used by the dashboard API when this error reaches a handler
    #[cfg(feature = "server")]
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            SalesboardError::Validation(_) | SalesboardError::InvalidDateRange(_) => {
                StatusCode::BAD_REQUEST
            }
            SalesboardError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SalesboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SalesboardError {}

// 便捷的构造函数
impl SalesboardError {
    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        SalesboardError::FileOperation(msg.into())
    }

    pub fn csv_parse<T: Into<String>>(msg: T) -> Self {
        SalesboardError::CsvParse(msg.into())
    }

    pub fn missing_table<T: Into<String>>(msg: T) -> Self {
        SalesboardError::MissingTable(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        SalesboardError::Validation(msg.into())
    }

    pub fn invalid_date_range<T: Into<String>>(msg: T) -> Self {
        SalesboardError::InvalidDateRange(msg.into())
    }

    pub fn chart<T: Into<String>>(msg: T) -> Self {
        SalesboardError::Chart(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        SalesboardError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        SalesboardError::Config(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SalesboardError::NotFound(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for SalesboardError {
    fn from(err: std::io::Error) -> Self {
        SalesboardError::FileOperation(err.to_string())
    }
}

impl From<csv::Error> for SalesboardError {
    fn from(err: csv::Error) -> Self {
        SalesboardError::CsvParse(err.to_string())
    }
}

impl From<serde_json::Error> for SalesboardError {
    fn from(err: serde_json::Error) -> Self {
        SalesboardError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SalesboardError {
    fn from(err: chrono::ParseError) -> Self {
        SalesboardError::InvalidDateRange(err.to_string())
    }
}

impl From<config::ConfigError> for SalesboardError {
    fn from(err: config::ConfigError) -> Self {
        SalesboardError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SalesboardError {
    fn from(err: toml::ser::Error) -> Self {
        SalesboardError::Serialization(err.to_string())
    }
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for SalesboardError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        SalesboardError::Chart(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SalesboardError>;
