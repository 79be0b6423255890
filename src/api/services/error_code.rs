//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::SalesboardError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 数据集错误
/// - 3000-3099: 图表错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    InvalidDateFormat = 1012,
    ServiceUnavailable = 1030,

    // 数据集错误 2000-2099
    DatasetMissing = 2000,
    DatasetParseError = 2001,

    // 图表错误 3000-3099
    ChartNotFound = 3000,
    ChartRenderFailed = 3001,
}

impl From<SalesboardError> for ErrorCode {
    fn from(err: SalesboardError) -> Self {
        match err {
            SalesboardError::Validation(_) => ErrorCode::BadRequest,
            SalesboardError::InvalidDateRange(_) => ErrorCode::InvalidDateFormat,
            SalesboardError::NotFound(_) => ErrorCode::NotFound,
            SalesboardError::MissingTable(_) => ErrorCode::DatasetMissing,
            SalesboardError::CsvParse(_) => ErrorCode::DatasetParseError,
            SalesboardError::Chart(_) => ErrorCode::ChartRenderFailed,
            SalesboardError::FileOperation(_)
            | SalesboardError::Serialization(_)
            | SalesboardError::Config(_) => ErrorCode::InternalServerError,
        }
    }
}
