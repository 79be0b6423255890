pub mod csv_handler;
pub mod format;

pub use format::{
    fmt_axis, fmt_money, fmt_signed_pct, format_count, format_thousands, month_abbr,
};
