//! Number formatting for reports, charts and the dashboard.

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `1234567.891` -> `"1,234,567.89"` (with `decimals = 2`)
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

pub fn format_count(value: usize) -> String {
    format_thousands(value as f64, 0)
}

/// KPI card money: `$1.23M`, `$4.5K`, `$12.34`
pub fn fmt_money(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("${:.1}K", value / 1e3)
    } else {
        format!("${:.2}", value)
    }
}

/// Axis tick money: `$1.2M`, `$45K`, `$12`
pub fn fmt_axis(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e6 {
        format!("${:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("${:.0}K", value / 1e3)
    } else {
        format!("${:.0}", value)
    }
}

/// `+12.34%`, `-3.10%` or `N/A`
pub fn fmt_signed_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.2}%", v),
        None => "N/A".to_string(),
    }
}

/// `1` -> `"Jan"`; out-of-range months render as their number
pub fn month_abbr(month: u32) -> String {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_ABBR.get(i as usize))
        .map_or_else(|| month.to_string(), |m| m.to_string())
}
