use serde::Serialize;

use crate::DailyQuote;

/// Rendered in place of any value the provider left out.
pub const MISSING: &str = "—";

/// Display strings for one table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedRow {
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl FormattedRow {
    pub fn cells(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.open.as_str(),
            self.high.as_str(),
            self.low.as_str(),
            self.close.as_str(),
            self.volume.as_str(),
        ]
    }
}

pub fn format_row(quote: &DailyQuote) -> FormattedRow {
    FormattedRow {
        date: quote.date.to_string(),
        open: format_price(quote.open),
        high: format_price(quote.high),
        low: format_price(quote.low),
        close: format_price(quote.close),
        volume: format_volume(quote.volume),
    }
}

/// `$1,234.56` with two decimals, or [`MISSING`].
pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => {
            let fixed = format!("{:.2}", value.abs());
            let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
            let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
            format!("{sign}${}.{fraction}", group_thousands(whole))
        }
        _ => String::from(MISSING),
    }
}

/// Thousands-grouped integer, or [`MISSING`].
pub fn format_volume(value: Option<u64>) -> String {
    value
        .map(|volume| group_thousands(&volume.to_string()))
        .unwrap_or_else(|| String::from(MISSING))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
