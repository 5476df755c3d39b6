use thiserror::Error;

/// Validation errors for user-supplied symbols and date ranges.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("range start {start} is after range end {end}")]
    InvertedRange { start: i64, end: i64 },
    #[error("day count must be greater than zero")]
    ZeroDays,
    #[error("unsupported lookback of {value} days, expected one of 30, 90, 180, 365")]
    InvalidLookback { value: u32 },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
}

/// Failure of a single fetch attempt against the quote provider.
///
/// Every variant is terminal for the attempt; callers re-invoke on their own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("quote request failed with status {status}")]
    RequestFailed { status: u16 },

    #[error("no data available for symbol {symbol}{}", detail_suffix(.detail))]
    NoData {
        symbol: String,
        detail: Option<String>,
    },

    #[error("malformed chart response: {message}")]
    Malformed { message: String },
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(" ({detail})"))
        .unwrap_or_default()
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn no_data(symbol: impl Into<String>) -> Self {
        Self::NoData {
            symbol: symbol.into(),
            detail: None,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Network { .. } => "fetch.network",
            Self::RequestFailed { .. } => "fetch.request_failed",
            Self::NoData { .. } => "fetch.no_data",
            Self::Malformed { .. } => "fetch.malformed",
        }
    }

    /// Single human-readable message handed to view sinks.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoData { symbol, .. } => format!("No data available for {symbol}."),
            _ => String::from(
                "Could not fetch stock data. Please try a different symbol or check your internet connection.",
            ),
        }
    }
}

/// Generic guidance shown next to any fetch failure.
pub const TROUBLESHOOTING: [&str; 4] = [
    "Check your internet connection",
    "Verify the stock symbol (e.g., AAPL, MSFT)",
    "Try a different date range",
    "Wait a moment and try again",
];

/// Errors raised while a view sink renders its output.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
