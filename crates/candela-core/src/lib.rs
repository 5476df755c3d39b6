//! # Candela Core
//!
//! Daily price history for one ticker: fetch, normalize, present.
//!
//! ## Overview
//!
//! - **Fetch** daily candles from the Yahoo chart endpoint, optionally through
//!   a forward proxy
//! - **Normalize** the columnar payload into one [`DailyQuote`] per trading day
//! - **Present** a latest-first table and an oldest-first candlestick series
//! - **Render** through pluggable [`ViewSink`]s (text table, text candlestick
//!   chart, JSON)
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chart`] | Caller-owned candlestick chart handle and text renderer |
//! | [`config`] | Fetch configuration and proxy mode |
//! | [`domain`] | Symbol, date range, trading day and quote models |
//! | [`error`] | Core error types and troubleshooting hints |
//! | [`fetcher`] | Chart endpoint client |
//! | [`format`] | Display formatting for prices and volumes |
//! | [`http_client`] | HTTP client abstraction |
//! | [`normalize`] | Payload to quote series conversion |
//! | [`payload`] | Provider JSON decoding |
//! | [`pipeline`] | Request sequencing and the fetch-to-sink pipeline |
//! | [`present`] | Tabular and chart views |
//! | [`sink`] | View sink trait and implementations |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │  QuotePipeline  │────▶│ RequestSequencer │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  QuoteFetcher   │────▶│ HTTP Client      │
//! └────────┬────────┘     │ (reqwest)        │
//!          │              └──────────────────┘
//!          ▼
//! ┌─────────────────┐
//! │ normalize/build │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    ViewSink     │
//! └─────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use candela_core::{DateRange, FetchConfig, QuoteFetcher, QuotePipeline, Symbol, TableSink};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = QuotePipeline::new(QuoteFetcher::from_config(FetchConfig::from_env())?);
//!     let mut sink = TableSink::new(std::io::stdout()).with_caption("Last 30 Days");
//!
//!     let symbol = Symbol::parse("AAPL")?;
//!     let range = DateRange::last_days(30)?;
//!     pipeline.run(&symbol, &range, &mut sink).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fetch failures are terminal for the attempt and never produce partial
//! views. Sinks receive [`FetchError::user_message`] and show
//! [`TROUBLESHOOTING`] alongside it:
//!
//! ```rust
//! use candela_core::FetchError;
//!
//! fn describe(error: &FetchError) -> String {
//!     match error {
//!         FetchError::NoData { .. } => error.user_message(),
//!         other => format!("{} ({})", other.user_message(), other.code()),
//!     }
//! }
//! ```

pub mod chart;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod http_client;
pub mod normalize;
pub mod payload;
pub mod pipeline;
pub mod present;
pub mod sink;

// Chart
pub use chart::{CandleChart, ChartUpdate};

// Configuration
pub use config::{FetchConfig, ProxyMode};

// Domain models
pub use domain::{
    day_from_unix_seconds, parse_date, DailyQuote, DateRange, Lookback, QuoteSeries,
    ResolvedRange, Symbol, TradingDay,
};

// Error types
pub use error::{FetchError, SinkError, ValidationError, TROUBLESHOOTING};

// Fetching
pub use fetcher::QuoteFetcher;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use payload::RawQuotePayload;

// Normalization and presentation
pub use format::{format_price, format_row, format_volume, FormattedRow, MISSING};
pub use normalize::normalize;
pub use present::{build, chart_series, tabular_view, ChartPoint, PriceView, TabularView};

// Pipeline and sinks
pub use pipeline::{PendingView, PipelineOutcome, QuotePipeline, RequestSequencer, Ticket};
pub use sink::{ChartSink, CompositeSink, JsonSink, StatusSink, TableSink, ViewSink};
