//! CLI argument definitions for Candela.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `history` | Fetch and render daily history for one symbol |
//! | `watch` | Read symbols from stdin, render the most recent request |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `both` | Output format (table, chart, both, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--chart-height` | `16` | Candle rows in the chart |
//! | `--chart-width` | `80` | Chart columns, price axis included |
//! | `--color` | `false` | Color candles with ANSI escapes |
//! | `--proxy` | `https://corsproxy.io/?` | Forward proxy prefix |
//! | `--no-proxy` | `false` | Call the provider directly |
//! | `--base-url` | Yahoo `query1` host | Chart endpoint host |
//! | `--timeout-ms` | none | Request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! candela history AAPL
//! candela history MSFT --days 90 --format table
//! candela history ^GSPC --start 2024-01-01 --end 2024-03-31 --format json --pretty
//! printf 'AAPL\nMSFT\n' | candela watch --format chart
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Candela - daily stock price history in the terminal
#[derive(Debug, Parser)]
#[command(
    name = "candela",
    author,
    version,
    about = "Daily stock price history as a table and candlestick chart"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Both)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Candle rows in the chart.
    #[arg(long, global = true, default_value_t = 16)]
    pub chart_height: u16,

    /// Total chart width in columns, price axis included.
    #[arg(long, global = true, default_value_t = 80)]
    pub chart_width: u16,

    /// Color bullish candles green and bearish candles red.
    #[arg(long, global = true, default_value_t = false)]
    pub color: bool,

    /// Forward proxy prefix; the encoded provider URL is appended to it.
    #[arg(long, global = true, conflicts_with = "no_proxy")]
    pub proxy: Option<String>,

    /// Call the provider without a forward proxy.
    #[arg(long, global = true, default_value_t = false)]
    pub no_proxy: bool,

    /// Provider host, e.g. for a local mirror.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds. No timeout when omitted.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Price table, latest day first.
    Table,
    /// Candlestick chart, oldest day first.
    Chart,
    /// Table followed by chart.
    Both,
    /// The full price view as JSON.
    Json,
}

impl OutputFormat {
    pub const fn shows_table(self) -> bool {
        matches!(self, Self::Table | Self::Both)
    }

    pub const fn shows_chart(self) -> bool {
        matches!(self, Self::Chart | Self::Both)
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch daily history for one symbol.
    ///
    /// # Examples
    ///
    ///   candela history AAPL
    ///   candela history AAPL --days 365
    ///   candela history AAPL --start 2024-01-01 --end 2024-01-31
    History(HistoryArgs),

    /// Read one symbol per stdin line and render the latest request.
    ///
    /// Requests run concurrently; a response that arrives after a newer
    /// symbol was entered is discarded.
    Watch(WatchArgs),
}

/// Window selection shared by both commands.
#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// Day-count window: 30, 90, 180 or 365 (default 30).
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub days: Option<u32>,

    /// First day (YYYY-MM-DD), requires --end.
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Last day (YYYY-MM-DD), requires --start.
    #[arg(long, requires = "start")]
    pub end: Option<String>,
}

/// Arguments for the `history` command.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Ticker symbol (e.g., AAPL, BRK-B, ^GSPC).
    pub symbol: String,

    #[command(flatten)]
    pub range: RangeArgs,
}

/// Arguments for the `watch` command.
#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub range: RangeArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_defaults() {
        let cli = Cli::try_parse_from(["candela", "history", "aapl"]).expect("parses");
        assert_eq!(cli.format, OutputFormat::Both);
        assert_eq!(cli.chart_height, 16);
        assert!(cli.timeout_ms.is_none());
        let Command::History(args) = cli.command else {
            panic!("expected history");
        };
        assert_eq!(args.symbol, "aapl");
        assert!(args.range.days.is_none());
    }

    #[test]
    fn days_conflicts_with_explicit_dates() {
        let result = Cli::try_parse_from([
            "candela", "history", "AAPL", "--days", "30", "--start", "2024-01-01", "--end", "2024-01-31",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn start_requires_end() {
        let result = Cli::try_parse_from(["candela", "history", "AAPL", "--start", "2024-01-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn proxy_flags_conflict() {
        let result = Cli::try_parse_from([
            "candela", "--no-proxy", "--proxy", "https://p.example/?", "history", "AAPL",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn watch_accepts_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["candela", "watch", "--format", "json", "--days", "90"])
            .expect("parses");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Command::Watch(ref args) if args.range.days == Some(90)));
    }
}
