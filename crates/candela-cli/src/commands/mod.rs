mod history;
mod watch;

use candela_core::{
    parse_date, DateRange, FetchConfig, Lookback, ProxyMode, QuoteFetcher, QuotePipeline,
};

use crate::cli::{Cli, Command, RangeArgs};
use crate::error::CliError;

/// Resolved history window plus the caption shown above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSelection {
    pub range: DateRange,
    pub caption: String,
}

impl RangeSelection {
    pub fn from_args(args: &RangeArgs) -> Result<Self, CliError> {
        if let (Some(start), Some(end)) = (&args.start, &args.end) {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            return Ok(Self {
                range: DateRange::from_dates(start, end)?,
                caption: format!("{start} to {end}"),
            });
        }

        let lookback = args
            .days
            .map(Lookback::try_from)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            range: DateRange::from(lookback),
            caption: lookback.label().to_owned(),
        })
    }
}

/// Environment configuration overlaid with command-line flags.
pub fn fetch_config(cli: &Cli) -> FetchConfig {
    let mut config = FetchConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if cli.no_proxy {
        config = config.with_proxy(ProxyMode::Direct);
    } else if let Some(prefix) = &cli.proxy {
        config = config.with_proxy(ProxyMode::forward(prefix.clone()));
    }
    if cli.timeout_ms.is_some() {
        config = config.with_timeout_ms(cli.timeout_ms);
    }
    config
}

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = fetch_config(cli);
    tracing::debug!(base_url = %config.base_url, proxy = ?config.proxy, timeout_ms = ?config.timeout_ms, "fetch configuration");
    let pipeline = QuotePipeline::new(QuoteFetcher::from_config(config)?);

    match &cli.command {
        Command::History(args) => history::run(cli, args, &pipeline).await,
        Command::Watch(args) => watch::run(cli, args, &pipeline).await,
    }
}
