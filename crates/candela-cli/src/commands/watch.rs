use candela_core::{CandleChart, PendingView, PipelineOutcome, QuotePipeline, Symbol, ViewSink};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use crate::cli::{Cli, WatchArgs};
use crate::error::CliError;
use crate::output;

use super::RangeSelection;

/// Fetch every symbol read from stdin concurrently; only the most recently
/// entered symbol is rendered once its response arrives.
///
/// Exits after stdin closes and all in-flight requests have settled. The
/// exit status reflects the last delivered request.
pub async fn run(cli: &Cli, args: &WatchArgs, pipeline: &QuotePipeline) -> Result<(), CliError> {
    let selection = RangeSelection::from_args(&args.range)?;

    let mut chart = CandleChart::new().with_color(cli.color);
    let mut sink = output::build_sink(cli, &selection.caption, &mut chart);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks: JoinSet<PendingView> = JoinSet::new();
    let mut input_open = true;
    let mut last_outcome = None;

    while input_open || !tasks.is_empty() {
        tokio::select! {
            line = lines.next_line(), if input_open => match line? {
                Some(line) => {
                    if let Some(symbol) = parse_line(&line) {
                        let ticket = pipeline.begin();
                        sink.loading(&symbol)?;
                        let pipeline = pipeline.clone();
                        let range = selection.range;
                        tasks.spawn(async move { pipeline.load_ticketed(ticket, symbol, range).await });
                    }
                }
                None => input_open = false,
            },
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                let pending = joined.map_err(|error| CliError::Command(error.to_string()))?;
                match pipeline.deliver(pending, &mut sink)? {
                    PipelineOutcome::Superseded => {}
                    outcome => last_outcome = Some(outcome),
                }
            }
            else => break,
        }
    }

    match last_outcome {
        Some(PipelineOutcome::Failed(error)) => Err(CliError::Fetch(error)),
        _ => Ok(()),
    }
}

fn parse_line(line: &str) -> Option<Symbol> {
    let input = line.trim();
    if input.is_empty() {
        return None;
    }
    match Symbol::parse(input) {
        Ok(symbol) => Some(symbol),
        Err(error) => {
            tracing::warn!(input, %error, "skipping invalid symbol");
            eprintln!("error: {error}");
            None
        }
    }
}
