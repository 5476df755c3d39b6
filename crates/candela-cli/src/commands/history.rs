use candela_core::{CandleChart, PipelineOutcome, QuotePipeline, Symbol};

use crate::cli::{Cli, HistoryArgs};
use crate::error::CliError;
use crate::output;

use super::RangeSelection;

pub async fn run(cli: &Cli, args: &HistoryArgs, pipeline: &QuotePipeline) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let selection = RangeSelection::from_args(&args.range)?;

    let mut chart = CandleChart::new().with_color(cli.color);
    let mut sink = output::build_sink(cli, &selection.caption, &mut chart);

    match pipeline.run(&symbol, &selection.range, &mut sink).await? {
        PipelineOutcome::Failed(error) => Err(CliError::Fetch(error)),
        PipelineOutcome::Rendered { .. } | PipelineOutcome::Superseded => Ok(()),
    }
}
