use std::io;

use candela_core::{CandleChart, ChartSink, CompositeSink, JsonSink, StatusSink, TableSink};

use crate::cli::{Cli, OutputFormat};

/// Assemble the sinks selected by `--format`.
///
/// Views go to stdout; the loading indicator goes to stderr so piped JSON
/// stays clean.
pub fn build_sink<'a>(cli: &Cli, caption: &str, chart: &'a mut CandleChart) -> CompositeSink<'a> {
    let mut sink = CompositeSink::new().with(StatusSink::new(io::stderr()));

    if cli.format == OutputFormat::Json {
        return sink.with(JsonSink::new(io::stdout(), cli.pretty));
    }
    if cli.format.shows_table() {
        sink = sink.with(TableSink::new(io::stdout()).with_caption(caption));
    }
    if cli.format.shows_chart() {
        let chart_sink = ChartSink::new(io::stdout(), chart, cli.chart_height, cli.chart_width);
        sink = if cli.format.shows_table() {
            sink.with(chart_sink.without_errors())
        } else {
            sink.with(chart_sink)
        };
    }
    sink
}
