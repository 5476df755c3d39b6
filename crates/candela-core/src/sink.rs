//! View sinks: the rendering side of the pipeline.
//!
//! A sink receives either a complete [`PriceView`] or a single human-readable
//! failure message, never a partial view.

use std::io::Write;

use serde::Serialize;

use crate::chart::CandleChart;
use crate::error::TROUBLESHOOTING;
use crate::format::FormattedRow;
use crate::{PriceView, SinkError, Symbol};

const TABLE_HEADERS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// Consumer of pipeline output.
pub trait ViewSink {
    /// Called before the fetch starts.
    fn loading(&mut self, _symbol: &Symbol) -> Result<(), SinkError> {
        Ok(())
    }

    fn render(&mut self, view: &PriceView) -> Result<(), SinkError>;

    fn render_error(&mut self, message: &str) -> Result<(), SinkError>;
}

impl<S: ViewSink + ?Sized> ViewSink for Box<S> {
    fn loading(&mut self, symbol: &Symbol) -> Result<(), SinkError> {
        (**self).loading(symbol)
    }

    fn render(&mut self, view: &PriceView) -> Result<(), SinkError> {
        (**self).render(view)
    }

    fn render_error(&mut self, message: &str) -> Result<(), SinkError> {
        (**self).render_error(message)
    }
}

/// Aligned text table, most recent day first.
pub struct TableSink<W: Write> {
    out: W,
    caption: Option<String>,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, caption: None }
    }

    /// Text appended to the symbol in the heading, e.g. `Last 30 Days`.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ViewSink for TableSink<W> {
    fn render(&mut self, view: &PriceView) -> Result<(), SinkError> {
        match &self.caption {
            Some(caption) => writeln!(self.out, "{} - {caption}", view.symbol)?,
            None => writeln!(self.out, "{}", view.symbol)?,
        }

        let rows = view.table.formatted_rows();
        if rows.is_empty() {
            writeln!(self.out, "(no trading days in range)")?;
            return Ok(());
        }

        let widths = column_widths(&rows);
        write_table_line(&mut self.out, &TABLE_HEADERS, &widths)?;
        let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ");
        writeln!(self.out, "{rule}")?;
        for row in &rows {
            write_table_line(&mut self.out, &row.cells(), &widths)?;
        }
        Ok(())
    }

    fn render_error(&mut self, message: &str) -> Result<(), SinkError> {
        write_error_banner(&mut self.out, message)
    }
}

fn column_widths(rows: &[FormattedRow]) -> [usize; 6] {
    let mut widths = TABLE_HEADERS.map(|header| header.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn write_table_line<W: Write>(out: &mut W, cells: &[&str; 6], widths: &[usize; 6]) -> std::io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (cell, width))| {
            let pad = " ".repeat(width.saturating_sub(cell.chars().count()));
            // date column left-aligned, numbers right-aligned
            if index == 0 {
                format!("{cell}{pad}")
            } else {
                format!("{pad}{cell}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

fn write_error_banner<W: Write>(out: &mut W, message: &str) -> Result<(), SinkError> {
    writeln!(out, "Error: {message}")?;
    writeln!(out, "Possible solutions:")?;
    for hint in TROUBLESHOOTING {
        writeln!(out, "  - {hint}")?;
    }
    Ok(())
}

/// Candlestick chart drawn through a caller-owned [`CandleChart`] handle.
pub struct ChartSink<'a, W: Write> {
    out: W,
    chart: &'a mut CandleChart,
    height: u16,
    width: u16,
    reports_errors: bool,
}

impl<'a, W: Write> ChartSink<'a, W> {
    pub fn new(out: W, chart: &'a mut CandleChart, height: u16, width: u16) -> Self {
        Self {
            out,
            chart,
            height,
            width,
            reports_errors: true,
        }
    }

    /// Leave failures to another sink sharing the same output.
    pub fn without_errors(mut self) -> Self {
        self.reports_errors = false;
        self
    }
}

impl<W: Write> ViewSink for ChartSink<'_, W> {
    fn render(&mut self, view: &PriceView) -> Result<(), SinkError> {
        let title = format!("{} Price", view.symbol);
        let update = self.chart.render_or_update(title, &view.chart);
        tracing::debug!(symbol = %view.symbol, ?update, points = view.chart.len(), "chart updated");
        for line in self.chart.lines(self.height, self.width) {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    fn render_error(&mut self, message: &str) -> Result<(), SinkError> {
        if !self.reports_errors {
            return Ok(());
        }
        write_error_banner(&mut self.out, message)
    }
}

/// JSON document per render, for scripting.
pub struct JsonSink<W: Write> {
    out: W,
    pretty: bool,
}

#[derive(Serialize)]
struct JsonError<'a> {
    error: &'a str,
    troubleshooting: [&'static str; 4],
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    fn emit<T: Serialize>(&mut self, value: &T) -> Result<(), SinkError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, value)?;
        } else {
            serde_json::to_writer(&mut self.out, value)?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> ViewSink for JsonSink<W> {
    fn render(&mut self, view: &PriceView) -> Result<(), SinkError> {
        self.emit(view)
    }

    fn render_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.emit(&JsonError {
            error: message,
            troubleshooting: TROUBLESHOOTING,
        })
    }
}

/// `Loading...` indicator, typically on stderr.
pub struct StatusSink<W: Write> {
    out: W,
}

impl<W: Write> StatusSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ViewSink for StatusSink<W> {
    fn loading(&mut self, symbol: &Symbol) -> Result<(), SinkError> {
        writeln!(self.out, "Loading {symbol}...")?;
        Ok(())
    }

    fn render(&mut self, _view: &PriceView) -> Result<(), SinkError> {
        Ok(())
    }

    fn render_error(&mut self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Fans every call out to each inner sink in order.
#[derive(Default)]
pub struct CompositeSink<'a> {
    sinks: Vec<Box<dyn ViewSink + 'a>>,
}

impl<'a> CompositeSink<'a> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with(mut self, sink: impl ViewSink + 'a) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl ViewSink for CompositeSink<'_> {
    fn loading(&mut self, symbol: &Symbol) -> Result<(), SinkError> {
        self.sinks.iter_mut().try_for_each(|sink| sink.loading(symbol))
    }

    fn render(&mut self, view: &PriceView) -> Result<(), SinkError> {
        self.sinks.iter_mut().try_for_each(|sink| sink.render(view))
    }

    fn render_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.sinks.iter_mut().try_for_each(|sink| sink.render_error(message))
    }
}
