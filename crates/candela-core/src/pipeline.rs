//! Fetch, normalize, build, render.
//!
//! Every run takes a [`Ticket`] from a shared [`RequestSequencer`] before
//! fetching. When the response arrives the ticket is checked again; if a newer
//! request was issued meanwhile the response is discarded and the sink is left
//! untouched ([`PipelineOutcome::Superseded`]).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::fetcher::QuoteFetcher;
use crate::sink::ViewSink;
use crate::{build, normalize, DateRange, FetchError, PriceView, SinkError, Symbol};

/// Position of a request in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic ticket counter shared by clones.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket; it becomes the latest.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}

/// What happened to one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Rendered { symbol: Symbol, rows: usize },
    Failed(FetchError),
    /// A newer request was issued before this one completed.
    Superseded,
}

/// A loaded (or failed) view waiting to be delivered.
#[derive(Debug, Clone)]
pub struct PendingView {
    pub ticket: Ticket,
    pub symbol: Symbol,
    pub result: Result<PriceView, FetchError>,
}

#[derive(Clone)]
pub struct QuotePipeline {
    fetcher: QuoteFetcher,
    sequencer: RequestSequencer,
}

impl QuotePipeline {
    pub fn new(fetcher: QuoteFetcher) -> Self {
        Self::with_sequencer(fetcher, RequestSequencer::new())
    }

    pub fn with_sequencer(fetcher: QuoteFetcher, sequencer: RequestSequencer) -> Self {
        Self { fetcher, sequencer }
    }

    pub fn fetcher(&self) -> &QuoteFetcher {
        &self.fetcher
    }

    pub fn sequencer(&self) -> &RequestSequencer {
        &self.sequencer
    }

    /// Start a request. Any ticket issued earlier is superseded.
    pub fn begin(&self) -> Ticket {
        self.sequencer.issue()
    }

    /// Fetch and derive both views. Never touches a sink.
    pub async fn load(&self, symbol: &Symbol, range: &DateRange) -> Result<PriceView, FetchError> {
        let payload = self.fetcher.fetch(symbol, range).await?;
        let series = normalize(symbol, &payload);
        tracing::debug!(%symbol, quotes = series.len(), gaps = series.gap_count(), "normalized series");
        Ok(build(&series))
    }

    /// [`Self::load`] with owned arguments, suitable for `tokio::spawn`.
    pub async fn load_ticketed(&self, ticket: Ticket, symbol: Symbol, range: DateRange) -> PendingView {
        let result = self.load(&symbol, &range).await;
        PendingView {
            ticket,
            symbol,
            result,
        }
    }

    /// Hand a loaded view to `sink` unless a newer request exists.
    pub fn deliver<S: ViewSink + ?Sized>(
        &self,
        pending: PendingView,
        sink: &mut S,
    ) -> Result<PipelineOutcome, SinkError> {
        if !self.sequencer.is_latest(pending.ticket) {
            tracing::debug!(symbol = %pending.symbol, ticket = pending.ticket.value(), "discarding stale response");
            return Ok(PipelineOutcome::Superseded);
        }

        match pending.result {
            Ok(view) => {
                sink.render(&view)?;
                let rows = view.table.len();
                tracing::info!(symbol = %view.symbol, rows, "rendered price view");
                Ok(PipelineOutcome::Rendered {
                    symbol: view.symbol,
                    rows,
                })
            }
            Err(error) => {
                sink.render_error(&error.user_message())?;
                Ok(PipelineOutcome::Failed(error))
            }
        }
    }

    /// One complete request: loading indicator, fetch, render.
    pub async fn run<S: ViewSink + ?Sized>(
        &self,
        symbol: &Symbol,
        range: &DateRange,
        sink: &mut S,
    ) -> Result<PipelineOutcome, SinkError> {
        let ticket = self.begin();
        sink.loading(symbol)?;
        let pending = self.load_ticketed(ticket, symbol.clone(), *range).await;
        self.deliver(pending, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FetchConfig, ProxyMode};
    use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};
    use std::future::Future;
    use std::pin::Pin;

    struct FixedHttpClient {
        response: Result<HttpResponse, HttpError>,
    }

    impl HttpClient for FixedHttpClient {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[derive(Default)]
    struct EventSink {
        events: Vec<String>,
    }

    impl ViewSink for EventSink {
        fn loading(&mut self, symbol: &Symbol) -> Result<(), SinkError> {
            self.events.push(format!("loading {symbol}"));
            Ok(())
        }

        fn render(&mut self, view: &PriceView) -> Result<(), SinkError> {
            self.events.push(format!("render {} {}", view.symbol, view.table.len()));
            Ok(())
        }

        fn render_error(&mut self, message: &str) -> Result<(), SinkError> {
            self.events.push(format!("error {message}"));
            Ok(())
        }
    }

    const BODY: &str = r#"{"chart":{"result":[{"meta":{"symbol":"AAPL"},"timestamp":[259200,86400],
        "indicators":{"quote":[{"open":[10.0,20.0],"high":[12.0,22.0],"low":[9.0,19.0],"close":[11.0,21.0],"volume":[5,6]}]}}],"error":null}}"#;

    fn pipeline(response: Result<HttpResponse, HttpError>) -> QuotePipeline {
        let client = Arc::new(FixedHttpClient { response });
        let config = FetchConfig::default().with_proxy(ProxyMode::Direct);
        QuotePipeline::new(QuoteFetcher::new(client, config))
    }

    fn symbol() -> Symbol {
        Symbol::parse("AAPL").expect("valid")
    }

    fn range() -> DateRange {
        DateRange::between_unix(0, 400_000).expect("valid range")
    }

    #[test]
    fn later_tickets_supersede_earlier_ones() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        assert!(sequencer.is_latest(first));

        let second = sequencer.clone().issue();
        assert!(!sequencer.is_latest(first));
        assert!(sequencer.is_latest(second));
        assert!(second > first);
    }

    #[tokio::test]
    async fn run_renders_successful_fetch() {
        let pipeline = pipeline(Ok(HttpResponse::ok_json(BODY)));
        let mut sink = EventSink::default();

        let outcome = pipeline.run(&symbol(), &range(), &mut sink).await.expect("sink ok");

        assert_eq!(
            outcome,
            PipelineOutcome::Rendered {
                symbol: symbol(),
                rows: 2
            }
        );
        assert_eq!(sink.events, vec!["loading AAPL", "render AAPL 2"]);
    }

    #[tokio::test]
    async fn run_reports_failure_without_views() {
        let pipeline = pipeline(Err(HttpError::new("offline")));
        let mut sink = EventSink::default();

        let outcome = pipeline.run(&symbol(), &range(), &mut sink).await.expect("sink ok");

        assert_eq!(outcome, PipelineOutcome::Failed(FetchError::network("offline")));
        assert_eq!(sink.events.len(), 2);
        assert!(sink.events[1].starts_with("error Could not fetch stock data."));
    }

    #[tokio::test]
    async fn stale_response_never_reaches_sink() {
        let pipeline = pipeline(Ok(HttpResponse::ok_json(BODY)));
        let mut sink = EventSink::default();

        let stale = pipeline.begin();
        let fresh = pipeline.begin();
        let stale_view = pipeline.load_ticketed(stale, symbol(), range()).await;
        let fresh_view = pipeline.load_ticketed(fresh, symbol(), range()).await;

        let outcome = pipeline.deliver(stale_view, &mut sink).expect("sink ok");
        assert_eq!(outcome, PipelineOutcome::Superseded);
        assert!(sink.events.is_empty());

        let outcome = pipeline.deliver(fresh_view, &mut sink).expect("sink ok");
        assert!(matches!(outcome, PipelineOutcome::Rendered { rows: 2, .. }));
    }
}
