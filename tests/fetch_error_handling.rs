//! Behavior-driven tests for fetch failures
//!
//! These tests verify HOW each class of fetch failure is classified and what
//! the user ends up seeing: one readable message, troubleshooting hints, and
//! never a partial table or chart.

use candela_core::{
    DateRange, FetchConfig, FetchError, HttpClient, HttpError, HttpRequest, HttpResponse,
    JsonSink, PipelineOutcome, PriceView, ProxyMode, QuoteFetcher, QuotePipeline, SinkError,
    Symbol, TableSink, ViewSink, TROUBLESHOOTING,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

// =============================================================================
// Test doubles
// =============================================================================

struct FixedHttpClient {
    response: Result<HttpResponse, HttpError>,
    calls: Mutex<usize>,
}

impl FixedHttpClient {
    fn new(response: Result<HttpResponse, HttpError>) -> Self {
        Self {
            response,
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().expect("call counter should not be poisoned")
    }
}

impl HttpClient for FixedHttpClient {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        *self.calls.lock().expect("call counter should not be poisoned") += 1;
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

#[derive(Default)]
struct RecordingSink {
    rendered: usize,
    errors: Vec<String>,
}

impl ViewSink for RecordingSink {
    fn render(&mut self, _view: &PriceView) -> Result<(), SinkError> {
        self.rendered += 1;
        Ok(())
    }

    fn render_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.errors.push(message.to_owned());
        Ok(())
    }
}

fn pipeline(client: Arc<FixedHttpClient>) -> QuotePipeline {
    let config = FetchConfig::default().with_proxy(ProxyMode::Direct);
    QuotePipeline::new(QuoteFetcher::new(client, config))
}

fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

fn range() -> DateRange {
    DateRange::between_unix(1_704_067_200, 1_706_745_599).expect("valid range")
}

async fn run_with(response: Result<HttpResponse, HttpError>, raw: &str) -> (PipelineOutcome, RecordingSink) {
    let pipeline = pipeline(Arc::new(FixedHttpClient::new(response)));
    let mut sink = RecordingSink::default();
    let outcome = pipeline
        .run(&symbol(raw), &range(), &mut sink)
        .await
        .expect("sink accepts output");
    (outcome, sink)
}

const GENERIC_MESSAGE: &str =
    "Could not fetch stock data. Please try a different symbol or check your internet connection.";

// =============================================================================
// Fetch Errors: Classification
// =============================================================================

#[tokio::test]
async fn when_result_is_null_system_reports_no_data_for_symbol() {
    // Given: The provider does not know the symbol
    let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

    // When: The pipeline runs
    let (outcome, sink) = run_with(Ok(HttpResponse::ok_json(body)), "ZZZZ").await;

    // Then: A NoData error names the symbol and no view is rendered
    let PipelineOutcome::Failed(error) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(error.code(), "fetch.no_data");
    assert!(error.to_string().contains("symbol may be delisted"));
    assert_eq!(sink.rendered, 0);
    assert_eq!(sink.errors, vec!["No data available for ZZZZ."]);
}

#[tokio::test]
async fn when_result_array_is_empty_system_reports_no_data() {
    // Given: A successful response with an empty result list
    let body = r#"{"chart":{"result":[],"error":null}}"#;

    // When: The pipeline runs
    let (outcome, sink) = run_with(Ok(HttpResponse::ok_json(body)), "AAPL").await;

    // Then: The outcome is NoData without provider detail
    assert_eq!(outcome, PipelineOutcome::Failed(FetchError::no_data("AAPL")));
    assert_eq!(sink.rendered, 0);
}

#[tokio::test]
async fn when_provider_returns_http_error_system_reports_request_failed() {
    // Given: The provider answers 404
    let response = HttpResponse::new(404, r#"{"chart":{"result":null}}"#);

    // When: The pipeline runs
    let (outcome, sink) = run_with(Ok(response), "AAPL").await;

    // Then: The status is kept and the user sees the generic message
    assert_eq!(outcome, PipelineOutcome::Failed(FetchError::RequestFailed { status: 404 }));
    assert_eq!(sink.errors, vec![GENERIC_MESSAGE]);
}

#[tokio::test]
async fn when_network_is_unreachable_system_reports_network_error() {
    // Given: The transport fails before any response
    let response = Err(HttpError::new("dns error: failed to lookup address"));

    // When: The pipeline runs
    let (outcome, sink) = run_with(response, "AAPL").await;

    // Then: A network error is reported without transport details
    let PipelineOutcome::Failed(error) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(error.code(), "fetch.network");
    assert_eq!(sink.errors, vec![GENERIC_MESSAGE]);
    assert!(!sink.errors[0].contains("dns"));
}

#[tokio::test]
async fn when_body_is_not_chart_json_system_reports_malformed_response() {
    // Given: A proxy error page instead of JSON
    let response = HttpResponse::ok_json("<html>rate limited</html>");

    // When: The pipeline runs
    let (outcome, sink) = run_with(Ok(response), "AAPL").await;

    // Then: The failure is classified as malformed
    let PipelineOutcome::Failed(error) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(error.code(), "fetch.malformed");
    assert_eq!(sink.rendered, 0);
}

#[tokio::test]
async fn when_fetch_fails_no_retry_is_attempted() {
    // Given: A provider that is temporarily unavailable
    let client = Arc::new(FixedHttpClient::new(Ok(HttpResponse::new(503, "busy"))));
    let pipeline = pipeline(client.clone());
    let mut sink = RecordingSink::default();

    // When: The pipeline runs once
    let _ = pipeline.run(&symbol("AAPL"), &range(), &mut sink).await;

    // Then: Exactly one attempt was made
    assert_eq!(client.calls(), 1);
}

// =============================================================================
// Fetch Errors: What the user sees
// =============================================================================

#[tokio::test]
async fn when_table_sink_receives_failure_it_lists_troubleshooting_steps() {
    // Given: A failing fetch and a text table sink
    let pipeline = pipeline(Arc::new(FixedHttpClient::new(Err(HttpError::new("offline")))));
    let mut output = Vec::new();

    // When: The pipeline runs
    {
        let mut sink = TableSink::new(&mut output);
        pipeline
            .run(&symbol("AAPL"), &range(), &mut sink)
            .await
            .expect("sink accepts output");
    }

    // Then: The message and every hint are printed, but no table
    let text = String::from_utf8(output).expect("utf-8");
    assert!(text.starts_with(&format!("Error: {GENERIC_MESSAGE}")));
    for hint in TROUBLESHOOTING {
        assert!(text.contains(hint), "missing hint {hint:?}");
    }
    assert!(!text.contains("Date"));
}

#[tokio::test]
async fn when_json_sink_receives_failure_it_emits_error_document() {
    // Given: A failing fetch and a JSON sink
    let body = r#"{"chart":{"result":null,"error":null}}"#;
    let pipeline = pipeline(Arc::new(FixedHttpClient::new(Ok(HttpResponse::ok_json(body)))));
    let mut output = Vec::new();

    // When: The pipeline runs
    {
        let mut sink = JsonSink::new(&mut output, false);
        pipeline
            .run(&symbol("QQQQ"), &range(), &mut sink)
            .await
            .expect("sink accepts output");
    }

    // Then: A single JSON document carries the message and hints
    let value: serde_json::Value =
        serde_json::from_slice(&output).expect("output is one JSON document");
    assert_eq!(value["error"], "No data available for QQQQ.");
    assert_eq!(value["troubleshooting"].as_array().map(Vec::len), Some(4));
}
