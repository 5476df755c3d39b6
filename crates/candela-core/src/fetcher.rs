use std::sync::Arc;

use crate::config::FetchConfig;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{DateRange, FetchError, RawQuotePayload, ResolvedRange, Symbol};

/// Issues daily-candle history requests against the chart endpoint.
///
/// One attempt per call: no caching, retry or rate limiting.
#[derive(Clone)]
pub struct QuoteFetcher {
    http_client: Arc<dyn HttpClient>,
    config: FetchConfig,
}

impl QuoteFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>, config: FetchConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Fetcher over a reqwest transport configured from `config`.
    pub fn from_config(config: FetchConfig) -> Result<Self, FetchError> {
        let client = ReqwestHttpClient::new(&config.user_agent)
            .map_err(|e| FetchError::network(e.message()))?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Provider URL for `symbol` over `range`, before proxy wrapping.
    pub fn chart_url(&self, symbol: &Symbol, range: ResolvedRange) -> String {
        format!(
            "{}/v8/finance/chart/{}?interval=1d&period1={}&period2={}",
            self.config.base_url,
            urlencoding::encode(symbol.as_str()),
            range.period1(),
            range.period2()
        )
    }

    /// Fetch daily history, resolving day-count ranges against the current time.
    pub async fn fetch(
        &self,
        symbol: &Symbol,
        range: &DateRange,
    ) -> Result<RawQuotePayload, FetchError> {
        self.fetch_resolved(symbol, range.resolve_now()).await
    }

    pub async fn fetch_resolved(
        &self,
        symbol: &Symbol,
        range: ResolvedRange,
    ) -> Result<RawQuotePayload, FetchError> {
        let url = self.config.proxy.wrap(&self.chart_url(symbol, range));
        tracing::debug!(%symbol, period1 = range.period1(), period2 = range.period2(), %url, "requesting chart");

        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            tracing::warn!(%symbol, error = %error, "chart request transport failure");
            FetchError::network(error.message())
        })?;

        if !response.is_success() {
            tracing::warn!(%symbol, status = response.status, "chart request rejected");
            return Err(FetchError::RequestFailed {
                status: response.status,
            });
        }

        let payload = RawQuotePayload::from_chart_json(&response.body, symbol.as_str())
            .inspect_err(|error| tracing::warn!(%symbol, %error, "chart response unusable"))?;
        tracing::debug!(%symbol, rows = payload.len(), "decoded chart payload");
        Ok(payload)
    }
}
