//! Yahoo `v8/finance/chart` response decoding.

use serde::Deserialize;

use crate::FetchError;

/// Provider response reduced to the fields the normalizer needs.
///
/// The price and volume sequences are index-aligned with `timestamps`; a
/// `None` entry (or a sequence shorter than `timestamps`) marks a data gap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawQuotePayload {
    pub symbol: String,
    pub currency: Option<String>,
    pub exchange_name: Option<String>,
    pub timestamps: Vec<i64>,
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
    pub volume: Vec<Option<u64>>,
}

impl RawQuotePayload {
    /// Decode a chart response body.
    ///
    /// `requested_symbol` names the instrument in `NoData` errors and fills in
    /// for a missing `meta.symbol`.
    pub fn from_chart_json(body: &str, requested_symbol: &str) -> Result<Self, FetchError> {
        let response: ChartResponse = serde_json::from_str(body)
            .map_err(|e| FetchError::malformed(format!("failed to parse chart response: {e}")))?;

        let ChartBody { result, error } = response.chart.unwrap_or_default();
        let Some(result) = result.and_then(|results| results.into_iter().next()) else {
            return Err(FetchError::NoData {
                symbol: requested_symbol.to_owned(),
                detail: error.and_then(ChartApiError::into_detail),
            });
        };

        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        Ok(Self {
            symbol: result
                .meta
                .symbol
                .filter(|symbol| !symbol.is_empty())
                .unwrap_or_else(|| requested_symbol.to_owned()),
            currency: result.meta.currency,
            exchange_name: result.meta.exchange_name,
            timestamps: result.timestamp.unwrap_or_default(),
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            volume: quote.volume.into_iter().map(volume_from_f64).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

fn volume_from_f64(value: Option<f64>) -> Option<u64> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u64)
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    #[serde(default)]
    chart: Option<ChartBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl ChartApiError {
    fn into_detail(self) -> Option<String> {
        self.description
            .filter(|d| !d.trim().is_empty())
            .or(self.code)
    }
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default, rename = "exchangeName")]
    exchange_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}
