use crate::{day_from_unix_seconds, DailyQuote, QuoteSeries, RawQuotePayload, Symbol};

/// Turn a provider payload into one [`DailyQuote`] per timestamp.
///
/// Input order is preserved and no row is dropped or synthesized; values the
/// provider left out stay `None`.
pub fn normalize(symbol: &Symbol, payload: &RawQuotePayload) -> QuoteSeries {
    let quotes = payload
        .timestamps
        .iter()
        .enumerate()
        .map(|(i, &ts)| DailyQuote {
            date: day_from_unix_seconds(ts),
            open: value_at(&payload.open, i),
            high: value_at(&payload.high, i),
            low: value_at(&payload.low, i),
            close: value_at(&payload.close, i),
            volume: payload.volume.get(i).copied().flatten(),
        })
        .collect();

    QuoteSeries {
        symbol: resolve_symbol(symbol, &payload.symbol),
        currency: payload.currency.clone(),
        exchange_name: payload.exchange_name.clone(),
        quotes,
    }
}

// NaN/inf from the provider count as gaps.
fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values
        .get(index)
        .copied()
        .flatten()
        .filter(|value| value.is_finite())
}

// Prefer the provider's canonical ticker, falling back to the requested one.
fn resolve_symbol(requested: &Symbol, reported: &str) -> Symbol {
    Symbol::parse(reported).unwrap_or_else(|_| requested.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol() -> Symbol {
        Symbol::parse("AAPL").expect("valid")
    }

    #[test]
    fn keeps_gaps_and_short_columns() {
        let payload = RawQuotePayload {
            symbol: String::from("AAPL"),
            timestamps: vec![0, 86_400],
            open: vec![Some(1.0), None],
            high: vec![Some(2.0), Some(f64::NAN)],
            low: vec![Some(0.5)],
            close: vec![Some(1.5), Some(1.7)],
            volume: vec![Some(100)],
            ..RawQuotePayload::default()
        };

        let series = normalize(&symbol(), &payload);
        assert_eq!(series.len(), 2);
        let second = series.quotes[1];
        assert_eq!(second.date.days_since_epoch(), 1);
        assert_eq!(second.open, None);
        assert_eq!(second.high, None);
        assert_eq!(second.low, None);
        assert_eq!(second.close, Some(1.7));
        assert_eq!(second.volume, None);
    }

    #[test]
    fn falls_back_to_requested_symbol() {
        let payload = RawQuotePayload::default();
        let series = normalize(&symbol(), &payload);
        assert_eq!(series.symbol.as_str(), "AAPL");
        assert!(series.is_empty());
    }

    #[test]
    fn carries_provider_metadata() {
        let payload = RawQuotePayload {
            symbol: String::from("BMW.DE"),
            currency: Some(String::from("EUR")),
            exchange_name: Some(String::from("GER")),
            ..RawQuotePayload::default()
        };
        let series = normalize(&Symbol::parse("bmw.de").expect("valid"), &payload);
        assert_eq!(series.symbol.as_str(), "BMW.DE");
        assert_eq!(series.currency.as_deref(), Some("EUR"));
        assert_eq!(series.exchange_name.as_deref(), Some("GER"));
    }
}
