//! Quote records and batch response decoding.
//!
//! The quote service answers a batch request with a JSON object keyed by
//! ticker, each value holding a nested `quote` object:
//!
//! ```json
//! { "AAPL": { "quote": { "latestPrice": 189.5, "marketCap": 2950000000000 } } }
//! ```
//!
//! `extract_records` turns such a response into one `QuoteRecord` per
//! requested ticker, in request order. A ticker that is absent from the
//! response, or whose price or market cap is null, is reported as
//! `IndexError::MissingQuote` listing every such ticker of the chunk; no record
//! is ever filled with placeholder zeros.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::IndexError;
use crate::result::Result;
use crate::tickers::Ticker;

/// Decoded body of a batch quote response.
pub type BatchResponse = HashMap<String, QuoteEnvelope>;

/// Per-ticker entry of a batch response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteEnvelope {
    /// Quote payload; absent when the `quote` type was not returned.
    #[serde(default)]
    pub quote: Option<RawQuote>,
}

/// Fields of the service's quote object used by the allocator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuote {
    /// Last traded price.
    #[serde(default)]
    pub latest_price: Option<f64>,
    /// Market capitalization.
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// Market data for a single constituent.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRecord {
    /// Symbol identifier.
    pub ticker: Ticker,
    /// Last traded price, strictly positive.
    pub price: f64,
    /// Market capitalization, non-negative.
    pub market_cap: f64,
}

impl QuoteRecord {
    /// Build a record, validating the price and market cap.
    pub fn new(ticker: Ticker, price: f64, market_cap: f64) -> Result<Self> {
        if !price.is_finite() || price <= 0.0 {
            return Err(IndexError::InvalidQuote {
                ticker: ticker.to_string(),
                reason: format!("price must be positive, got {price}"),
            });
        }
        if !market_cap.is_finite() || market_cap < 0.0 {
            return Err(IndexError::InvalidQuote {
                ticker: ticker.to_string(),
                reason: format!("market cap must be non-negative, got {market_cap}"),
            });
        }
        Ok(Self {
            ticker,
            price,
            market_cap,
        })
    }
}

/// Decode a batch response body.
pub fn parse_batch_response(body: &str) -> Result<BatchResponse> {
    Ok(serde_json::from_str(body)?)
}

/// Build one record per ticker of `chunk`, in chunk order.
///
/// Every ticker without a usable quote is collected before failing, so the
/// error names all of them.
pub fn extract_records(chunk: &[Ticker], response: &BatchResponse) -> Result<Vec<QuoteRecord>> {
    let mut records = Vec::with_capacity(chunk.len());
    let mut missing = Vec::new();

    for ticker in chunk {
        let values = lookup(response, ticker)
            .and_then(|entry| entry.quote.as_ref())
            .and_then(|quote| quote.latest_price.zip(quote.market_cap));
        match values {
            Some((price, market_cap)) => {
                records.push(QuoteRecord::new(ticker.clone(), price, market_cap)?);
            }
            None => missing.push(ticker.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(IndexError::MissingQuote { tickers: missing });
    }
    Ok(records)
}

// Exact key, then the upper-cased symbol the service uses, then the smallest
// case-insensitive match so the choice never depends on map order.
fn lookup<'a>(response: &'a BatchResponse, ticker: &Ticker) -> Option<&'a QuoteEnvelope> {
    let symbol = ticker.as_str();
    response
        .get(symbol)
        .or_else(|| response.get(&symbol.to_ascii_uppercase()))
        .or_else(|| {
            response
                .iter()
                .filter(|(key, _)| key.eq_ignore_ascii_case(symbol))
                .min_by(|(a, _), (b, _)| a.cmp(b))
                .map(|(_, entry)| entry)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tickers(symbols: &[&str]) -> Vec<Ticker> {
        symbols.iter().map(|s| s.parse().unwrap()).collect()
    }

    const BODY: &str = r#"{
        "MSFT": {"quote": {"symbol": "MSFT", "latestPrice": 50.0, "marketCap": 3000000, "peRatio": 31.2}},
        "AAPL": {"quote": {"symbol": "AAPL", "latestPrice": 100.0, "marketCap": 2500000}}
    }"#;

    #[test]
    fn records_follow_chunk_order_not_response_order() {
        let response = parse_batch_response(BODY).unwrap();
        let records = extract_records(&tickers(&["AAPL", "MSFT"]), &response).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ticker.as_str(), "AAPL");
        assert_eq!(records[0].price, 100.0);
        assert_eq!(records[0].market_cap, 2_500_000.0);
        assert_eq!(records[1].ticker.as_str(), "MSFT");
        assert_eq!(records[1].price, 50.0);
    }

    #[test]
    fn absent_ticker_is_an_error_naming_it() {
        let response = parse_batch_response(BODY).unwrap();
        let err = extract_records(&tickers(&["AAPL", "XYZ", "MSFT"]), &response).unwrap_err();
        assert!(matches!(err, IndexError::MissingQuote { tickers } if tickers == ["XYZ"]));
    }

    #[test]
    fn null_price_is_not_zero_filled() {
        let body = r#"{"DELT": {"quote": {"latestPrice": null, "marketCap": 10}}}"#;
        let response = parse_batch_response(body).unwrap();
        let err = extract_records(&tickers(&["DELT"]), &response).unwrap_err();
        assert!(matches!(err, IndexError::MissingQuote { tickers } if tickers == ["DELT"]));
    }

    #[test]
    fn every_missing_ticker_of_the_chunk_is_named() {
        let body = r#"{
            "AAPL": {"quote": {"latestPrice": 100.0, "marketCap": 1}},
            "DELT": {"quote": {"latestPrice": 7.0, "marketCap": null}}
        }"#;
        let response = parse_batch_response(body).unwrap();
        let err = extract_records(&tickers(&["GONE", "AAPL", "DELT"]), &response).unwrap_err();

        assert!(matches!(&err, IndexError::MissingQuote { tickers } if *tickers == ["GONE", "DELT"]));
        assert_eq!(err.to_string(), "No quote data returned for tickers: GONE, DELT");
    }

    #[test]
    fn entry_without_quote_object_is_missing() {
        let response = parse_batch_response(r#"{"AAPL": {}}"#).unwrap();
        let err = extract_records(&tickers(&["AAPL"]), &response).unwrap_err();
        assert!(matches!(err, IndexError::MissingQuote { .. }));
    }

    #[test]
    fn non_positive_price_is_invalid() {
        let body = r#"{"AAPL": {"quote": {"latestPrice": 0, "marketCap": 10}}}"#;
        let response = parse_batch_response(body).unwrap();
        let err = extract_records(&tickers(&["AAPL"]), &response).unwrap_err();
        assert!(matches!(err, IndexError::InvalidQuote { .. }));
    }

    #[test]
    fn lookup_falls_back_to_case_insensitive_key() {
        let response = parse_batch_response(BODY).unwrap();
        let records = extract_records(&tickers(&["aapl"]), &response).unwrap();
        assert_eq!(records[0].ticker.as_str(), "aapl");
        assert_eq!(records[0].price, 100.0);
    }

    #[test]
    fn lookup_prefers_upper_case_key_over_other_spellings() {
        let body = r#"{
            "aapl": {"quote": {"latestPrice": 1.0, "marketCap": 1}},
            "AAPL": {"quote": {"latestPrice": 2.0, "marketCap": 1}},
            "Aapl ": {"quote": {"latestPrice": 3.0, "marketCap": 1}}
        }"#;
        let response = parse_batch_response(body).unwrap();
        let records = extract_records(&tickers(&["aAPL"]), &response).unwrap();
        assert_eq!(records[0].price, 2.0);
    }

    #[test]
    fn case_insensitive_fallback_is_deterministic() {
        let body = r#"{
            "bRk.b": {"quote": {"latestPrice": 1.0, "marketCap": 1}},
            "Brk.b": {"quote": {"latestPrice": 2.0, "marketCap": 1}}
        }"#;
        let response = parse_batch_response(body).unwrap();
        for _ in 0..8 {
            let records = extract_records(&tickers(&["brk.B"]), &response).unwrap();
            assert_eq!(records[0].price, 2.0);
        }
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            parse_batch_response("<html>bad gateway</html>"),
            Err(IndexError::SerdeJson(_))
        ));
    }
}
