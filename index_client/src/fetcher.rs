//! Fetching quotes from the quote service in batches.
//!
//! The ticker list is split into chunks of at most `chunk_size` symbols; every
//! chunk becomes one `GET /stock/market/batch?symbols=..&types=quote&token=..`
//! request. Chunks are fetched strictly one after another, so there is never
//! more than one request in flight.
//!
//! Each chunk produces a `BatchOutcome` carrying either the chunk's records or
//! the reason it failed. The outcomes are collected into a `FetchReport`, and
//! the caller decides whether a failed batch aborts the run or is left out.
use index_common::chunk::{chunk_count, chunks, join_symbols};
use index_common::net::{QUOTE_TYPE, batch_url};
use index_common::quote::{BatchResponse, extract_records, parse_batch_response};
use index_common::{QuoteRecord, Ticker};
use log::{debug, error, info, warn};
use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::config::FetchConfig;
use crate::error::ClientError;
use crate::retry::RetryPolicy;

/// Longest response body kept in a `ClientError::Status`.
const MAX_ERROR_BODY: usize = 256;

/// Source of batch quote responses.
pub trait QuoteSource {
    /// Request quotes for every ticker of `chunk` in one call.
    fn fetch_batch(&self, chunk: &[Ticker]) -> Result<BatchResponse, ClientError>;
}

/// Blocking HTTP client for an IEX Cloud compatible quote service.
pub struct IexClient {
    http: Client,
    url: String,
    token: String,
}

impl IexClient {
    /// Build a client with the configured base URL, token and request timeout.
    pub fn new(config: &FetchConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            url: batch_url(&config.base_url),
            token: config.token.clone(),
        })
    }
}

impl QuoteSource for IexClient {
    fn fetch_batch(&self, chunk: &[Ticker]) -> Result<BatchResponse, ClientError> {
        let symbols = join_symbols(chunk);
        debug!("GET {} ({} symbols)", self.url, chunk.len());

        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("symbols", symbols.as_str()),
                ("types", QUOTE_TYPE),
                ("token", self.token.as_str()),
            ])
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if status != StatusCode::OK {
            let body = text.chars().take(MAX_ERROR_BODY).collect();
            return Err(ClientError::Status { status, body });
        }
        Ok(parse_batch_response(&text)?)
    }
}

/// Result of fetching one chunk.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Position of the chunk in the ticker list, starting at zero.
    pub index: usize,
    /// Tickers requested in this chunk, in input order.
    pub tickers: Vec<Ticker>,
    /// Records of the chunk, or why the chunk failed.
    pub result: Result<Vec<QuoteRecord>, ClientError>,
}

impl BatchOutcome {
    /// Whether the chunk produced records.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of all chunks, in chunk order.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// One entry per chunk.
    pub batches: Vec<BatchOutcome>,
}

impl FetchReport {
    /// Number of chunks that failed.
    pub fn failed_count(&self) -> usize {
        self.batches.iter().filter(|b| !b.is_success()).count()
    }

    /// Collapse the report into records in input order.
    ///
    /// Without `allow_partial`, any failed chunk turns the whole report into
    /// `ClientError::BatchesFailed`. With it, failed chunks are left out and
    /// each excluded ticker is logged.
    pub fn into_records(self, allow_partial: bool) -> Result<Vec<QuoteRecord>, ClientError> {
        let total = self.batches.len();
        let failed = self.failed_count();

        if failed > 0 && !allow_partial {
            let first = self
                .batches
                .into_iter()
                .find_map(|b| b.result.err().map(|e| format!("batch {}: {e}", b.index)))
                .unwrap_or_default();
            return Err(ClientError::BatchesFailed {
                failed,
                total,
                first,
            });
        }

        let mut records = Vec::new();
        for batch in self.batches {
            match batch.result {
                Ok(batch_records) => records.extend(batch_records),
                Err(e) => {
                    warn!("Leaving out batch {} ({e})", batch.index);
                    for ticker in &batch.tickers {
                        warn!("Excluded ticker: {ticker}");
                    }
                }
            }
        }
        Ok(records)
    }
}

/// Drives a `QuoteSource` over the ticker list, one chunk at a time.
pub struct BatchFetcher<S> {
    source: S,
    chunk_size: usize,
    retry: RetryPolicy,
}

impl<S: QuoteSource> BatchFetcher<S> {
    /// Create a fetcher. A zero `chunk_size` is rejected.
    pub fn new(source: S, chunk_size: usize, retry: RetryPolicy) -> Result<Self, ClientError> {
        chunk_count(0, chunk_size)?;
        Ok(Self {
            source,
            chunk_size,
            retry,
        })
    }

    /// Fetch every chunk of `tickers`. Never stops early: a failed chunk is
    /// recorded in the report and the next chunk is fetched.
    pub fn fetch(&self, tickers: &[Ticker]) -> Result<FetchReport, ClientError> {
        let mut report = FetchReport::default();

        for (index, chunk) in chunks(tickers, self.chunk_size)?.enumerate() {
            let operation_name = format!("batch {index}");
            let result = self
                .retry
                .execute(&operation_name, || self.source.fetch_batch(chunk))
                .and_then(|response| extract_records(chunk, &response).map_err(ClientError::from));

            match &result {
                Ok(records) => info!("Batch {index}: {} quotes received", records.len()),
                Err(e) => error!("Batch {index} failed: {e}"),
            }
            report.batches.push(BatchOutcome {
                index,
                tickers: chunk.to_vec(),
                result,
            });
        }
        Ok(report)
    }
}
