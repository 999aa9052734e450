//! Error types shared by the library and the client binary.
//!
//! The `IndexError` enum unifies the failure cases of loading tickers, parsing
//! batch responses, and computing allocations, allowing the crates to propagate
//! a single error type.
use std::io;

use thiserror::Error;

/// Unified error type for the index pipeline.
#[derive(Error, Debug)]
pub enum IndexError {
    /// I/O error originating from the standard library or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error while parsing the ticker file into `Ticker` values.
    #[error("Parse tickers file error: {0}")]
    ParseTickersFile(String),

    /// Failure while reading or writing CSV data.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A caller passed an argument outside the operation's contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The same ticker appears more than once in the input list.
    #[error("Duplicate ticker in input: {0}")]
    DuplicateTicker(String),

    /// Requested tickers with no usable quote in the batch response.
    #[error("No quote data returned for tickers: {}", tickers.join(", "))]
    MissingQuote {
        /// Tickers that were requested but not answered, in request order.
        tickers: Vec<String>,
    },

    /// A quote was returned but its values are unusable.
    #[error("Invalid quote for ticker {ticker}: {reason}")]
    InvalidQuote {
        /// Ticker the quote belongs to.
        ticker: String,
        /// What is wrong with the values.
        reason: String,
    },
}
