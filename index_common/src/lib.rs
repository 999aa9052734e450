//!
//! Common types and algorithms of the equal-weight index allocator.
//!
//! This crate aggregates:
//! - `error` — unified error type `IndexError` used across the workspace.
//! - `result` — handy `Result<T, IndexError>` alias.
//! - `tickers` — ticker symbols and loading the constituents file.
//! - `chunk` — splitting the ticker list into request-sized groups.
//! - `quote` — quote records and batch response decoding.
//! - `allocation` — equal-weight share counts.
//! - `report` — output columns, CSV export and table logging.
//! - `net` — quote service constants and small helpers.
#![warn(missing_docs)]
pub mod allocation;
pub mod chunk;
pub mod error;
pub mod net;
pub mod quote;
pub mod report;
pub mod result;
pub mod tickers;

pub use allocation::AllocationRecord;
pub use error::IndexError;
pub use quote::QuoteRecord;
pub use result::Result;
pub use tickers::Ticker;
