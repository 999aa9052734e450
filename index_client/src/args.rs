//! Command-line arguments for the index client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use index_common::net::{DEFAULT_BASE_URL, DEFAULT_CHUNK_SIZE, DEFAULT_TIMEOUT_SECS};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the index constituents. A `.csv` file needs a `Ticker` column;
    /// any other file is read as one ticker per line.
    #[clap(long, default_value = "sp_500_stocks.csv")]
    pub tickers: String,

    /// Output path. `.csv` writes CSV, anything else an Excel workbook.
    #[clap(long, default_value = "recommended_trades.xlsx")]
    pub output: String,

    /// API token for the quote service.
    #[clap(long, env = "IEX_CLOUD_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// File holding the API token, used when `--token` is not given.
    #[clap(long)]
    pub token_file: Option<String>,

    /// Base URL of the quote service.
    #[clap(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Maximum number of tickers per batch request.
    #[clap(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Per-request timeout in seconds.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Portfolio value to allocate. Prompted for when absent.
    #[clap(long)]
    pub portfolio_value: Option<String>,

    /// Do not retry batch requests that fail with a transient error.
    #[clap(long)]
    pub no_retry: bool,

    /// Continue with the successfully fetched batches when some batches fail.
    #[clap(long)]
    pub allow_partial: bool,
}
