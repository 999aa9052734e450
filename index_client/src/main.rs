//! Index Client — builds an equal-weight version of a stock index. It reads the
//! index constituents from a file, fetches their quotes from an IEX Cloud
//! compatible service in batches of at most `--chunk-size` tickers, splits the
//! portfolio value evenly across all constituents, and writes the number of
//! shares to buy for each one to a spreadsheet.
//!
//! Usage example (CLI):
//! ```bash
//! IEX_CLOUD_API_TOKEN=Tpk_xxx index_client --tickers ./sp_500_stocks.csv --output trades.xlsx
//! ```
//!
//! The portfolio value is asked for on stdin unless `--portfolio-value` is given.
#![warn(missing_docs)]
mod args;
mod config;
mod error;
mod fetcher;
mod prompt;
mod retry;
mod spreadsheet;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use index_common::allocation::allocate;
use index_common::chunk::chunk_count;
use index_common::report::log_table;
use index_common::tickers::load_tickers;
use log::{error, info};

use crate::args::Args;
use crate::config::{FetchConfig, normalize_path};
use crate::error::ClientError;
use crate::fetcher::{BatchFetcher, IexClient};
use crate::prompt::{parse_portfolio_value, prompt_portfolio_value};
use crate::spreadsheet::write_output;

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ClientError> {
    let config = FetchConfig::from_args(args)?;

    let tickers = load_tickers(&normalize_path(&args.tickers))?;
    info!(
        "Loaded {} tickers; {} batch requests of up to {}",
        tickers.len(),
        chunk_count(tickers.len(), config.chunk_size)?,
        config.chunk_size
    );

    let client = IexClient::new(&config)?;
    let fetcher = BatchFetcher::new(client, config.chunk_size, config.retry.clone())?;
    let records = fetcher.fetch(&tickers)?.into_records(args.allow_partial)?;

    let portfolio_value = read_portfolio_value(args)?;
    let table = allocate(&records, portfolio_value)?;
    log_table(&table);
    write_output(&normalize_path(&args.output), &table)
}

/// `--portfolio-value` when given, otherwise the interactive prompt.
fn read_portfolio_value(args: &Args) -> Result<f64, ClientError> {
    match &args.portfolio_value {
        Some(raw) => parse_portfolio_value(raw).ok_or_else(|| {
            ClientError::Config(format!(
                "--portfolio-value must be a positive number, got {raw:?}"
            ))
        }),
        None => prompt_portfolio_value(io::stdin().lock(), io::stdout()),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
