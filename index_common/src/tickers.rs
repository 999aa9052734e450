//! Ticker symbols and helpers for loading them from the index constituents file.
//!
//! A `Ticker` is an opaque symbol string. The `TickerParser` trait reads an
//! ordered list of tickers either from a CSV file with a `Ticker` column or
//! from a plain list with one symbol per line.
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::Deserialize;

use crate::error::IndexError;
use crate::result::Result;

/// Name of the column holding the symbols in the constituents CSV.
pub const TICKER_COLUMN: &str = "Ticker";

/// Symbol of a tradeable security.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    /// Borrow the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = IndexError;

    /// Trims the input; rejects empty symbols and symbols containing a comma
    /// or whitespace, since they are joined into a comma-delimited list.
    fn from_str(s: &str) -> Result<Self> {
        let symbol = s.trim();
        if symbol.is_empty() {
            return Err(IndexError::ParseTickersFile("empty ticker".to_string()));
        }
        if symbol.chars().any(|c| c == ',' || c.is_whitespace()) {
            return Err(IndexError::ParseTickersFile(format!(
                "ticker {symbol:?} contains a comma or whitespace"
            )));
        }
        Ok(Ticker(symbol.to_string()))
    }
}

/// Trait providing file parsing for tickers.
pub trait TickerParser: Sized {
    /// Parses tickers from a buffered reader, one symbol per non-empty line.
    fn parse_from_lines<R: BufRead>(reader: R) -> Result<Vec<Self>>;

    /// Parses tickers from CSV data with a header row containing a `Ticker` column.
    /// Other columns are ignored.
    fn parse_from_csv<R: Read>(reader: R) -> Result<Vec<Self>>;
}

#[derive(Debug, Deserialize)]
struct TickerRow {
    #[serde(rename = "Ticker")]
    ticker: String,
}

impl TickerParser for Ticker {
    fn parse_from_lines<R: BufRead>(reader: R) -> Result<Vec<Self>> {
        let mut tickers = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(IndexError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                continue;
            }
            tickers.push(trimmed_line.parse::<Self>()?);
        }
        ensure_unique(&tickers)?;
        Ok(tickers)
    }

    fn parse_from_csv<R: Read>(reader: R) -> Result<Vec<Self>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if !headers.is_empty() && !headers.iter().any(|h| h == TICKER_COLUMN) {
            return Err(IndexError::ParseTickersFile(format!(
                "missing `{TICKER_COLUMN}` column, found: {}",
                headers.iter().collect::<Vec<_>>().join(", ")
            )));
        }

        let mut tickers = Vec::new();
        for row in csv_reader.deserialize::<TickerRow>() {
            let row = row?;
            tickers.push(row.ticker.parse::<Self>()?);
        }
        ensure_unique(&tickers)?;
        Ok(tickers)
    }
}

/// Load tickers from `path`. Files with a `.csv` extension are read as CSV,
/// anything else as a plain list with one symbol per line.
pub fn load_tickers(path: &Path) -> Result<Vec<Ticker>> {
    let file = File::open(path)?;
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    debug!("Reading tickers from {} (csv: {})", path.display(), is_csv);

    if is_csv {
        Ticker::parse_from_csv(file)
    } else {
        Ticker::parse_from_lines(BufReader::new(file))
    }
}

fn ensure_unique(tickers: &[Ticker]) -> Result<()> {
    let mut seen = HashSet::with_capacity(tickers.len());
    for ticker in tickers {
        if !seen.insert(ticker) {
            return Err(IndexError::DuplicateTicker(ticker.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn symbols(tickers: &[Ticker]) -> Vec<&str> {
        tickers.iter().map(Ticker::as_str).collect()
    }

    #[test]
    fn parses_csv_in_file_order_and_ignores_other_columns() {
        let data = "Ticker,Name\nMMM,3M\nAOS,A. O. Smith\nABT,Abbott\n";
        let tickers = Ticker::parse_from_csv(Cursor::new(data)).unwrap();
        assert_eq!(symbols(&tickers), ["MMM", "AOS", "ABT"]);
    }

    #[test]
    fn empty_csv_and_header_only_csv_yield_no_tickers() {
        assert!(Ticker::parse_from_csv(Cursor::new("")).unwrap().is_empty());
        assert!(Ticker::parse_from_csv(Cursor::new("Ticker\n")).unwrap().is_empty());
    }

    #[test]
    fn csv_without_ticker_column_is_rejected() {
        let err = Ticker::parse_from_csv(Cursor::new("Symbol\nAAPL\n")).unwrap_err();
        assert!(matches!(err, IndexError::ParseTickersFile(_)));
    }

    #[test]
    fn duplicate_tickers_are_rejected() {
        let err = Ticker::parse_from_lines(Cursor::new("AAPL\nMSFT\nAAPL\n")).unwrap_err();
        assert!(matches!(err, IndexError::DuplicateTicker(t) if t == "AAPL"));
    }

    #[test]
    fn line_list_skips_blank_lines_and_trims() {
        let tickers = Ticker::parse_from_lines(Cursor::new("  AAPL \n\n MSFT\n")).unwrap();
        assert_eq!(symbols(&tickers), ["AAPL", "MSFT"]);
    }

    #[test]
    fn ticker_with_comma_is_rejected() {
        assert!("BRK,B".parse::<Ticker>().is_err());
        assert!("   ".parse::<Ticker>().is_err());
        assert_eq!("BRK.B".parse::<Ticker>().unwrap().as_str(), "BRK.B");
    }

    #[test]
    fn load_tickers_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("sp_500_stocks.csv");
        let mut csv_file = File::create(&csv_path).unwrap();
        writeln!(csv_file, "Ticker\nAAPL\nMSFT").unwrap();

        let txt_path = dir.path().join("tickers.txt");
        let mut txt_file = File::create(&txt_path).unwrap();
        writeln!(txt_file, "GOOGL\nAMZN").unwrap();

        assert_eq!(symbols(&load_tickers(&csv_path).unwrap()), ["AAPL", "MSFT"]);
        assert_eq!(symbols(&load_tickers(&txt_path).unwrap()), ["GOOGL", "AMZN"]);
    }

    #[test]
    fn load_tickers_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tickers(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, IndexError::Io(_)));
    }
}
