//! Layout of the recommended-trades table and its CSV export.
//!
//! The same four columns are used by the spreadsheet writer in the client and
//! by the CSV export here, so both outputs share one header definition.
use std::io::Write;

use log::info;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::allocation::AllocationRecord;
use crate::result::Result;

/// Columns of the recommended-trades table, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Column {
    /// Symbol of the constituent.
    #[strum(serialize = "Ticker")]
    Ticker,
    /// Fetched price.
    #[strum(serialize = "Stock Price")]
    StockPrice,
    /// Fetched market capitalization.
    #[strum(serialize = "Market Capitalization")]
    MarketCapitalization,
    /// Allocated share count.
    #[strum(serialize = "Number of Shares to Buy")]
    SharesToBuy,
}

impl Column {
    /// Header labels of all columns, in output order.
    pub fn headers() -> Vec<String> {
        Column::iter().map(|c| c.to_string()).collect()
    }
}

/// Write `table` as CSV: one header row, then one row per record with
/// numbers rendered to two decimals.
pub fn write_csv<W: Write>(writer: W, table: &[AllocationRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(Column::headers())?;
    for record in table {
        csv_writer.write_record([
            record.quote.ticker.to_string(),
            format!("{:.2}", record.quote.price),
            format!("{:.2}", record.quote.market_cap),
            format!("{:.2}", record.shares_to_buy),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Log the table row by row.
pub fn log_table(table: &[AllocationRecord]) {
    info!("{}", Column::headers().join(" | "));
    for record in table {
        info!(
            "{} | ${:.2} | ${:.2} | {:.2}",
            record.quote.ticker, record.quote.price, record.quote.market_cap, record.shares_to_buy
        );
    }
}
