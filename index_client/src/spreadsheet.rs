//! Writing the recommended trades to disk.
//!
//! Excel output has a single `Recommended Trades` sheet: a header row and one
//! row per allocation, every column 18 wide, the price and market cap in
//! dollars and the share count to two decimals. The creation time stored in
//! the workbook is fixed, so the same table always produces the same bytes.
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use index_common::AllocationRecord;
use index_common::report::{Column, write_csv};
use log::info;
use rust_xlsxwriter::{
    Color, DocProperties, ExcelDateTime, Format, FormatBorder, Workbook, XlsxError,
};

use crate::error::ClientError;

/// Name of the only worksheet.
pub const SHEET_NAME: &str = "Recommended Trades";
const COLUMN_WIDTH: u16 = 18;
const FONT_COLOR: u32 = 0x071F60;
const BACKGROUND_COLOR: u32 = 0xE1EBAF;

/// Write `table` to `path`: CSV when the extension is `.csv`, otherwise an
/// Excel workbook.
pub fn write_output(path: &Path, table: &[AllocationRecord]) -> Result<(), ClientError> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        let file = File::create(path)?;
        write_csv(BufWriter::new(file), table)?;
    } else {
        build_workbook(table)?.save(path)?;
    }
    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Build the workbook in memory.
pub fn build_workbook(table: &[AllocationRecord]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let string_format = Format::new()
        .set_font_color(Color::RGB(FONT_COLOR))
        .set_background_color(Color::RGB(BACKGROUND_COLOR))
        .set_border(FormatBorder::Thin);
    let dollar_format = string_format.clone().set_num_format("$0.00");
    let number_format = string_format.clone().set_num_format("0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let columns = [
        (Column::Ticker, &string_format),
        (Column::StockPrice, &dollar_format),
        (Column::MarketCapitalization, &dollar_format),
        (Column::SharesToBuy, &number_format),
    ];
    for (col, (column, format)) in (0u16..).zip(columns) {
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
        worksheet.set_column_format(col, format)?;
        worksheet.write_string_with_format(0, col, column.to_string(), format)?;
    }

    for (row, record) in (1u32..).zip(table) {
        worksheet.write_string_with_format(row, 0, record.quote.ticker.as_str(), &string_format)?;
        worksheet.write_number_with_format(row, 1, record.quote.price, &dollar_format)?;
        worksheet.write_number_with_format(row, 2, record.quote.market_cap, &dollar_format)?;
        worksheet.write_number_with_format(row, 3, record.shares_to_buy, &number_format)?;
    }

    Ok(workbook)
}
