//! Equal-weight allocation of a portfolio value across quote records.
use crate::error::IndexError;
use crate::quote::QuoteRecord;
use crate::result::Result;

/// A quote record together with the number of shares to buy.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationRecord {
    /// Market data the allocation is based on.
    pub quote: QuoteRecord,
    /// Fractional share count; `shares_to_buy * price` is the position value.
    pub shares_to_buy: f64,
}

impl AllocationRecord {
    /// Dollar value of the position at the fetched price.
    pub fn position_value(&self) -> f64 {
        self.shares_to_buy * self.quote.price
    }
}

/// Split `portfolio_value` evenly across `records` and convert each leg into a
/// share count at the record's price:
///
/// `shares_to_buy = (portfolio_value / records.len()) / price`
///
/// No rounding or lot sizes are applied. The output keeps the input order.
/// Any finite value is accepted; positivity is checked where the value is
/// collected.
pub fn allocate(records: &[QuoteRecord], portfolio_value: f64) -> Result<Vec<AllocationRecord>> {
    if !portfolio_value.is_finite() {
        return Err(IndexError::InvalidArgument(format!(
            "portfolio value must be a finite number, got {portfolio_value}"
        )));
    }
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let position_size = portfolio_value / records.len() as f64;
    Ok(records
        .iter()
        .map(|quote| AllocationRecord {
            shares_to_buy: position_size / quote.price,
            quote: quote.clone(),
        })
        .collect())
}
