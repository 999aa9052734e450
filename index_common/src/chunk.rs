//! Splitting the ticker universe into request-sized groups.
use std::slice::Chunks;

use crate::error::IndexError;
use crate::result::Result;
use crate::tickers::Ticker;

/// Split `items` into contiguous groups of `size` elements, preserving order.
/// The last group may be shorter. Empty input yields no groups.
///
/// A `size` of zero is rejected with `IndexError::InvalidArgument`.
pub fn chunks<T>(items: &[T], size: usize) -> Result<Chunks<'_, T>> {
    if size == 0 {
        return Err(IndexError::InvalidArgument(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    Ok(items.chunks(size))
}

/// Join one group of tickers into the comma-delimited key list sent to the
/// quote service.
pub fn join_symbols(chunk: &[Ticker]) -> String {
    chunk
        .iter()
        .map(Ticker::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Number of groups `chunks` produces for `len` items.
pub fn chunk_count(len: usize, size: usize) -> Result<usize> {
    if size == 0 {
        return Err(IndexError::InvalidArgument(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    Ok(len.div_ceil(size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_size_is_invalid_argument() {
        let items = [1, 2, 3];
        assert!(matches!(chunks(&items, 0), Err(IndexError::InvalidArgument(_))));
        assert!(matches!(chunk_count(3, 0), Err(IndexError::InvalidArgument(_))));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let items: [u8; 0] = [];
        assert_eq!(chunks(&items, 100).unwrap().count(), 0);
    }

    #[test]
    fn last_group_is_short() {
        let items: Vec<u32> = (0..250).collect();
        let sizes: Vec<usize> = chunks(&items, 100).unwrap().map(<[u32]>::len).collect();
        assert_eq!(sizes, [100, 100, 50]);
    }

    #[test]
    fn join_symbols_uses_commas() {
        let group: Vec<Ticker> = ["AAPL", "MSFT", "BRK.B"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(join_symbols(&group), "AAPL,MSFT,BRK.B");
        assert_eq!(join_symbols(&[]), "");
    }

    proptest! {
        #[test]
        fn groups_cover_input_in_order(
            items in proptest::collection::vec(any::<u16>(), 0..500),
            size in 1usize..120,
        ) {
            let groups: Vec<&[u16]> = chunks(&items, size).unwrap().collect();

            prop_assert_eq!(groups.len(), items.len().div_ceil(size));
            prop_assert_eq!(groups.len(), chunk_count(items.len(), size).unwrap());
            if let Some((last, full)) = groups.split_last() {
                prop_assert!(full.iter().all(|g| g.len() == size));
                prop_assert!(!last.is_empty() && last.len() <= size);
            }
            let rejoined: Vec<u16> = groups.concat();
            prop_assert_eq!(rejoined, items);
        }
    }
}
