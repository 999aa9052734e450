//! Quote service endpoint constants shared by the client and its tests.

/// Default base URL of the quote service (IEX Cloud sandbox).
pub const DEFAULT_BASE_URL: &str = "https://sandbox.iexapis.com/stable";
/// Path of the batch endpoint, relative to the base URL.
pub const BATCH_PATH: &str = "/stock/market/batch";
/// Data type requested from the batch endpoint.
pub const QUOTE_TYPE: &str = "quote";
/// Maximum number of symbols the service accepts in one batch request.
pub const DEFAULT_CHUNK_SIZE: usize = 100;
/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Join the base URL and the batch path, tolerating a trailing slash.
pub fn batch_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), BATCH_PATH)
}
