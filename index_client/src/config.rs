//! Fetch configuration threaded into the quote client at construction time.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use index_common::chunk::chunk_count;

use crate::args::Args;
use crate::error::ClientError;
use crate::retry::RetryPolicy;

/// Everything the batch fetcher needs to talk to the quote service.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL of the quote service, without the endpoint path.
    pub base_url: String,
    /// API token sent as the `token` query parameter.
    pub token: String,
    /// Maximum number of tickers per request.
    pub chunk_size: usize,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry policy applied to each batch.
    pub retry: RetryPolicy,
}

impl FetchConfig {
    /// Build the configuration from parsed arguments. The token comes from
    /// `--token` (or `IEX_CLOUD_API_TOKEN`), else from `--token-file`.
    pub fn from_args(args: &Args) -> Result<Self, ClientError> {
        let token = match (&args.token, &args.token_file) {
            (Some(token), _) => token.trim().to_string(),
            (None, Some(path)) => read_token_file(&normalize_path(path))?,
            (None, None) => {
                return Err(ClientError::Config(
                    "no API token: pass --token, set IEX_CLOUD_API_TOKEN, or use --token-file"
                        .to_string(),
                ));
            }
        };
        if token.is_empty() {
            return Err(ClientError::Config("API token is empty".to_string()));
        }

        // Rejects a zero chunk size before any request is built.
        chunk_count(0, args.chunk_size)?;

        Ok(Self {
            base_url: args.base_url.trim().to_string(),
            token,
            chunk_size: args.chunk_size,
            timeout: Duration::from_secs(args.timeout_secs),
            retry: if args.no_retry {
                RetryPolicy::no_retry()
            } else {
                RetryPolicy::default()
            },
        })
    }
}

fn read_token_file(path: &Path) -> Result<String, ClientError> {
    let content = fs::read_to_string(path).map_err(|e| {
        ClientError::Config(format!("cannot read token file {}: {e}", path.display()))
    })?;
    Ok(content.trim().to_string())
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
pub fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
