//! Fetcher trait for retrieving the latest release descriptor

#[cfg(test)]
use mockall::automock;

use serde::Deserialize;

use crate::version::error::{FetchError, ParseError};

/// Remote metadata describing the latest published release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseDescriptor {
    pub tag_name: String,
}

/// Trait for fetching the latest release from a remote source
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseFetcher: Send + Sync {
    /// Fetches the raw body of the "latest release" endpoint
    ///
    /// This is a single attempt; callers do not retry.
    async fn fetch_latest_release(&self) -> Result<String, FetchError>;
}

/// Extract the release descriptor from a response body.
///
/// A missing, null or empty `tag_name` is reported as [`ParseError::MissingTag`].
pub fn parse_release(body: &str) -> Result<ReleaseDescriptor, ParseError> {
    #[derive(Deserialize)]
    struct RawRelease {
        tag_name: Option<String>,
    }

    let raw: RawRelease = serde_json::from_str(body)?;
    match raw.tag_name {
        Some(tag_name) if !tag_name.trim().is_empty() => Ok(ReleaseDescriptor {
            tag_name: tag_name.trim().to_string(),
        }),
        _ => Err(ParseError::MissingTag),
    }
}
