//! Record source port.
//!
//! A source fetches the raw body of one feed. Interpretation of the body
//! belongs to the parser, so sources stay transport-only.

use async_trait::async_trait;

use crate::domain::Feed;
use crate::error::FeedError;

/// Fetches raw feed responses.
///
/// Implementations must bound every request with a timeout; a hung feed
/// otherwise stalls the whole poll cycle.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the raw response body of `feed`.
    ///
    /// Transport failures and non-success statuses map to
    /// [`FeedError::Unreachable`].
    async fn fetch(&self, feed: &Feed) -> Result<String, FeedError>;
}
