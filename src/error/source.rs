use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// A history page failed after exhausting retries. Whether this
    /// surfaces or degrades to a partial history is decided by the
    /// pagination loop, not here.
    #[error("Failed to fetch history page for {wallet}: {reason}")]
    PageError { wallet: String, reason: String },

    #[error("Upstream returned an unexpected payload: {0}")]
    MalformedResponse(String),

    #[error("Transaction batch request failed: {0}")]
    BatchError(String),
}
