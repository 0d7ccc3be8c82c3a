//! Transfer error; its `Display` text is what ends up in a failed outcome.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (bad URL, timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Server answered with a non-2xx status.
    #[error("HTTP {code}")]
    Http { code: u32 },
    /// Creating or writing the destination file failed.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
    /// Anything else, with a ready-made message.
    #[error("{0}")]
    Other(String),
}
