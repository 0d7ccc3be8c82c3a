//! Errors that abort a whole download run.

use std::path::PathBuf;
use thiserror::Error;

use crate::feed::FeedError;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("could not create output directory {}: {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Item `index` (1-based) is missing or duplicates a required field.
    #[error("feed item {index}: {source}")]
    Parse {
        index: usize,
        #[source]
        source: FeedError,
    },
}
