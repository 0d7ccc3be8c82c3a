//! Byte transfer: retrieve a URL and write it to a local path.
//!
//! The download loop only sees the [`Fetch`] trait; [`CurlFetcher`] is the
//! libcurl implementation used by the CLI. Any closure with the right shape
//! also works, which keeps the loop testable without a network.

mod error;
mod http;

pub use error::FetchError;
pub use http::CurlFetcher;

use std::path::Path;

pub trait Fetch {
    /// Fetch `url` into `dest`, creating or replacing it. Blocks until done.
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError>;
}

impl<F> Fetch for F
where
    F: Fn(&str, &Path) -> Result<(), FetchError>,
{
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        self(url, dest)
    }
}
