//! Single-stream HTTP GET into a temporary file beside the destination,
//! renamed over it once the transfer succeeded.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;

use super::{Fetch, FetchError};
use crate::config::FetchConfig;

/// libcurl-backed [`Fetch`]. One `Easy` handle per transfer; no retry, no resume.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    config: FetchConfig,
}

impl CurlFetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    fn transfer(&self, url: &str, file: &mut File) -> Result<u64, FetchError> {
        let mut written = 0u64;
        let mut write_err: Option<std::io::Error> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.config.connect_timeout())?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(Duration::from_secs(60))?;
        easy.timeout(self.config.timeout())?;
        if let Some(ua) = &self.config.user_agent {
            easy.useragent(ua)?;
        }

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            return Err(FetchError::Storage(e));
        }
        performed?;

        let code = easy.response_code()?;
        // Non-HTTP schemes (file://, ftp://) report 0 or their own codes on success.
        let is_http = url.starts_with("http://") || url.starts_with("https://");
        if is_http && !(200..300).contains(&code) {
            return Err(FetchError::Http { code });
        }
        file.flush()?;
        Ok(written)
    }
}

impl Fetch for CurlFetcher {
    /// An existing file at `dest` is only replaced by a complete transfer;
    /// on failure it is left as it was.
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        let dir = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut part = NamedTempFile::new_in(dir)?;
        // Dropping `part` on the error path deletes the partial download.
        let bytes = self.transfer(url, part.as_file_mut())?;
        part.persist(dest).map_err(|e| FetchError::Storage(e.error))?;
        tracing::debug!(url, dest = %dest.display(), bytes, "fetch complete");
        Ok(())
    }
}
