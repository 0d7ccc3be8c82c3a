//! Where a feed comes from: a remote URL or a local file.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use super::{parse_feed, Feed};
use crate::config::FetchConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Remote(String),
    Local(PathBuf),
}

impl FeedSource {
    /// Treats `input` as remote when it parses as an http, https or ftp URL,
    /// and as a local path otherwise.
    pub fn detect(input: &str) -> Self {
        match url::Url::parse(input) {
            Ok(u) if matches!(u.scheme(), "http" | "https" | "ftp") => {
                FeedSource::Remote(input.to_string())
            }
            _ => FeedSource::Local(PathBuf::from(input)),
        }
    }

    /// Reads the raw document bytes.
    pub fn read(&self, fetch: &FetchConfig) -> Result<Vec<u8>> {
        match self {
            FeedSource::Local(path) => {
                fs::read(path).with_context(|| format!("read feed {}", path.display()))
            }
            FeedSource::Remote(url) => fetch_document(url, fetch),
        }
    }

    /// Reads and parses the feed.
    pub fn load(&self, fetch: &FetchConfig) -> Result<Feed> {
        let bytes = self.read(fetch)?;
        let feed = parse_feed(&bytes).with_context(|| format!("parse feed {}", self))?;
        tracing::debug!(source = %self, items = feed.items().len(), "feed loaded");
        Ok(feed)
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Remote(url) => write!(f, "{}", url),
            FeedSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// GET the whole document into memory.
fn fetch_document(url: &str, cfg: &FetchConfig) -> Result<Vec<u8>> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(cfg.connect_timeout())?;
    easy.timeout(cfg.timeout())?;
    if let Some(ua) = &cfg.user_agent {
        easy.useragent(ua)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("GET {} failed", url))?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }
    Ok(body)
}
