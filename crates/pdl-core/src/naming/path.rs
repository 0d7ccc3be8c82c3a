//! File name and extension derived from an enclosure URL.

/// The final `/`-separated segment of `url`, verbatim (query string included).
/// A URL ending in `/` yields an empty name.
pub fn file_name_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// The final `.`-separated segment of `file_name`. A name without a dot is
/// its own extension.
pub fn file_extension(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}
