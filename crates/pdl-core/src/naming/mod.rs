//! On-disk file names for episodes.

mod path;
mod sanitize;

pub use path::{file_extension, file_name_from_url};
pub use sanitize::{sanitize, ILLEGAL_CHARS};

use crate::episode::Episode;

/// Decides the file name an episode is saved under.
///
/// With `rename`, the name is the sanitized title plus the sanitized
/// extension of the enclosure (`"{title}.{ext}"`); otherwise it is the
/// sanitized final segment of the enclosure URL.
pub fn resolve_file_name(episode: &Episode, rename: bool) -> String {
    if rename {
        format!(
            "{}.{}",
            sanitize(episode.title(), ""),
            sanitize(episode.file_extension(), "")
        )
    } else {
        sanitize(episode.file_name(), "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str, url: &str) -> Episode {
        Episode::new("guid-1", title, "Mon, 01 Jan 2024 00:00:00 GMT", url)
    }

    #[test]
    fn rename_uses_sanitized_title_and_extension() {
        let ep = episode("Ep/1: Intro?", "https://example.com/media/a1b2.mp3");
        assert_eq!(resolve_file_name(&ep, true), "Ep1 Intro.mp3");
    }

    #[test]
    fn keep_uses_sanitized_url_file_name() {
        let ep = episode("Ignored", "https://example.com/media/ep:01.mp3");
        assert_eq!(resolve_file_name(&ep, false), "ep01.mp3");
    }

    #[test]
    fn query_string_survives_without_illegal_chars() {
        let ep = episode("t", "https://example.com/ep.mp3?a=1");
        assert_eq!(resolve_file_name(&ep, false), "ep.mp3a=1");
        assert_eq!(resolve_file_name(&ep, true), "t.mp3a=1");
    }

    #[test]
    fn empty_title_gives_empty_stem() {
        let ep = episode("", "https://example.com/ep.ogg");
        assert_eq!(resolve_file_name(&ep, true), ".ogg");
    }

    #[test]
    fn deterministic() {
        let ep = episode("Same: Title", "https://example.com/x.m4a");
        for rename in [true, false] {
            assert_eq!(resolve_file_name(&ep, rename), resolve_file_name(&ep, rename));
        }
    }
}
