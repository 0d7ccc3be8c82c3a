//! `pdl list` – show the episodes of a feed and their target file names.

use anyhow::{Context, Result};
use pdl_core::config::PdlConfig;
use pdl_core::episode::Episode;
use pdl_core::feed::{Element, FeedSource};
use pdl_core::naming::resolve_file_name;

use super::files_in_total;

/// One line per episode: position, publish date, title and file name.
pub(crate) fn listing(items: &[&Element], rename: bool) -> Result<Vec<String>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let episode =
                Episode::from_item(item).with_context(|| format!("feed item {}", i + 1))?;
            Ok(format!(
                "{:>4}  {}  {}  -> {}",
                i + 1,
                episode.publish_date(),
                episode.title(),
                resolve_file_name(&episode, rename)
            ))
        })
        .collect()
}

pub fn run_list(cfg: &PdlConfig, source: &FeedSource, rename: bool) -> Result<()> {
    let feed = source.load(&cfg.fetch_config())?;
    let items = feed.items();
    println!("{}", files_in_total(items.len()));
    for line in listing(&items, rename)? {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdl_core::feed::parse_feed;

    const FEED: &str = r#"<rss><channel>
        <item><guid>1</guid><title>Ep/1: Intro?</title><pubDate>Mon, 01 Jan 2024</pubDate><enclosure url="https://e.com/x/a1.mp3"/></item>
        <item><guid>2</guid><title>Two</title><pubDate>Tue, 02 Jan 2024</pubDate><enclosure url="https://e.com/x/b2.ogg"/></item>
    </channel></rss>"#;

    #[test]
    fn listing_shows_target_names() {
        let feed = parse_feed(FEED.as_bytes()).unwrap();
        let lines = listing(&feed.items(), true).unwrap();
        assert_eq!(
            lines,
            vec![
                "   1  Mon, 01 Jan 2024  Ep/1: Intro?  -> Ep1 Intro.mp3",
                "   2  Tue, 02 Jan 2024  Two  -> Two.ogg",
            ]
        );
        let lines = listing(&feed.items(), false).unwrap();
        assert!(lines[1].ends_with("-> b2.ogg"));
    }

    #[test]
    fn listing_fails_on_bad_item() {
        let feed = parse_feed(b"<rss><channel><item><title>x</title></item></channel></rss>").unwrap();
        let err = listing(&feed.items(), false).unwrap_err();
        assert!(format!("{:#}", err).contains("could not find the <guid> element"));
    }

    #[test]
    fn total_line_pluralizes() {
        assert_eq!(files_in_total(0), "0 files in total.");
        assert_eq!(files_in_total(1), "1 file in total.");
        assert_eq!(files_in_total(12), "12 files in total.");
    }
}
