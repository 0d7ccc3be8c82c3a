//! A podcast episode read from one feed `<item>`.

use crate::feed::{unique_child, Element, FeedError};
use crate::naming::{file_extension, file_name_from_url};

/// Immutable episode record. The file name and extension are derived from
/// the enclosure URL on every call and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    guid: String,
    title: String,
    publish_date: String,
    source_url: String,
}

impl Episode {
    pub fn new(
        guid: impl Into<String>,
        title: impl Into<String>,
        publish_date: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            guid: guid.into(),
            title: title.into(),
            publish_date: publish_date.into(),
            source_url: source_url.into(),
        }
    }

    /// Reads an `<item>` element:
    ///
    /// ```xml
    /// <item>
    ///   <guid>1234</guid>
    ///   <title>Episode Title</title>
    ///   <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
    ///   <enclosure url="https://example.com/episode.mp3" type="audio/mpeg" />
    /// </item>
    /// ```
    ///
    /// `guid`, `title`, `pubDate` and `enclosure` must each appear exactly once;
    /// the enclosure must carry a `url` attribute. Lookup errors are returned
    /// unchanged.
    pub fn from_item(item: &Element) -> Result<Self, FeedError> {
        let guid = unique_child(item, "guid")?;
        let title = unique_child(item, "title")?;
        let publish_date = unique_child(item, "pubDate")?;
        let enclosure = unique_child(item, "enclosure")?;
        let url = enclosure
            .attr("url")
            .ok_or_else(|| FeedError::MissingAttribute {
                element: "enclosure".to_string(),
                attribute: "url".to_string(),
            })?;

        Ok(Self::new(
            guid.text.as_str(),
            title.text.as_str(),
            publish_date.text.as_str(),
            url,
        ))
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Publish date exactly as written in the feed.
    pub fn publish_date(&self) -> &str {
        &self.publish_date
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Final path segment of the source URL.
    pub fn file_name(&self) -> &str {
        file_name_from_url(&self.source_url)
    }

    /// Final dot segment of [`Episode::file_name`].
    pub fn file_extension(&self) -> &str {
        file_extension(self.file_name())
    }
}
