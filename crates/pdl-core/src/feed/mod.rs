//! Parsed syndication feed: a small element tree plus the unique-child lookup
//! used when turning `<item>` elements into episodes.
//!
//! The tree keeps element names as written (qualified, e.g. `itunes:title`),
//! so a lookup for `title` never matches a namespaced sibling.

mod error;
mod parse;
mod source;

pub use error::FeedError;
pub use parse::parse_feed;
pub use source::FeedSource;

/// One XML element with its attributes, trimmed text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Value of the attribute `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All descendants reached by a slash-separated path of child names
    /// (e.g. `channel/item`), in document order.
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        let mut current: Vec<&Element> = vec![self];
        for step in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|e| e.children.iter().filter(move |c| c.name == step))
                .collect();
        }
        current
    }

    /// See [`unique_child`].
    pub fn unique_child(&self, name: &str) -> Result<&Element, FeedError> {
        unique_child(self, name)
    }
}

/// Returns the only direct child of `scope` named `name`.
///
/// Fails with [`FeedError::ElementNotFound`] when there is none and with
/// [`FeedError::ElementNotUnique`] when there are several.
pub fn unique_child<'a>(scope: &'a Element, name: &str) -> Result<&'a Element, FeedError> {
    let mut matches = scope.children.iter().filter(|c| c.name == name);
    let first = matches.next().ok_or_else(|| FeedError::ElementNotFound {
        name: name.to_string(),
    })?;
    let extra = matches.count();
    if extra > 0 {
        return Err(FeedError::ElementNotUnique {
            name: name.to_string(),
            count: extra + 1,
        });
    }
    Ok(first)
}

/// A parsed feed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    root: Element,
}

impl Feed {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The `<item>` elements under `<channel>`, in document order.
    pub fn items(&self) -> Vec<&Element> {
        self.root.find_all("channel/item")
    }
}
