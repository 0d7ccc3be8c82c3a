//! Errors raised while loading a feed or reading fields out of its items.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("could not find the <{name}> element")]
    ElementNotFound { name: String },

    #[error("there is more than one <{name}> element ({count} found)")]
    ElementNotUnique { name: String, count: usize },

    #[error("the <{element}> element has no `{attribute}` attribute")]
    MissingAttribute { element: String, attribute: String },

    #[error("malformed feed XML: {0}")]
    Xml(String),
}
