use serde::{Deserialize, Serialize};

/// One article returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Publication {
    title: String,
    author: String,
    section: String,
    url: String,
    date: String,
}

impl Publication {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        section: impl Into<String>,
        url: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            section: section.into(),
            url: url.into(),
            date: date.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// ISO-8601 publication timestamp, exactly as the API sent it.
    pub fn date(&self) -> &str {
        &self.date
    }
}

/// What to do when one element of `results` does not have the expected shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedItemPolicy {
    /// Stop at the first malformed item and keep what was extracted before it.
    #[default]
    Truncate,
    /// Drop the malformed item and keep going.
    Skip,
}
