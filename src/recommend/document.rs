use serde::{Deserialize, Serialize};

/// What the engine needs from a corpus document: a stable identity and the
/// long-form text to index. Everything else about the document is opaque
/// and is handed back by reference inside each recommendation.
pub trait Document {
    fn id(&self) -> &str;
    fn long_text(&self) -> &str;
}

impl<D: Document + ?Sized> Document for &D {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn long_text(&self) -> &str {
        (**self).long_text()
    }
}

/// One call for papers, as handed over by whatever fetched and parsed it.
///
/// Only `id` and `long_desc` are read by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Call {
    pub id: String,
    /// conference or journal issuing the call
    pub source: String,
    pub source_link: String,
    pub updated: String,
    pub contact: String,
    pub contact_email: Option<String>,
    /// deadline as displayed, e.g. "Friday, March 1, 2024"
    pub deadline: String,
    pub description: String,
    pub long_desc: String,
    pub categories: Vec<String>,
}

impl Call {
    pub fn new(id: impl Into<String>, long_desc: impl Into<String>) -> Self {
        Self { id: id.into(), long_desc: long_desc.into(), ..Default::default() }
    }

    pub fn with_source(mut self, source: impl Into<String>, link: impl Into<String>) -> Self {
        self.source = source.into();
        self.source_link = link.into();
        self
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = deadline.into();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

impl Document for Call {
    fn id(&self) -> &str {
        &self.id
    }

    fn long_text(&self) -> &str {
        &self.long_desc
    }
}
