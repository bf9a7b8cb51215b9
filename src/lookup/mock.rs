use crate::error::{DockerTagsError, Result};
use crate::lookup::{LookupKind, TagSource, TagStream};

/// In-memory tag source for testing without network or git access
pub struct MockSource {
    repository: String,
    tags: Vec<String>,
    releases: Vec<String>,
    failure: Option<(usize, String)>,
}

impl MockSource {
    /// Create an empty source named `repository`
    pub fn new(repository: impl Into<String>) -> Self {
        MockSource {
            repository: repository.into(),
            tags: Vec::new(),
            releases: Vec::new(),
            failure: None,
        }
    }

    /// Tags listed in the given order
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Release tag names listed in the given order
    pub fn with_releases<I, S>(mut self, releases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.releases = releases.into_iter().map(Into::into).collect();
        self
    }

    /// Yield an error after `count` items, like a failed page fetch
    pub fn failing_after(mut self, count: usize, message: impl Into<String>) -> Self {
        self.failure = Some((count, message.into()));
        self
    }
}

impl TagSource for MockSource {
    fn repository(&self) -> String {
        self.repository.clone()
    }

    fn tags(&self, kind: LookupKind) -> Result<TagStream<'_>> {
        let items = match kind {
            LookupKind::Tags => &self.tags,
            LookupKind::Releases => &self.releases,
        };

        let listed = items.iter().cloned().map(Ok);
        match &self.failure {
            Some((count, message)) => {
                let message = message.clone();
                let failing = std::iter::once_with(move || Err(DockerTagsError::remote(message)));
                Ok(Box::new(listed.take(*count).chain(failing)))
            }
            None => Ok(Box::new(listed)),
        }
    }
}
