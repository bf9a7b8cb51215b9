//! Latest-tag lookup over remote or local tag listings
//!
//! The [TagSource] trait abstracts where existing tags come from so the
//! lookup logic can run against the GitHub API, a local clone, or an
//! in-memory list in tests.
//!
//! - [github::GithubSource]: GitHub REST API, paginated lazily
//! - [repository::Git2Source]: tags of a local repository via `git2`
//! - [mock::MockSource]: fixed lists for testing

pub mod github;
pub mod mock;
pub mod repository;

pub use github::{GithubConfig, GithubSource};
pub use mock::MockSource;
pub use repository::Git2Source;

use std::fmt;

use crate::domain::max_tag;
use crate::error::{DockerTagsError, Result};

/// Which listing a lookup scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Every tag in the repository
    Tags,
    /// Only tags attached to published releases
    Releases,
}

impl LookupKind {
    pub fn from_releases_only(releases_only: bool) -> Self {
        if releases_only {
            LookupKind::Releases
        } else {
            LookupKind::Tags
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Tags => write!(f, "tags"),
            LookupKind::Releases => write!(f, "releases"),
        }
    }
}

/// Lazy stream of tag names; errors end the lookup
pub type TagStream<'a> = Box<dyn Iterator<Item = Result<String>> + 'a>;

/// A place existing tags can be listed from
///
/// ## Ordering
///
/// Implementations should yield the most recent tag first when the backend
/// has a notion of recency; [find_latest_tag] relies on this when sorting is
/// disabled.
///
/// ## Laziness
///
/// Each call to [TagSource::tags] starts a fresh listing. Backends that page
/// should only fetch the next page once the previous one is consumed.
pub trait TagSource {
    /// Human readable name of the repository, used in error messages
    fn repository(&self) -> String;

    /// List tag names of the given kind
    ///
    /// # Returns
    /// * `Ok(TagStream)` - Stream of tag names, each item may fail individually
    /// * `Err` - If the listing cannot be started (e.g. kind not supported)
    fn tags(&self, kind: LookupKind) -> Result<TagStream<'_>>;
}

/// Finds the latest tag starting with `prefix`.
///
/// With `sort` disabled the first matching item is taken, trusting the
/// source's newest-first order. With `sort` enabled the whole listing is
/// drained and the maximum under [crate::domain::cmp_tags] wins.
///
/// # Returns
/// * `Ok(String)` - The latest matching tag
/// * `Err(DockerTagsError::NoCandidate)` - If nothing matched
/// * `Err` - Any error raised by the source while listing
pub fn find_latest_tag<S: TagSource + ?Sized>(
    source: &S,
    prefix: &str,
    kind: LookupKind,
    sort: bool,
) -> Result<String> {
    let mut candidates = Vec::new();

    for item in source.tags(kind)? {
        let tag = item?;
        if !tag.starts_with(prefix) {
            continue;
        }
        if !sort {
            tracing::debug!(%tag, "taking first matching item");
            return Ok(tag);
        }
        candidates.push(tag);
    }

    tracing::debug!(count = candidates.len(), %kind, "collected candidates");
    max_tag(candidates)
        .ok_or_else(|| DockerTagsError::no_candidate(source.repository(), kind, prefix))
}
