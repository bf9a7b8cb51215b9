use git2::Repository as Git2Repo;
use std::path::Path;

use crate::domain::sort_key;
use crate::error::{DockerTagsError, Result};
use crate::lookup::{LookupKind, TagSource, TagStream};

/// Tag source reading the tags of a local git repository
pub struct Git2Source {
    repo: Git2Repo,
}

impl Git2Source {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Source { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Source { repo }
    }
}

impl TagSource for Git2Source {
    fn repository(&self) -> String {
        let path = self.repo.workdir().unwrap_or_else(|| self.repo.path());
        path.display().to_string()
    }

    /// Local tags carry no creation order, so they are listed newest first
    /// by version instead.
    fn tags(&self, kind: LookupKind) -> Result<TagStream<'_>> {
        if kind == LookupKind::Releases {
            return Err(DockerTagsError::config(
                "releases only exist on the hosting service; use the github lookup",
            ));
        }

        let names = self.repo.tag_names(None)?;
        let mut tags: Vec<String> = names.iter().flatten().map(|s| s.to_string()).collect();
        tags.sort_by_cached_key(|tag| std::cmp::Reverse(sort_key(tag)));

        Ok(Box::new(tags.into_iter().map(Ok)))
    }
}
