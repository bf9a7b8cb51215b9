use crate::error::{DockerTagsError, Result};

/// The ref a CI run was triggered for, e.g. `refs/tags/v1.2.3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRef {
    /// Second-to-last path segment (`tags`, `heads`, ...)
    pub kind: String,
    /// Last path segment, the tag or branch name to build
    pub name: String,
}

impl GitRef {
    /// Parse a full ref. Only the last two `/` separated segments are kept.
    pub fn parse(reference: &str) -> Result<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(DockerTagsError::git_ref("ref is empty"));
        }

        let mut segments = reference.rsplit('/');
        let name = segments.next().unwrap_or_default().to_string();
        let kind = segments.next().unwrap_or_default().to_string();

        if name.is_empty() {
            return Err(DockerTagsError::git_ref(format!(
                "ref '{}' has no name",
                reference
            )));
        }

        Ok(GitRef { kind, name })
    }

    /// Whether the run was triggered by a tag rather than a branch
    pub fn runs_on_tag(&self) -> bool {
        self.kind == "tags"
    }
}
