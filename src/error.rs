use thiserror::Error;

use crate::lookup::LookupKind;

/// Unified error type for docker-tags operations
#[derive(Error, Debug)]
pub enum DockerTagsError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Reference error: {0}")]
    Ref(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("The repository \"{repository}\" has no {kind}{}", matching_suffix(.prefix))]
    NoCandidate {
        repository: String,
        kind: LookupKind,
        prefix: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in docker-tags
pub type Result<T> = std::result::Result<T, DockerTagsError>;

fn matching_suffix(prefix: &str) -> String {
    if prefix.is_empty() {
        String::new()
    } else {
        format!(" matching \"{}*\"", prefix)
    }
}

impl DockerTagsError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        DockerTagsError::Config(msg.into())
    }

    /// Create a ref error with context
    pub fn git_ref(msg: impl Into<String>) -> Self {
        DockerTagsError::Ref(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        DockerTagsError::Remote(msg.into())
    }

    /// Lookup found nothing matching
    pub fn no_candidate(
        repository: impl Into<String>,
        kind: LookupKind,
        prefix: impl Into<String>,
    ) -> Self {
        DockerTagsError::NoCandidate {
            repository: repository.into(),
            kind,
            prefix: prefix.into(),
        }
    }
}
