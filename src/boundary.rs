use std::fmt;

/// Non-fatal conditions met while deriving tags.
/// These are reported to the user but never stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The ref's tag is not a semantic version, so it is published unchanged
    NonSemverTag { tag: String },
    /// A newer tag already exists, so rollup and latest aliases are skipped
    NewerReleaseDetected { latest: String, released: String },
}

impl BoundaryWarning {
    /// Whether this should be shown as a warning rather than plain info
    pub fn is_warning(&self) -> bool {
        matches!(self, BoundaryWarning::NonSemverTag { .. })
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NonSemverTag { tag } => {
                write!(
                    f,
                    "Non semver tag is provided: {}. No tag generation will be performed",
                    tag
                )
            }
            BoundaryWarning::NewerReleaseDetected { latest, released } => {
                write!(
                    f,
                    "Newer release detected: {}, will release only {}.",
                    latest, released
                )
            }
        }
    }
}
