use std::fmt;

/// A tag parsed as a semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemverTag {
    /// The tag exactly as supplied
    pub raw: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Dot-separated prerelease identifiers, empty for a release
    pub prerelease: Vec<String>,
    /// Tag was written as `v1.2.3`
    pub v_prefix: bool,
}

impl SemverTag {
    /// `major.minor.patch`, no prefix or suffix
    pub fn version_string(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Numeric components, most significant first
    pub fn components(&self) -> [u64; 3] {
        [self.major, self.minor, self.patch]
    }

    /// Prerelease identifiers joined back with `.` (`rc.1`), or empty
    pub fn prerelease_string(&self) -> String {
        self.prerelease.join(".")
    }
}

/// A tag, either decomposed as semver or kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionModel {
    Semver(SemverTag),
    NonSemver(String),
}

impl VersionModel {
    /// Parse a tag such as `v1.2.3-rc.1`.
    ///
    /// Surrounding whitespace and a single leading `v` are tolerated; the rest
    /// must be a strict `MAJOR.MINOR.PATCH[-PRE][+BUILD]` version. Anything
    /// else becomes [VersionModel::NonSemver].
    pub fn parse(tag: &str) -> Self {
        let trimmed = tag.trim();
        let (v_prefix, bare) = match trimmed.strip_prefix('v') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        match semver::Version::parse(bare) {
            Ok(version) => {
                let prerelease = if version.pre.is_empty() {
                    Vec::new()
                } else {
                    version.pre.as_str().split('.').map(str::to_string).collect()
                };
                VersionModel::Semver(SemverTag {
                    raw: tag.to_string(),
                    major: version.major,
                    minor: version.minor,
                    patch: version.patch,
                    prerelease,
                    v_prefix,
                })
            }
            Err(e) => {
                tracing::debug!(tag, error = %e, "tag is not a semantic version");
                VersionModel::NonSemver(tag.to_string())
            }
        }
    }

    pub fn is_semver(&self) -> bool {
        matches!(self, VersionModel::Semver(_))
    }

    /// The tag this model was built from
    pub fn raw(&self) -> &str {
        match self {
            VersionModel::Semver(v) => &v.raw,
            VersionModel::NonSemver(raw) => raw,
        }
    }

    /// Bare `major.minor.patch`, only for semver tags
    pub fn version_string(&self) -> Option<String> {
        match self {
            VersionModel::Semver(v) => Some(v.version_string()),
            VersionModel::NonSemver(_) => None,
        }
    }
}

impl fmt::Display for VersionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}
