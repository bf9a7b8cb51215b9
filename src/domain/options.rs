use std::fmt;

/// How far up the version the rollup tags reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum RollupDepth {
    /// `1.2.3` only
    #[default]
    Patch,
    /// also `1.2`
    Minor,
    /// also `1.2` and `1`
    Major,
}

impl RollupDepth {
    /// Read the `updates` input, e.g. `"minor"`, `"major"` or `"minor major"`.
    ///
    /// Matching is by substring; `major` wins over `minor`.
    pub fn from_updates(updates: &str) -> Self {
        if updates.contains("major") {
            RollupDepth::Major
        } else if updates.contains("minor") {
            RollupDepth::Minor
        } else {
            RollupDepth::Patch
        }
    }

    /// Number of components dropped at the deepest rollup level
    pub fn depth(self) -> usize {
        match self {
            RollupDepth::Patch => 0,
            RollupDepth::Minor => 1,
            RollupDepth::Major => 2,
        }
    }
}

impl fmt::Display for RollupDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollupDepth::Patch => write!(f, "patch"),
            RollupDepth::Minor => write!(f, "minor"),
            RollupDepth::Major => write!(f, "major"),
        }
    }
}

/// Options controlling which tags are generated for a version
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationOptions {
    /// Image variant suffix, empty for none
    pub flavour: String,
    pub rollup: RollupDepth,
    /// Also emit `latest` (or the bare flavour)
    pub mark_latest: bool,
    /// Newest tag known to exist; older versions get no aliases
    pub latest_known_tag: Option<String>,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flavour(mut self, flavour: impl Into<String>) -> Self {
        self.flavour = flavour.into();
        self
    }

    pub fn rollup(mut self, rollup: RollupDepth) -> Self {
        self.rollup = rollup;
        self
    }

    pub fn mark_latest(mut self, mark_latest: bool) -> Self {
        self.mark_latest = mark_latest;
        self
    }

    pub fn latest_known_tag(mut self, tag: impl Into<String>) -> Self {
        self.latest_known_tag = Some(tag.into());
        self
    }

    /// Latest known tag, treating an empty string as unknown
    pub fn known_latest(&self) -> Option<&str> {
        self.latest_known_tag
            .as_deref()
            .filter(|tag| !tag.is_empty())
    }
}
