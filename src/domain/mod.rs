//! Domain logic - pure tag ordering and generation rules, no I/O

pub mod generator;
pub mod git_ref;
pub mod options;
pub mod sort_key;
pub mod version;

pub use generator::{generate, generate_with_report, TagSet};
pub use git_ref::GitRef;
pub use options::{GenerationOptions, RollupDepth};
pub use sort_key::{cmp_tags, max_tag, sort_key, sort_tags, KeyElement, SortKey};
pub use version::{SemverTag, VersionModel};
