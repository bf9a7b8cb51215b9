//! Derivation of the tag set a release should carry

use std::cmp::Ordering;

use crate::domain::options::GenerationOptions;
use crate::domain::sort_key::cmp_tags;
use crate::domain::version::{SemverTag, VersionModel};

/// Generated tags plus how they were arrived at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    pub tags: Vec<String>,
    /// Set when a newer known tag suppressed rollup and latest aliases
    pub superseded_by: Option<String>,
}

/// Ordered list of tags to publish for `model`.
///
/// The first tag is the canonical one. Repeated tags are kept as is.
pub fn generate(model: &VersionModel, opts: &GenerationOptions) -> Vec<String> {
    generate_with_report(model, opts).tags
}

/// Like [generate], also reporting whether a newer release cut generation short
pub fn generate_with_report(model: &VersionModel, opts: &GenerationOptions) -> TagSet {
    let version = match model {
        VersionModel::NonSemver(raw) => {
            return TagSet {
                tags: vec![raw.clone()],
                superseded_by: None,
            }
        }
        VersionModel::Semver(version) => version,
    };

    let mut tags = Vec::new();
    let full = version.version_string();
    tags.push(compose(
        version,
        &[
            full.as_str(),
            opts.flavour.as_str(),
            version.prerelease_string().as_str(),
        ],
    ));

    if let Some(latest) = opts.known_latest() {
        if cmp_tags(&version.raw, latest) == Ordering::Less {
            return TagSet {
                tags,
                superseded_by: Some(latest.to_string()),
            };
        }
    }

    let components = version.components().map(|c| c.to_string());
    for depth in 0..=opts.rollup.depth() {
        let remaining = components[..components.len() - depth].join(".");
        tags.push(compose(version, &[remaining.as_str(), opts.flavour.as_str()]));
    }

    if opts.mark_latest {
        if opts.flavour.is_empty() {
            tags.push("latest".to_string());
        } else {
            tags.push(opts.flavour.clone());
        }
    }

    TagSet {
        tags,
        superseded_by: None,
    }
}

/// `{v?}` followed by the non-empty parts joined with `-`
fn compose(version: &SemverTag, parts: &[&str]) -> String {
    let body = parts
        .iter()
        .copied()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if version.v_prefix {
        format!("v{}", body)
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::RollupDepth;

    fn tags(tag: &str, opts: &GenerationOptions) -> Vec<String> {
        generate(&VersionModel::parse(tag), opts)
    }

    #[test]
    fn test_non_semver_passthrough() {
        let opts = GenerationOptions::new()
            .flavour("alpine")
            .rollup(RollupDepth::Major)
            .mark_latest(true)
            .latest_known_tag("9.9.9");
        assert_eq!(tags("nightly-build", &opts), vec!["nightly-build"]);
    }

    #[test]
    fn test_rollup_patch_duplicates_full_tag() {
        let opts = GenerationOptions::new();
        assert_eq!(tags("v2.5.1", &opts), vec!["v2.5.1", "v2.5.1"]);
    }

    #[test]
    fn test_rollup_minor() {
        let opts = GenerationOptions::new().rollup(RollupDepth::Minor);
        assert_eq!(tags("2.5.1", &opts), vec!["2.5.1", "2.5.1", "2.5"]);
    }

    #[test]
    fn test_rollup_major_with_flavour_and_latest() {
        let opts = GenerationOptions::new()
            .flavour("alpine")
            .rollup(RollupDepth::Major)
            .mark_latest(true);
        assert_eq!(
            tags("1.4.0", &opts),
            vec!["1.4.0-alpine", "1.4.0-alpine", "1.4-alpine", "1-alpine", "alpine"]
        );
    }

    #[test]
    fn test_latest_without_flavour() {
        let opts = GenerationOptions::new()
            .rollup(RollupDepth::Major)
            .mark_latest(true);
        assert_eq!(
            tags("v3.0.2", &opts),
            vec!["v3.0.2", "v3.0.2", "v3.0", "v3", "latest"]
        );
    }

    #[test]
    fn test_prerelease_only_on_first_tag() {
        let opts = GenerationOptions::new()
            .flavour("edge")
            .rollup(RollupDepth::Minor);
        assert_eq!(
            tags("v1.2.3-rc1", &opts),
            vec!["v1.2.3-edge-rc1", "v1.2.3-edge", "v1.2-edge"]
        );
    }

    #[test]
    fn test_dotted_prerelease_kept_dotted() {
        let opts = GenerationOptions::new();
        assert_eq!(tags("1.0.0-beta.2", &opts), vec!["1.0.0-beta.2", "1.0.0"]);
    }

    #[test]
    fn test_older_release_short_circuit() {
        let opts = GenerationOptions::new()
            .rollup(RollupDepth::Major)
            .mark_latest(true)
            .latest_known_tag("1.5.0");
        let model = VersionModel::parse("1.0.0");
        let report = generate_with_report(&model, &opts);
        assert_eq!(report.tags, vec!["1.0.0"]);
        assert_eq!(report.superseded_by, Some("1.5.0".to_string()));
    }

    #[test]
    fn test_same_release_is_not_older() {
        let opts = GenerationOptions::new()
            .rollup(RollupDepth::Minor)
            .mark_latest(true)
            .latest_known_tag("1.5.0");
        assert_eq!(tags("v1.5.0", &opts), vec!["v1.5.0", "v1.5.0", "v1.5", "latest"]);
    }

    #[test]
    fn test_newer_release_gets_aliases() {
        let opts = GenerationOptions::new()
            .mark_latest(true)
            .latest_known_tag("v1.9.0");
        let report = generate_with_report(&VersionModel::parse("v1.10.0"), &opts);
        assert_eq!(report.tags, vec!["v1.10.0", "v1.10.0", "latest"]);
        assert_eq!(report.superseded_by, None);
    }

    #[test]
    fn test_empty_latest_known_tag_is_ignored() {
        let opts = GenerationOptions::new()
            .mark_latest(true)
            .latest_known_tag("");
        assert_eq!(tags("0.1.0", &opts), vec!["0.1.0", "0.1.0", "latest"]);
    }

    #[test]
    fn test_generate_is_idempotent() {
        let model = VersionModel::parse("v4.2.0-alpha");
        let opts = GenerationOptions::new()
            .flavour("slim")
            .rollup(RollupDepth::Major)
            .mark_latest(true);
        assert_eq!(generate(&model, &opts), generate(&model, &opts));
    }
}
