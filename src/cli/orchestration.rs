//! Main workflow orchestration logic
//!
//! This module contains the per-run workflow, separate from CLI argument
//! parsing so it can be driven programmatically and tested without clap,
//! the network or the process environment.

use crate::boundary::BoundaryWarning;
use crate::config::{Config, LookupSource};
use crate::domain::{generate_with_report, GitRef, VersionModel};
use crate::error::{DockerTagsError, Result};
use crate::lookup::{find_latest_tag, Git2Source, GithubConfig, GithubSource, TagSource};
use crate::outputs::ActionOutputs;

/// Inputs for one run that do not come from the config file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowArgs {
    /// Full ref being built, e.g. `refs/tags/v1.2.3`
    pub git_ref: String,

    /// Latest known tag supplied by the caller; skips the lookup
    pub latest_tag: Option<String>,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub outputs: ActionOutputs,

    /// Latest tag the generation compared against, if any
    pub latest_known: Option<String>,

    /// Non-fatal conditions to report
    pub warnings: Vec<BoundaryWarning>,
}

/// Builds the tag source selected by the configuration.
///
/// # Arguments
///
/// * `config` - Resolved configuration
/// * `repository` - `owner/repo` slug, needed for the GitHub lookup
/// * `token` - Optional API token
///
/// # Returns
///
/// `None` when the lookup is disabled
pub fn build_source(
    config: &Config,
    repository: Option<&str>,
    token: Option<&str>,
) -> Result<Option<Box<dyn TagSource>>> {
    match config.lookup.source {
        LookupSource::Disabled => Ok(None),
        LookupSource::Git => {
            let source: Box<dyn TagSource> = Box::new(Git2Source::open(".")?);
            Ok(Some(source))
        }
        LookupSource::Github => {
            let slug = repository.filter(|r| !r.is_empty()).ok_or_else(|| {
                DockerTagsError::config(
                    "the github lookup needs a repository (--repository or GITHUB_REPOSITORY)",
                )
            })?;
            let github = GithubConfig::from_slug(slug, config.lookup.api_url.as_deref(), token)?;
            let source: Box<dyn TagSource> = Box::new(GithubSource::new(github)?);
            Ok(Some(source))
        }
    }
}

/// Per-run workflow
///
/// 1. Parse the ref into the tag to build
/// 2. Find the latest known tag (explicit, looked up, or none)
/// 3. Parse the tag and generate the tag set
/// 4. Derive the outputs
///
/// # Arguments
///
/// * `args` - Ref and optional explicit latest tag
/// * `config` - Resolved configuration (file plus overrides)
/// * `source` - Where to look up the latest tag; `None` skips the lookup
pub fn run_workflow(
    args: &WorkflowArgs,
    config: &Config,
    source: Option<&dyn TagSource>,
) -> Result<WorkflowResult> {
    let image = config
        .image
        .as_deref()
        .filter(|i| !i.is_empty())
        .ok_or_else(|| DockerTagsError::config("an image name is required"))?;

    let git_ref = GitRef::parse(&args.git_ref)?;
    tracing::debug!(kind = %git_ref.kind, name = %git_ref.name, "resolved ref");

    let latest_known = match args.latest_tag.as_deref().filter(|t| !t.is_empty()) {
        Some(tag) => Some(tag.to_string()),
        None => match source {
            Some(source) => Some(find_latest_tag(
                source,
                &config.lookup.prefix,
                config.lookup.kind(),
                config.lookup.sort,
            )?),
            None => None,
        },
    };
    if let Some(latest) = &latest_known {
        tracing::info!(%latest, "latest known tag");
    }

    let mut warnings = Vec::new();
    let model = VersionModel::parse(&git_ref.name);
    if !model.is_semver() {
        warnings.push(BoundaryWarning::NonSemverTag {
            tag: git_ref.name.clone(),
        });
    }

    let options = config.generation_options(latest_known.clone());
    let tag_set = generate_with_report(&model, &options);
    if let (Some(latest), Some(first)) = (&tag_set.superseded_by, tag_set.tags.first()) {
        warnings.push(BoundaryWarning::NewerReleaseDetected {
            latest: latest.clone(),
            released: first.clone(),
        });
    }

    let outputs = ActionOutputs::new(tag_set.tags, image, &model, &git_ref);

    Ok(WorkflowResult {
        outputs,
        latest_known,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::MockSource;

    fn config(updates: &str, flavour: &str) -> Config {
        let mut config = Config::default();
        config.image = Some("acme/widget".to_string());
        config.generation.updates = updates.to_string();
        config.generation.flavour = flavour.to_string();
        config
    }

    fn args(git_ref: &str) -> WorkflowArgs {
        WorkflowArgs {
            git_ref: git_ref.to_string(),
            latest_tag: None,
        }
    }

    #[test]
    fn test_newest_tag_gets_rollups() {
        let source = MockSource::new("acme/widget").with_tags(["v1.1.0", "v1.0.0"]);
        let result = run_workflow(
            &args("refs/tags/v1.2.0"),
            &config("major", ""),
            Some(&source),
        )
        .unwrap();

        assert_eq!(
            result.outputs.tags,
            vec!["v1.2.0", "v1.2.0", "v1.2", "v1", "latest"]
        );
        assert_eq!(result.outputs.images[4], "acme/widget:latest");
        assert_eq!(result.outputs.version.as_deref(), Some("1.2.0"));
        assert!(result.outputs.runs_on_tag);
        assert_eq!(result.latest_known.as_deref(), Some("v1.1.0"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_older_tag_is_released_alone() {
        let source = MockSource::new("acme/widget").with_tags(["v2.0.0", "v1.0.0"]);
        let result = run_workflow(
            &args("refs/tags/v1.0.1"),
            &config("minor", "alpine"),
            Some(&source),
        )
        .unwrap();

        assert_eq!(result.outputs.tags, vec!["v1.0.1-alpine"]);
        assert_eq!(
            result.warnings,
            vec![BoundaryWarning::NewerReleaseDetected {
                latest: "v2.0.0".to_string(),
                released: "v1.0.1-alpine".to_string(),
            }]
        );
    }

    #[test]
    fn test_branch_build_is_passed_through() {
        let result = run_workflow(&args("refs/heads/main"), &config("major", ""), None).unwrap();

        assert_eq!(result.outputs.tags, vec!["main"]);
        assert_eq!(result.outputs.version, None);
        assert!(!result.outputs.runs_on_tag);
        assert_eq!(
            result.warnings,
            vec![BoundaryWarning::NonSemverTag {
                tag: "main".to_string()
            }]
        );
    }

    #[test]
    fn test_explicit_latest_skips_lookup() {
        let failing = MockSource::new("acme/widget").failing_after(0, "must not be called");
        let mut workflow_args = args("refs/tags/1.0.0");
        workflow_args.latest_tag = Some("1.5.0".to_string());

        let result = run_workflow(&workflow_args, &config("major", ""), Some(&failing)).unwrap();
        assert_eq!(result.outputs.tags, vec!["1.0.0"]);
        assert_eq!(result.latest_known.as_deref(), Some("1.5.0"));
    }

    #[test]
    fn test_lookup_failure_is_fatal() {
        let source = MockSource::new("acme/widget").with_releases(Vec::<String>::new());
        let mut cfg = config("", "");
        cfg.lookup.releases_only = true;
        cfg.lookup.prefix = "v".to_string();

        let err = run_workflow(&args("refs/tags/v1.0.0"), &cfg, Some(&source)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The repository \"acme/widget\" has no releases matching \"v*\""
        );
    }

    #[test]
    fn test_missing_image_is_an_error() {
        let mut cfg = config("", "");
        cfg.image = None;
        let err = run_workflow(&args("refs/tags/v1.0.0"), &cfg, None).unwrap_err();
        assert!(matches!(err, DockerTagsError::Config(_)));
    }

    #[test]
    fn test_build_source_disabled() {
        let mut cfg = Config::default();
        cfg.lookup.source = LookupSource::Disabled;
        assert!(build_source(&cfg, None, None).unwrap().is_none());
    }

    #[test]
    fn test_build_source_github_needs_repository() {
        let cfg = Config::default();
        assert!(build_source(&cfg, None, None).is_err());
        assert!(build_source(&cfg, Some("acme/widget"), None).unwrap().is_some());
    }
}
