use docker_tags::boundary::BoundaryWarning;
use docker_tags::cli::orchestration::{run_workflow, WorkflowArgs};
use docker_tags::config::Config;
use docker_tags::lookup::{LookupKind, MockSource, TagSource};

fn config() -> Config {
    let mut config = Config::default();
    config.image = Some("ghcr.io/acme/widget".to_string());
    config.generation.updates = "major".to_string();
    config
}

fn args(git_ref: &str) -> WorkflowArgs {
    WorkflowArgs {
        git_ref: git_ref.to_string(),
        latest_tag: None,
    }
}

#[test]
fn test_release_with_flavour() {
    let mut cfg = config();
    cfg.generation.flavour = "alpine".to_string();
    let source = MockSource::new("acme/widget").with_tags(["1.3.9", "1.3.10"]);

    let result = run_workflow(&args("refs/tags/1.4.0"), &cfg, Some(&source)).unwrap();

    assert_eq!(
        result.outputs.tags,
        vec!["1.4.0-alpine", "1.4.0-alpine", "1.4-alpine", "1-alpine", "alpine"]
    );
    assert_eq!(
        result.outputs.images[0],
        "ghcr.io/acme/widget:1.4.0-alpine"
    );
    assert_eq!(result.latest_known.as_deref(), Some("1.3.10"));
}

#[test]
fn test_prerelease_of_current_latest_is_newer() {
    // 1.2.0-rc1 sorts after 1.2.0 under the tag ordering
    let source = MockSource::new("acme/widget").with_tags(["v1.2.0"]);
    let result = run_workflow(&args("refs/tags/v1.2.0-rc1"), &config(), Some(&source)).unwrap();

    assert_eq!(
        result.outputs.tags,
        vec!["v1.2.0-rc1", "v1.2.0", "v1.2", "v1", "latest"]
    );
    assert_eq!(result.outputs.version.as_deref(), Some("1.2.0"));
}

#[test]
fn test_release_after_its_prerelease_is_older() {
    let source = MockSource::new("acme/widget").with_tags(["v1.2.0-rc1"]);
    let result = run_workflow(&args("refs/tags/v1.2.0"), &config(), Some(&source)).unwrap();

    assert_eq!(result.outputs.tags, vec!["v1.2.0"]);
    assert!(matches!(
        result.warnings.as_slice(),
        [BoundaryWarning::NewerReleaseDetected { .. }]
    ));
}

#[test]
fn test_first_item_mode_trusts_source_order() {
    let mut cfg = config();
    cfg.lookup.sort = false;
    let source = MockSource::new("acme/widget").with_tags(["v1.0.0", "v3.0.0"]);

    let result = run_workflow(&args("refs/tags/v2.0.0"), &cfg, Some(&source)).unwrap();
    assert_eq!(result.latest_known.as_deref(), Some("v1.0.0"));
    assert_eq!(result.outputs.tags.len(), 5);
}

#[test]
fn test_no_lookup_source() {
    let result = run_workflow(&args("refs/tags/v0.1.0"), &config(), None).unwrap();
    assert_eq!(result.latest_known, None);
    assert_eq!(result.outputs.tags.last().map(String::as_str), Some("latest"));
}

#[test]
fn test_runs_are_independent() {
    let source = MockSource::new("acme/widget").with_tags(["v1.0.0"]);
    let first = run_workflow(&args("refs/tags/v1.1.0"), &config(), Some(&source)).unwrap();
    let second = run_workflow(&args("refs/tags/v1.1.0"), &config(), Some(&source)).unwrap();
    assert_eq!(first, second);
    assert_eq!(source.tags(LookupKind::Tags).unwrap().count(), 1);
}
