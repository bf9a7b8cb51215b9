use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docker_tags::cli::{build_source, run_workflow, WorkflowArgs};
use docker_tags::config::{self, LookupSource, Overrides};
use docker_tags::outputs::{self, OutputTarget};
use docker_tags::ui;

#[derive(clap::Parser)]
#[command(
    name = "docker-tags",
    version,
    about = "Generate Docker image tags from a git ref with semver rollups"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long = "ref", env = "GITHUB_REF", help = "Ref being built, e.g. refs/tags/v1.2.3")]
    git_ref: String,

    #[arg(long, env = "INPUT_IMAGE", help = "Image name, e.g. ghcr.io/acme/widget")]
    image: Option<String>,

    #[arg(long, env = "INPUT_FLAVOUR", help = "Suffix appended to every tag")]
    flavour: Option<String>,

    #[arg(long, env = "INPUT_UPDATES", help = "Rollup tags to add: minor and/or major")]
    updates: Option<String>,

    #[arg(long, env = "INPUT_TAGS-LATEST", help = "Also tag latest (true/false)")]
    tags_latest: Option<String>,

    #[arg(long, env = "INPUT_RELEASES-ONLY", help = "Look up releases instead of tags (true/false)")]
    releases_only: Option<String>,

    #[arg(long, env = "INPUT_PREFIX", help = "Only consider existing tags with this prefix")]
    prefix: Option<String>,

    #[arg(long, help = "Take the first listed tag instead of sorting all of them")]
    no_sort: bool,

    #[arg(long, env = "INPUT_LATEST-TAG", help = "Latest existing tag; skips the lookup")]
    latest_tag: Option<String>,

    #[arg(long, value_enum, env = "INPUT_LOOKUP", help = "Where to look up existing tags")]
    lookup: Option<LookupSource>,

    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true, help = "GitHub API token")]
    token: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", help = "GitHub API base URL")]
    api_url: Option<String>,

    #[arg(long, env = "GITHUB_REPOSITORY", help = "Repository as owner/repo")]
    repository: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            image: self.image.clone(),
            flavour: self.flavour.clone(),
            updates: self.updates.clone(),
            tags_latest: self.tags_latest.as_deref().and_then(config::parse_flag),
            source: self.lookup,
            releases_only: self.releases_only.as_deref().and_then(config::parse_flag),
            prefix: self.prefix.clone(),
            sort: self.no_sort.then_some(false),
            api_url: self.api_url.clone(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?.with_overrides(args.overrides());
    tracing::debug!(?config, "resolved configuration");

    let workflow_args = WorkflowArgs {
        git_ref: args.git_ref.clone(),
        latest_tag: args.latest_tag.clone(),
    };

    // An explicit latest tag makes the lookup unnecessary
    let source = if workflow_args.latest_tag.as_deref().is_some_and(|t| !t.is_empty()) {
        None
    } else {
        let token = args
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok());
        build_source(&config, args.repository.as_deref(), token.as_deref())?
    };

    let result = run_workflow(&workflow_args, &config, source.as_deref())?;

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_generated(&result.outputs.tags);

    outputs::publish(&result.outputs, &OutputTarget::from_env())?;
    Ok(())
}
