//! GitHub REST API tag source

use std::collections::VecDeque;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;

use crate::error::{DockerTagsError, Result};
use crate::lookup::{LookupKind, TagSource, TagStream};

/// Default public API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size requested from the API (the maximum it allows)
pub const PER_PAGE: usize = 100;

/// Connection settings for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    pub token: Option<String>,
}

impl GithubConfig {
    /// Build from an `owner/repo` slug as found in `GITHUB_REPOSITORY`
    pub fn from_slug(slug: &str, api_url: Option<&str>, token: Option<&str>) -> Result<Self> {
        let (owner, repo) = slug
            .trim()
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
            .ok_or_else(|| {
                DockerTagsError::config(format!(
                    "repository '{}' is not in owner/repo form",
                    slug
                ))
            })?;

        Ok(GithubConfig {
            api_url: api_url
                .filter(|url| !url.is_empty())
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: token.filter(|t| !t.is_empty()).map(str::to_string),
        })
    }

    /// Listing endpoint for `kind`
    pub fn endpoint(&self, kind: LookupKind) -> String {
        let path = match kind {
            LookupKind::Tags => "tags",
            LookupKind::Releases => "releases",
        };
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.owner, self.repo, path
        )
    }
}

#[derive(Deserialize)]
struct TagItem {
    name: String,
}

#[derive(Deserialize)]
struct ReleaseItem {
    tag_name: String,
}

/// Extract tag names from one page of API JSON
pub fn parse_page(kind: LookupKind, body: &str) -> Result<Vec<String>> {
    let names = match kind {
        LookupKind::Tags => serde_json::from_str::<Vec<TagItem>>(body)?
            .into_iter()
            .map(|item| item.name)
            .collect(),
        LookupKind::Releases => serde_json::from_str::<Vec<ReleaseItem>>(body)?
            .into_iter()
            .map(|item| item.tag_name)
            .collect(),
    };
    Ok(names)
}

/// Tag source backed by the GitHub REST API.
///
/// The HTTP client is owned by the source and built from an explicit
/// [GithubConfig]; nothing is shared process-wide.
pub struct GithubSource {
    config: GithubConfig,
    client: Client,
}

impl GithubSource {
    pub fn new(config: GithubConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("docker-tags/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(GithubSource { config, client })
    }

    fn fetch_page(&self, kind: LookupKind, page: usize) -> Result<Vec<String>> {
        let url = self.config.endpoint(kind);
        tracing::debug!(%url, page, "fetching page");

        let mut request = self
            .client
            .get(&url)
            .query(&[("per_page", PER_PAGE), ("page", page)])
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(DockerTagsError::remote(format!(
                "GET {} returned {}: {}",
                url,
                status,
                body.trim()
            )));
        }

        parse_page(kind, &body)
    }
}

impl TagSource for GithubSource {
    fn repository(&self) -> String {
        format!("{}/{}", self.config.owner, self.config.repo)
    }

    fn tags(&self, kind: LookupKind) -> Result<TagStream<'_>> {
        Ok(Box::new(Pages::new(PER_PAGE, move |page| {
            self.fetch_page(kind, page)
        })))
    }
}

/// Flattens numbered pages into items, fetching each page on demand.
///
/// Iteration stops after a short page or the first error.
pub struct Pages<F> {
    fetch: F,
    per_page: usize,
    next_page: Option<usize>,
    buffer: VecDeque<String>,
}

impl<F> Pages<F>
where
    F: FnMut(usize) -> Result<Vec<String>>,
{
    /// Pages are numbered from 1
    pub fn new(per_page: usize, fetch: F) -> Self {
        Pages {
            fetch,
            per_page,
            next_page: Some(1),
            buffer: VecDeque::new(),
        }
    }
}

impl<F> Iterator for Pages<F>
where
    F: FnMut(usize) -> Result<Vec<String>>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }

            let page = self.next_page?;
            match (self.fetch)(page) {
                Ok(items) => {
                    self.next_page = if items.len() < self.per_page {
                        None
                    } else {
                        Some(page + 1)
                    };
                    self.buffer.extend(items);
                }
                Err(e) => {
                    self.next_page = None;
                    return Some(Err(e));
                }
            }
        }
    }
}
