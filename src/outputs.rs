//! Values handed back to the CI system and how they are published

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::domain::{GitRef, VersionModel};
use crate::error::Result;

/// Environment variable naming the GitHub Actions output file
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Everything a run produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutputs {
    /// Generated tags, canonical tag first
    pub tags: Vec<String>,
    /// `{image}:{tag}` for every tag
    pub images: Vec<String>,
    /// Bare `major.minor.patch`, only for semver tags
    pub version: Option<String>,
    pub runs_on_tag: bool,
}

impl ActionOutputs {
    pub fn new(tags: Vec<String>, image: &str, model: &VersionModel, git_ref: &GitRef) -> Self {
        let images = tags.iter().map(|tag| format!("{}:{}", image, tag)).collect();
        ActionOutputs {
            tags,
            images,
            version: model.version_string(),
            runs_on_tag: git_ref.runs_on_tag(),
        }
    }

    /// Output name/value pairs in publication order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            ("runsOnTag", self.runs_on_tag.to_string()),
            ("tags", self.tags.join("\n")),
            ("images", self.images.join("\n")),
        ];
        if let Some(version) = &self.version {
            entries.push(("version", version.clone()));
        }
        entries
    }
}

/// Where outputs are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Append to the file named by `GITHUB_OUTPUT`
    GithubFile(PathBuf),
    /// Print `name=value` lines
    Stdout,
}

impl OutputTarget {
    pub fn from_env() -> Self {
        match std::env::var(GITHUB_OUTPUT) {
            Ok(path) if !path.is_empty() => OutputTarget::GithubFile(PathBuf::from(path)),
            _ => OutputTarget::Stdout,
        }
    }
}

/// Write every output to `target`
pub fn publish(outputs: &ActionOutputs, target: &OutputTarget) -> Result<()> {
    let entries = outputs.entries();
    match target {
        OutputTarget::GithubFile(path) => {
            tracing::debug!(path = %path.display(), "appending outputs");
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            write_delimited(&mut file, &entries)?;
        }
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            write_plain(&mut stdout.lock(), &entries)?;
        }
    }
    Ok(())
}

/// `name<<DELIM` / value / `DELIM`, the multi-line output file format
pub fn write_delimited<W: Write>(out: &mut W, entries: &[(&str, String)]) -> io::Result<()> {
    for (name, value) in entries {
        let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
        writeln!(out, "{}<<{}", name, delimiter)?;
        writeln!(out, "{}", value)?;
        writeln!(out, "{}", delimiter)?;
    }
    out.flush()
}

/// One `name=value` line per output, with `%`, CR and LF percent-encoded
pub fn write_plain<W: Write>(out: &mut W, entries: &[(&str, String)]) -> io::Result<()> {
    for (name, value) in entries {
        writeln!(out, "{}={}", name, escape_value(value))?;
    }
    out.flush()
}

fn escape_value(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs(tag: &str, reference: &str) -> ActionOutputs {
        let model = VersionModel::parse(tag);
        let git_ref = GitRef::parse(reference).unwrap();
        ActionOutputs::new(
            vec![tag.to_string(), "latest".to_string()],
            "ghcr.io/acme/widget",
            &model,
            &git_ref,
        )
    }

    #[test]
    fn test_images_follow_tags() {
        let out = outputs("v1.2.3", "refs/tags/v1.2.3");
        assert_eq!(
            out.images,
            vec!["ghcr.io/acme/widget:v1.2.3", "ghcr.io/acme/widget:latest"]
        );
        assert_eq!(out.version.as_deref(), Some("1.2.3"));
        assert!(out.runs_on_tag);
    }

    #[test]
    fn test_non_semver_has_no_version() {
        let out = outputs("main", "refs/heads/main");
        assert_eq!(out.version, None);
        assert!(!out.runs_on_tag);
        assert!(out.entries().iter().all(|(name, _)| *name != "version"));
    }

    #[test]
    fn test_entries() {
        let out = outputs("1.0.0", "refs/tags/1.0.0");
        let entries = out.entries();
        assert_eq!(entries[0], ("runsOnTag", "true".to_string()));
        assert_eq!(entries[1], ("tags", "1.0.0\nlatest".to_string()));
        assert_eq!(entries[3], ("version", "1.0.0".to_string()));
    }

    #[test]
    fn test_write_delimited() {
        let mut buf = Vec::new();
        write_delimited(&mut buf, &[("tags", "a\nb".to_string())]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        let delimiter = lines[0].strip_prefix("tags<<").unwrap();
        assert!(delimiter.starts_with("ghadelimiter_"));
        assert_eq!(&lines[1..3], &["a", "b"]);
        assert_eq!(lines[3], delimiter);
    }

    #[test]
    fn test_write_plain() {
        let mut buf = Vec::new();
        write_plain(
            &mut buf,
            &[("tags", "a\nb".to_string()), ("runsOnTag", "false".to_string())],
        )
        .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "tags=a%0Ab\nrunsOnTag=false\n");
    }

    #[test]
    fn test_write_plain_escapes_percent_first() {
        let mut buf = Vec::new();
        write_plain(&mut buf, &[("tags", "50%0A\r\nx".to_string())]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "tags=50%250A%0D%0Ax\n");
    }

    #[test]
    fn test_publish_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");
        std::fs::write(&path, "existing=1\n").unwrap();

        let out = outputs("v2.0.0", "refs/tags/v2.0.0");
        publish(&out, &OutputTarget::GithubFile(path.clone())).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("existing=1\n"));
        assert!(text.contains("version<<ghadelimiter_"));
        assert!(text.contains("\nghcr.io/acme/widget:v2.0.0\n"));
    }
}
