//! Obtaining a working copy of the site template.
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};

use super::fs::copy_dir_recursive;
use crate::exec;

/// Template repository used when `--template` is not given.
pub const DEFAULT_TEMPLATE: &str = "https://github.com/biolink-rs/biolink-template.git";

/// Where the template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A git repository URL, shallow-cloned.
    Git(String),
    /// A local directory, copied without its `.git` metadata.
    Local(PathBuf),
}

impl TemplateSource {
    /// Classify a `--template` argument.
    ///
    /// URLs (`http(s)://`, `ssh://`, `git://`, `file://`, `git@host:`) are
    /// cloned; anything else is treated as a local directory.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        const REMOTE_PREFIXES: [&str; 6] =
            ["https://", "http://", "ssh://", "git://", "file://", "git@"];
        if REMOTE_PREFIXES.iter().any(|p| source.starts_with(p)) {
            Self::Git(source.to_string())
        } else {
            Self::Local(PathBuf::from(source))
        }
    }
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self::Git(DEFAULT_TEMPLATE.to_string())
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git(url) => f.write_str(url),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Places a template checkout at a destination directory.
pub trait TemplateFetcher {
    /// Materialise `source` at `dest`, which must not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error describing why the template could not be obtained.
    fn fetch(&self, source: &TemplateSource, dest: &Path) -> Result<()>;
}

/// [`TemplateFetcher`] using `git` for remote sources and a recursive copy
/// for local ones.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFetcher;

impl TemplateFetcher for DefaultFetcher {
    fn fetch(&self, source: &TemplateSource, dest: &Path) -> Result<()> {
        match source {
            TemplateSource::Git(url) => {
                if !exec::which("git") {
                    bail!("git not found on PATH");
                }
                let dest = dest
                    .to_str()
                    .with_context(|| format!("non UTF-8 path: {}", dest.display()))?;
                exec::run("git", &["clone", "--depth", "1", "--quiet", url, dest])?;
                Ok(())
            }
            TemplateSource::Local(dir) => {
                if !dir.is_dir() {
                    bail!("{} is not a directory", dir.display());
                }
                copy_dir_recursive(dir, dest, true)?;
                Ok(())
            }
        }
    }
}
