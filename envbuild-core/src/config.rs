//! Resolved settings for one build run.
//!
//! Raw inputs (flags or environment variables) are validated here once, so
//! the fetcher, renderer and runner only ever see well-formed values.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::{EscapePolicy, Environment, UnresolvedPolicy};

/// Template file name, looked up inside the base directory.
pub const TEMPLATE_FILE: &str = ".env.template";

/// Output file name, written inside the base directory.
pub const OUTPUT_FILE: &str = ".env";

/// Upper bound on store pages fetched in one run.
pub const DEFAULT_MAX_PAGES: usize = 500;

/// Everything a build run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub environment: Environment,
    /// Directory holding `.env.template` and receiving `.env`.
    pub base_dir: PathBuf,
    pub max_pages: usize,
    pub escape: EscapePolicy,
    pub unresolved: UnresolvedPolicy,
    pub dry_run: bool,
}

impl Settings {
    pub fn new(environment: Environment, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            environment,
            base_dir: base_dir.into(),
            max_pages: DEFAULT_MAX_PAGES,
            escape: EscapePolicy::default(),
            unresolved: UnresolvedPolicy::default(),
            dry_run: false,
        }
    }

    /// Build settings from raw inputs relative to the process working directory.
    pub fn from_inputs(environment: Option<&str>, base_dir: Option<&str>) -> Result<Self, ConfigError> {
        let environment = Environment::parse(environment.unwrap_or_default())?;
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Ok(Self::new(environment, resolve_base_dir(&cwd, base_dir)))
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_escape(mut self, escape: EscapePolicy) -> Self {
        self.escape = escape;
        self
    }

    pub fn with_unresolved(mut self, unresolved: UnresolvedPolicy) -> Self {
        self.unresolved = unresolved;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn template_path(&self) -> PathBuf {
        self.base_dir.join(TEMPLATE_FILE)
    }

    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(OUTPUT_FILE)
    }
}

/// Resolve the working directory for a run.
///
/// A missing or blank `base_dir` means `cwd`; anything else is joined onto it.
/// Leading separators are dropped, so the result always stays under `cwd`.
pub fn resolve_base_dir(cwd: &Path, base_dir: Option<&str>) -> PathBuf {
    let dir = base_dir
        .map(|d| d.trim().trim_start_matches(&['/', '\\'][..]))
        .unwrap_or_default();
    if dir.is_empty() {
        cwd.to_path_buf()
    } else {
        cwd.join(dir)
    }
}
