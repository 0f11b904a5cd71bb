//! Subcommands and the options they share.

pub mod build;
pub mod diff;

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::Args;
use colored::Colorize;

use envbuild_core::{EscapePolicy, Settings, UnresolvedPolicy, DEFAULT_MAX_PAGES};
use envbuild_store::SsmStore;

// ---------------------------------------------------------------------------
// Shared target arguments
// ---------------------------------------------------------------------------

/// Which environment to build, where, and under which policies.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Environment name; parameters are read from `/<environment>`.
    #[arg(short, long, env = "ENVIRONMENT")]
    pub environment: Option<String>,

    /// Directory holding .env.template, relative to the working directory.
    #[arg(long, env = "BASE_DIR")]
    pub base_dir: Option<String>,

    /// How to insert values containing quotes or newlines.
    #[arg(long, env = "ENVBUILD_VALUES", default_value = "escape")]
    pub values: ValuesArg,

    /// Fail when the template references a parameter that does not exist.
    #[arg(long, env = "ENVBUILD_STRICT", value_parser = FalseyValueParser::new())]
    pub strict: bool,

    /// Stop listing after this many store pages.
    #[arg(long, env = "ENVBUILD_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Decrypt SecureString parameters.
    #[arg(long, env = "ENVBUILD_WITH_DECRYPTION", value_parser = FalseyValueParser::new())]
    pub with_decryption: bool,

    /// AWS region override.
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,
}

impl TargetArgs {
    /// Validate inputs into [`Settings`]; no I/O beyond reading the cwd.
    pub fn settings(&self) -> Result<Settings> {
        let unresolved = if self.strict {
            UnresolvedPolicy::Fail
        } else {
            UnresolvedPolicy::Keep
        };
        let settings = Settings::from_inputs(self.environment.as_deref(), self.base_dir.as_deref())
            .context("invalid configuration")?
            .with_max_pages(self.max_pages)
            .with_escape(self.values.0)
            .with_unresolved(unresolved);
        Ok(settings)
    }

    pub async fn store(&self) -> SsmStore {
        SsmStore::from_env(self.region.clone(), self.with_decryption).await
    }
}

// ---------------------------------------------------------------------------
// EscapePolicy argument
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse [`EscapePolicy`] from CLI args.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuesArg(pub EscapePolicy);

impl FromStr for ValuesArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "escape" => Ok(Self(EscapePolicy::Escape)),
            "reject" => Ok(Self(EscapePolicy::Reject)),
            "verbatim" => Ok(Self(EscapePolicy::Verbatim)),
            other => Err(format!(
                "unknown value policy '{other}'; expected: escape, reject, verbatim"
            )),
        }
    }
}

impl fmt::Display for ValuesArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Failure reporting
// ---------------------------------------------------------------------------

/// Print the error chain; inside GitHub Actions also mark the step failed.
pub fn report_failure(err: &anyhow::Error) {
    eprintln!("{} {:#}", "error:".red().bold(), err);
    if std::env::var("GITHUB_ACTIONS").as_deref() == Ok("true") {
        println!("::error::{}", workflow_escape(&format!("{err:#}")));
    }
}

/// Escape a message for a GitHub Actions workflow command.
fn workflow_escape(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
