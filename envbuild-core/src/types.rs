//! Domain types shared by the fetcher, renderer, and runner.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// A validated environment name such as `dev` or `prod/eu`.
///
/// Surrounding whitespace and slashes are trimmed on parse, so `/dev/` and
/// `dev` name the same namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Environment(String);

impl Environment {
    /// Validate and normalise a raw environment name.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let name = raw.trim().trim_matches('/');
        if name.is_empty() {
            return Err(ConfigError::MissingEnvironment);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidEnvironment {
                value: raw.to_string(),
                reason: "must not contain whitespace",
            });
        }
        if name.contains('%') {
            return Err(ConfigError::InvalidEnvironment {
                value: raw.to_string(),
                reason: "must not contain '%'",
            });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace path in the parameter store, e.g. `/dev`.
    pub fn namespace_path(&self) -> String {
        format!("/{}", self.0)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Parameter
// ---------------------------------------------------------------------------

/// One entry from the parameter store.
///
/// `name` is the full hierarchical path (`/dev/DB_HOST`); `value` is the raw
/// stored text, untrimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Token key for this parameter relative to `environment`.
    ///
    /// The `/<env>` prefix is stripped at a path boundary, then the leading
    /// `/`: `/dev/DB_HOST` becomes `DB_HOST`, `/dev/db/HOST` becomes
    /// `db/HOST`. Returns `None` for names outside the namespace.
    pub fn key_for(&self, environment: &Environment) -> Option<&str> {
        let rest = self.name.strip_prefix(&environment.namespace_path())?;
        let key = rest.strip_prefix('/')?;
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// How characters with meaning inside a double-quoted `.env` value are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapePolicy {
    /// Backslash-escape `\`, `"`, newline and carriage return.
    #[default]
    Escape,
    /// Refuse to render a value containing `"`, newline or carriage return.
    Reject,
    /// Insert the value as-is.
    Verbatim,
}

impl fmt::Display for EscapePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EscapePolicy::Escape => "escape",
            EscapePolicy::Reject => "reject",
            EscapePolicy::Verbatim => "verbatim",
        };
        f.write_str(s)
    }
}

/// What happens to a `%TOKEN%` with no matching parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPolicy {
    /// Leave the token in the output and report it.
    #[default]
    Keep,
    /// Fail the render.
    Fail,
}
