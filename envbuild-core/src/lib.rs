//! envbuild core library — domain types, run settings, errors.
//!
//! - [`types`] — [`Environment`], [`Parameter`] and rendering policies
//! - [`config`] — resolved [`Settings`] for a single run
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{resolve_base_dir, Settings, DEFAULT_MAX_PAGES, OUTPUT_FILE, TEMPLATE_FILE};
pub use error::ConfigError;
pub use types::{EscapePolicy, Environment, Parameter, UnresolvedPolicy};
